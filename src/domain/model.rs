use std::fmt;

/// Columns every input file must carry, in the order they are validated.
pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "email", "role"];

/// One data row exactly as read from the file, keyed by header name in header order.
///
/// Columns missing from a short row are simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub row_number: usize,
    pub fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new(row_number: usize, fields: Vec<(String, String)>) -> Self {
        Self { row_number, fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", key, value)?;
        }
        f.write_str("}")
    }
}

/// A candidate account. Values are kept as read; trimming happens at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub role: String,
    /// Non-required columns, passed through to the endpoint untouched.
    pub extra: Vec<(String, String)>,
}

impl UserRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((column.into(), value.into()));
        self
    }

    /// JSON body sent to the endpoint: every non-empty value, trimmed.
    pub fn to_payload(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut payload = serde_json::Map::new();
        let required = [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("role", self.role.as_str()),
        ];
        let extra = self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str()));

        for (key, value) in required.into_iter().chain(extra) {
            if !value.is_empty() {
                payload.insert(
                    key.to_string(),
                    serde_json::Value::String(value.trim().to_string()),
                );
            }
        }
        payload
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    MissingField(&'static str),
    InvalidEmail(String),
    InvalidRole(String),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::MissingField(field) => write!(f, "Missing {}", field),
            InvalidReason::InvalidEmail(email) => write!(f, "Invalid email format: {}", email),
            InvalidReason::InvalidRole(role) => write!(f, "Invalid role: {}", role),
        }
    }
}

/// Outcome of checking one row. A valid row comes back as its typed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(UserRecord),
    Invalid(InvalidReason),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    Timeout,
    Connect,
    Status { code: u16, body: String },
    Unexpected(String),
}

/// Longest slice of a rejected response body kept in the failure reason.
pub const MAX_BODY_CHARS: usize = 100;

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFailure::Timeout => f.write_str("Request timed out"),
            SubmitFailure::Connect => f.write_str("Could not connect to API"),
            SubmitFailure::Status { code, body } => {
                write!(f, "API error - Status: {}", code)?;
                if !body.is_empty() {
                    let excerpt: String = body.chars().take(MAX_BODY_CHARS).collect();
                    write!(f, ", Response: {}", excerpt)?;
                }
                Ok(())
            }
            SubmitFailure::Unexpected(message) => write!(f, "Unexpected error: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Created,
    Failed(SubmitFailure),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn has_problems(&self) -> bool {
        self.skipped + self.failed > 0
    }
}
