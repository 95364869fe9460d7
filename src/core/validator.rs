use crate::domain::model::{
    InvalidReason, RawRecord, UserRecord, ValidationResult, REQUIRED_COLUMNS,
};

pub const VALID_ROLES: [&str; 3] = ["admin", "user", "moderator"];

/// Checks one row against the account rules.
///
/// Required fields are checked in `name`, `email`, `role` order and the first
/// failure wins. The email check only looks for an `@` and a `.` anywhere in the
/// value. Roles are compared lowercased, but the returned record keeps the
/// original casing.
pub fn validate(row: &RawRecord) -> ValidationResult {
    match check(row) {
        Ok(record) => ValidationResult::Valid(record),
        Err(reason) => ValidationResult::Invalid(reason),
    }
}

fn check(row: &RawRecord) -> Result<UserRecord, InvalidReason> {
    let name = required(row, "name")?;
    let email = required(row, "email")?;
    let role = required(row, "role")?;

    let trimmed_email = email.trim();
    if !trimmed_email.contains('@') || !trimmed_email.contains('.') {
        return Err(InvalidReason::InvalidEmail(trimmed_email.to_string()));
    }

    let normalized_role = role.trim().to_lowercase();
    if !VALID_ROLES.contains(&normalized_role.as_str()) {
        return Err(InvalidReason::InvalidRole(normalized_role));
    }

    let extra = row
        .fields
        .iter()
        .filter(|(key, _)| !REQUIRED_COLUMNS.contains(&key.as_str()))
        .cloned()
        .collect();

    Ok(UserRecord {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        extra,
    })
}

fn required<'a>(row: &'a RawRecord, field: &'static str) -> Result<&'a str, InvalidReason> {
    row.get(field)
        .filter(|value| !value.trim().is_empty())
        .ok_or(InvalidReason::MissingField(field))
}
