use crate::domain::model::{SubmissionResult, SubmitFailure, UserRecord};
use crate::domain::ports::Submitter;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates accounts by POSTing each record as JSON to a fixed endpoint.
pub struct ApiSubmitter {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl ApiSubmitter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for ApiSubmitter {
    async fn submit(&self, record: &UserRecord) -> SubmissionResult {
        let payload = record.to_payload();

        tracing::debug!("POST {} for {}", self.endpoint, record.email.trim());

        let response = match self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SubmissionResult::Failed(classify(&e)),
        };

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::CREATED {
            tracing::info!("User created successfully: {}", record.email.trim());
            return SubmissionResult::Created;
        }

        // 讀取回應內容也受同一個逾時限制
        match response.text().await {
            Ok(body) => SubmissionResult::Failed(SubmitFailure::Status {
                code: status.as_u16(),
                body,
            }),
            Err(e) => SubmissionResult::Failed(classify(&e)),
        }
    }
}

fn classify(error: &reqwest::Error) -> SubmitFailure {
    if error.is_timeout() {
        SubmitFailure::Timeout
    } else if error.is_connect() {
        SubmitFailure::Connect
    } else {
        SubmitFailure::Unexpected(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn john() -> UserRecord {
        UserRecord::new("John Doe", "john@example.com", "admin")
    }

    #[tokio::test]
    async fn test_successful_user_creation() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/create_user");
            then.status(201)
                .json_body(serde_json::json!({"message": "User created"}));
        });

        let submitter = ApiSubmitter::new(server.url("/api/create_user"), DEFAULT_TIMEOUT);
        let result = submitter.submit(&john()).await;

        api_mock.assert();
        assert_eq!(result, SubmissionResult::Created);
    }

    #[tokio::test]
    async fn test_data_trimming() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/users").json_body(serde_json::json!({
                "name": "John Doe",
                "email": "john@example.com",
                "role": "admin"
            }));
            then.status(201);
        });

        let record = UserRecord::new("  John Doe  ", "  john@example.com  ", "  admin  ");
        let submitter = ApiSubmitter::new(server.url("/users"), DEFAULT_TIMEOUT);
        let result = submitter.submit(&record).await;

        api_mock.assert_hits(1);
        assert_eq!(result, SubmissionResult::Created);
    }

    #[tokio::test]
    async fn test_role_case_is_not_normalized() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/users").json_body(serde_json::json!({
                "name": "Ann",
                "email": "ann@example.com",
                "role": "ADMIN"
            }));
            then.status(201);
        });

        let record = UserRecord::new("Ann", "ann@example.com", " ADMIN ");
        let submitter = ApiSubmitter::new(server.url("/users"), DEFAULT_TIMEOUT);

        assert_eq!(submitter.submit(&record).await, SubmissionResult::Created);
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/users");
            then.status(400)
                .json_body(serde_json::json!({"error": "User already exists"}));
        });

        let submitter = ApiSubmitter::new(server.url("/users"), DEFAULT_TIMEOUT);
        let result = submitter.submit(&john()).await;

        api_mock.assert();
        match result {
            SubmissionResult::Failed(failure) => {
                let reason = failure.to_string();
                assert!(reason.contains("API error"));
                assert!(reason.contains("400"));
                assert!(reason.contains("User already exists"));
            }
            SubmissionResult::Created => panic!("400 must not count as created"),
        }
    }

    #[tokio::test]
    async fn test_other_success_codes_are_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/users");
            then.status(200);
        });

        let submitter = ApiSubmitter::new(server.url("/users"), DEFAULT_TIMEOUT);
        let result = submitter.submit(&john()).await;

        assert_eq!(
            result,
            SubmissionResult::Failed(SubmitFailure::Status {
                code: 200,
                body: String::new()
            })
        );
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/slow");
            then.status(201).delay(Duration::from_secs(2));
        });

        let submitter = ApiSubmitter::new(server.url("/slow"), Duration::from_millis(200));
        let result = submitter.submit(&john()).await;

        assert_eq!(result, SubmissionResult::Failed(SubmitFailure::Timeout));
        assert_eq!(SubmitFailure::Timeout.to_string(), "Request timed out");
    }

    #[tokio::test]
    async fn test_timeout_while_reading_error_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 100\r\n\r\npartial")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
        });

        let submitter =
            ApiSubmitter::new(format!("http://{}/users", addr), Duration::from_millis(300));
        let result = submitter.submit(&john()).await;

        assert_eq!(result, SubmissionResult::Failed(SubmitFailure::Timeout));
        server.abort();
    }

    #[tokio::test]
    async fn test_connection_error() {
        // 沒有服務在監聽的埠
        let submitter = ApiSubmitter::new("http://127.0.0.1:1/users", DEFAULT_TIMEOUT);
        let result = submitter.submit(&john()).await;

        assert_eq!(result, SubmissionResult::Failed(SubmitFailure::Connect));
    }

    #[tokio::test]
    async fn test_unexpected_error() {
        let submitter = ApiSubmitter::new("not a url", DEFAULT_TIMEOUT);
        let result = submitter.submit(&john()).await;

        match result {
            SubmissionResult::Failed(failure @ SubmitFailure::Unexpected(_)) => {
                assert!(failure.to_string().starts_with("Unexpected error: "));
            }
            other => panic!("expected unexpected error, got {:?}", other),
        }
    }
}
