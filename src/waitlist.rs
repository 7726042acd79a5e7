use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMAIL_REQUIRED: &str = "Email is required";
const ALREADY_REGISTERED: &str = "Email already registered";

/// Record the server hands back on a successful signup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignupError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Email already registered")]
    AlreadyRegistered,
    #[error("{0}")]
    Server(String),
    #[error("could not reach the waitlist: {0}")]
    Transport(String),
}

#[cfg_attr(not(feature = "network"), allow(dead_code))]
#[derive(Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Maps a waitlist response to its outcome. Unrecognized bodies keep the
/// server's generic wording.
pub fn interpret_response(status: u16, body: &str) -> Result<WaitlistEntry, SignupError> {
    if status == 201 {
        return serde_json::from_str(body)
            .map_err(|e| SignupError::Server(format!("unexpected signup response: {e}")));
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| "Error processing request".to_string());
    match (status, message.as_str()) {
        (400, EMAIL_REQUIRED) => Err(SignupError::EmailRequired),
        (400, ALREADY_REGISTERED) => Err(SignupError::AlreadyRegistered),
        _ => Err(SignupError::Server(message)),
    }
}

/// Trimmed address, or the same error the server would give for a blank one.
pub fn check_email(email: &str) -> Result<&str, SignupError> {
    let email = email.trim();
    if email.is_empty() {
        Err(SignupError::EmailRequired)
    } else {
        Ok(email)
    }
}

#[cfg(feature = "network")]
pub fn submit(url: &str, email: &str) -> Result<WaitlistEntry, SignupError> {
    let email = check_email(email)?;
    let body = serde_json::to_string(&SignupRequest { email })
        .map_err(|e| SignupError::Transport(e.to_string()))?;
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| SignupError::Transport(e.to_string()))?;
    let response = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .map_err(|e| SignupError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let text = response
        .text()
        .map_err(|e| SignupError::Transport(e.to_string()))?;
    let outcome = interpret_response(status, &text);
    match &outcome {
        Ok(entry) => tracing::info!(email = %entry.email, "joined waitlist"),
        Err(err) => tracing::warn!(status, error = %err, "waitlist signup failed"),
    }
    outcome
}

#[cfg(not(feature = "network"))]
pub fn submit(_url: &str, email: &str) -> Result<WaitlistEntry, SignupError> {
    check_email(email)?;
    Err(SignupError::Transport("built without network support".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_record_parses() {
        let body = r#"{"email":"a@b.c","createdAt":"2024-05-01T12:00:00Z"}"#;
        let entry = interpret_response(201, body).unwrap();
        assert_eq!(entry.email, "a@b.c");
        assert_eq!(entry.created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn known_client_errors() {
        assert_eq!(
            interpret_response(400, r#"{"error":"Email is required"}"#),
            Err(SignupError::EmailRequired)
        );
        assert_eq!(
            interpret_response(400, r#"{"error":"Email already registered"}"#),
            Err(SignupError::AlreadyRegistered)
        );
    }

    #[test]
    fn server_failure_keeps_message() {
        assert_eq!(
            interpret_response(500, r#"{"error":"Error processing request"}"#),
            Err(SignupError::Server("Error processing request".into()))
        );
        assert_eq!(
            interpret_response(502, "<html>bad gateway</html>"),
            Err(SignupError::Server("Error processing request".into()))
        );
    }

    #[test]
    fn malformed_created_body_is_server_error() {
        assert!(matches!(interpret_response(201, "{}"), Err(SignupError::Server(_))));
    }

    #[test]
    fn blank_email_rejected_locally() {
        assert_eq!(check_email("   "), Err(SignupError::EmailRequired));
        assert_eq!(check_email(" x@y.z "), Ok("x@y.z"));
        assert_eq!(submit("http://127.0.0.1:9/api/waitlist", ""), Err(SignupError::EmailRequired));
    }

    #[test]
    fn error_text_matches_server_wording() {
        assert_eq!(SignupError::AlreadyRegistered.to_string(), "Email already registered");
    }
}
