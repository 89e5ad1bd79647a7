use std::collections::HashMap;

use serde_json::Value;
use time::OffsetDateTime;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{LoginRequest, RegisterRequest, RoomFixture, RunStats, TestCase, UserFixture};
use crate::report::{ReportBuilder, RunSummary};
use crate::services::api_client::{ApiClient, ApiResponse, Payload};
use crate::session::SessionCredential;

/// Run-scoped state threaded through every scenario: the HTTP client,
/// counters, the report buffer, fixture registries, and the map from
/// logical identity name to captured session credential
pub struct RunContext {
    pub config: Config,
    pub client: ApiClient,
    pub stats: RunStats,
    pub report: ReportBuilder,
    pub sessions: HashMap<String, SessionCredential>,
    pub users: Vec<UserFixture>,
    pub rooms: Vec<RoomFixture>,
    base_url: String,
}

impl RunContext {
    pub fn new(config: Config) -> AppResult<Self> {
        let client = ApiClient::new(&config)?;
        let base_url = config.api_base_url();
        Ok(Self {
            config,
            client,
            stats: RunStats::new(),
            report: ReportBuilder::new(),
            sessions: HashMap::new(),
            users: Vec::new(),
            rooms: Vec::new(),
            base_url,
        })
    }

    pub fn session(&self, label: &str) -> Option<&SessionCredential> {
        self.sessions.get(label)
    }

    /// Clone a captured credential for attaching to a case
    pub fn credential(&self, label: &str) -> Option<SessionCredential> {
        self.sessions.get(label).cloned()
    }

    /// Execute one test case: count it, call the server, validate the
    /// outcome, and append the report fragment.
    ///
    /// Returns the decoded payload on a pass (`Value::Null` for non-JSON
    /// bodies) and `None` on any failure or transport error, so callers can
    /// chain dependent steps only when this one succeeded.
    pub async fn run_case(&mut self, case: TestCase) -> Option<Value> {
        self.stats.begin_case();
        tracing::info!(name = %case.name, "Running test");

        self.report.push(format!("\n#### {}\n", case.name));
        self.report
            .push(format!("**Request**: `{} {}`\n", case.method, case.path));
        if let Some(body) = &case.body {
            self.report.push(format!(
                "**Request body**:\n```json\n{}\n```\n",
                pretty_json(body)
            ));
        }

        let response = match self.client.execute(&case).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(name = %case.name, error = %e, "Test errored");
                self.report.push(format!("**Result**: ❌ error - {}\n", e));
                self.stats.record_failure(&case.name, &e.to_string());
                return None;
            }
        };

        self.report
            .push(format!("**HTTP status**: {}\n", response.status));
        match &response.payload {
            Payload::Json(value) => self.report.push(format!(
                "**Response**:\n```json\n{}\n```\n",
                pretty_json(value)
            )),
            Payload::Text(text) => self.report.push(format!("**Response**: {}\n", text)),
        }

        match validate(&case, &response) {
            Ok(()) => {
                tracing::info!(name = %case.name, "Test passed");
                self.report.push("**Result**: ✅ passed\n");
                self.stats.record_pass();
                match response.payload {
                    Payload::Json(value) => Some(value),
                    Payload::Text(_) => Some(Value::Null),
                }
            }
            Err(failure) => {
                tracing::error!(name = %case.name, reason = %failure.reason, "Test failed");
                self.report
                    .push(format!("**Result**: ❌ failed - {}\n", failure.reason));
                if let Some(detail) = &failure.detail {
                    self.report.push(format!("**Error message**: {}\n", detail));
                }
                self.stats.record_failure(&case.name, &failure.summary);
                None
            }
        }
    }

    /// Register a fresh identity out of band (not a counted case), storing
    /// its fixture and session cookie under the given label
    pub async fn register_identity(
        &mut self,
        label: &str,
        phone_prefix: &str,
        nickname: &str,
        password: &str,
    ) -> Option<UserFixture> {
        let request = RegisterRequest {
            phone: fresh_phone(phone_prefix),
            nickname: nickname.to_string(),
            password: password.to_string(),
        };

        match self.client.authenticate("/auth/register", &request).await {
            Ok((response, credential)) if response.status == 200 => {
                let id = response
                    .json()
                    .and_then(|v| v.pointer("/data/user/id"))
                    .and_then(Value::as_i64)?;
                let fixture = UserFixture {
                    id,
                    phone: request.phone,
                    nickname: request.nickname,
                    password: request.password,
                };
                tracing::info!(label, user_id = id, "Registered test identity");
                self.sessions.insert(label.to_string(), credential);
                self.users.push(fixture.clone());
                Some(fixture)
            }
            Ok((response, _)) => {
                tracing::warn!(label, status = response.status, "Registration rejected");
                None
            }
            Err(e) => {
                tracing::warn!(label, error = %e, "Registration failed");
                None
            }
        }
    }

    /// Log an existing identity in again, replacing the stored credential.
    /// The admin flow relies on this to pick up a role change.
    pub async fn login_identity(&mut self, label: &str, phone: &str, password: &str) -> bool {
        let request = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        };

        match self.client.authenticate("/auth/login", &request).await {
            Ok((response, credential)) if response.status == 200 => {
                tracing::info!(label, "Captured session credential");
                self.sessions.insert(label.to_string(), credential);
                true
            }
            Ok((response, _)) => {
                tracing::warn!(label, status = response.status, "Login rejected");
                false
            }
            Err(e) => {
                tracing::warn!(label, error = %e, "Login failed");
                false
            }
        }
    }

    fn summary(&self) -> RunSummary<'_> {
        RunSummary {
            base_url: &self.base_url,
            stats: &self.stats,
            users: &self.users,
            rooms: &self.rooms,
        }
    }

    pub fn render_report(&self) -> String {
        self.report.render(&self.summary())
    }

    /// Flush the report to the configured path; errors are the caller's to
    /// log since they must not change the exit status
    pub fn write_report(&self) -> std::io::Result<()> {
        self.report.write(&self.config.report_path, &self.summary())
    }
}

/// Timestamp-derived phone number so reruns register fresh users
pub fn fresh_phone(prefix: &str) -> String {
    let stamp = OffsetDateTime::now_utc().unix_timestamp().rem_euclid(100_000_000);
    format!("{}{:08}", prefix, stamp)
}

struct ValidationFailure {
    /// Full description for the report fragment
    reason: String,
    /// Short form for the consolidated failure list
    summary: String,
    /// Server-provided message, when the envelope carried one
    detail: Option<String>,
}

/// Transport status first, then the business code; the first mismatch wins
fn validate(case: &TestCase, response: &ApiResponse) -> Result<(), ValidationFailure> {
    if response.status != case.expected_status {
        return Err(ValidationFailure {
            reason: format!(
                "HTTP status mismatch (expected {}, got {})",
                case.expected_status, response.status
            ),
            summary: "HTTP status mismatch".to_string(),
            detail: None,
        });
    }

    if let Payload::Json(value) = &response.payload {
        if let Some(code) = value.get("code").and_then(Value::as_i64) {
            if code != case.expected_code {
                let message = value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string();
                let reason = format!(
                    "business code mismatch (expected {}, got {})",
                    case.expected_code, code
                );
                let summary = if message.is_empty() {
                    reason.clone()
                } else {
                    message.clone()
                };
                return Err(ValidationFailure {
                    reason,
                    summary,
                    detail: (!message.is_empty()).then_some(message),
                });
            }
        }
    }

    Ok(())
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    fn case() -> TestCase {
        TestCase::new("case", Method::GET, "/auth/me")
    }

    fn json_response(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status,
            payload: Payload::Json(body),
        }
    }

    #[test]
    fn test_validate_passes_on_matching_expectations() {
        let response = json_response(200, json!({"code": 0, "message": "ok"}));
        assert!(validate(&case(), &response).is_ok());
    }

    #[test]
    fn test_status_mismatch_short_circuits_before_code_check() {
        // wrong status AND wrong code: only the status mismatch is reported
        let response = json_response(500, json!({"code": 1001, "message": "boom"}));
        let failure = validate(&case(), &response).unwrap_err();
        assert!(failure.reason.contains("HTTP status mismatch"));
        assert!(!failure.reason.contains("business code"));
        assert!(failure.detail.is_none());
    }

    #[test]
    fn test_business_code_mismatch_carries_server_message() {
        let response = json_response(200, json!({"code": 1001, "message": "phone taken"}));
        let failure = validate(&case(), &response).unwrap_err();
        assert!(failure.reason.contains("expected 0, got 1001"));
        assert_eq!(failure.summary, "phone taken");
        assert_eq!(failure.detail.as_deref(), Some("phone taken"));
    }

    #[test]
    fn test_missing_code_field_is_not_checked() {
        let response = json_response(200, json!({"pong": true}));
        assert!(validate(&case(), &response).is_ok());
    }

    #[test]
    fn test_text_payload_only_checks_status() {
        let response = ApiResponse {
            status: 200,
            payload: Payload::Text("pong".to_string()),
        };
        assert!(validate(&case(), &response).is_ok());
    }

    #[test]
    fn test_expected_error_codes_pass() {
        let response = json_response(401, json!({"code": 401, "message": "unauthorized"}));
        let case = case().expect_code(401).expect_status(401);
        assert!(validate(&case, &response).is_ok());
    }

    #[test]
    fn test_fresh_phone_shape() {
        let phone = fresh_phone("138");
        assert_eq!(phone.len(), 11);
        assert!(phone.starts_with("138"));
        assert!(phone.chars().all(|c| c.is_ascii_digit()));
    }
}
