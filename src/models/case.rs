use reqwest::Method;
use serde_json::Value;

use crate::session::SessionCredential;

/// One scripted API call with its expectations.
///
/// Created immediately before each invocation and consumed by
/// `RunContext::run_case`.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub method: Method,
    /// Relative to the API base, or absolute when it starts with `http`
    pub path: String,
    pub body: Option<Value>,
    pub credential: Option<SessionCredential>,
    /// Expected business code carried in the response envelope (0 = success)
    pub expected_code: i64,
    /// Expected transport status
    pub expected_status: u16,
}

impl TestCase {
    pub fn new(name: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: None,
            credential: None,
            expected_code: 0,
            expected_status: 200,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a captured credential; `None` leaves the request anonymous,
    /// so callers can pass session lookups through directly
    pub fn with_credential(mut self, credential: Option<SessionCredential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn expect_code(mut self, code: i64) -> Self {
        self.expected_code = code;
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let case = TestCase::new("1.1 register", Method::POST, "/auth/register");
        assert_eq!(case.expected_code, 0);
        assert_eq!(case.expected_status, 200);
        assert!(case.body.is_none());
        assert!(case.credential.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let case = TestCase::new("1.7 unauthenticated", Method::GET, "/auth/me")
            .expect_code(401)
            .expect_status(401);
        assert_eq!(case.expected_code, 401);
        assert_eq!(case.expected_status, 401);
    }
}
