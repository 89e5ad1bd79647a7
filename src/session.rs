use reqwest::header::{HeaderMap, SET_COOKIE};

/// Opaque session credential captured from a login or registration response.
///
/// The server issues its session via `Set-Cookie`; we keep the name/value
/// pairs verbatim and replay them as a `Cookie` header on later requests,
/// without interpreting them.
#[derive(Debug, Clone, Default)]
pub struct SessionCredential {
    pairs: Vec<(String, String)>,
}

impl SessionCredential {
    /// Capture every `Set-Cookie` pair from a response's headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut pairs = Vec::new();

        for value in headers.get_all(SET_COOKIE) {
            if let Ok(raw) = value.to_str() {
                // Only the name=value part matters; attributes are dropped
                if let Some(pair) = raw.split(';').next() {
                    if let Some((name, value)) = pair.split_once('=') {
                        pairs.push((name.trim().to_string(), value.trim().to_string()));
                    }
                }
            }
        }

        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as a `Cookie` request header value
    pub fn header_value(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_capture_set_cookie_pairs() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("session_id=abc123; Path=/; HttpOnly"),
        );
        headers.append(SET_COOKIE, HeaderValue::from_static("extra=1"));

        let credential = SessionCredential::from_headers(&headers);
        assert!(!credential.is_empty());
        assert_eq!(credential.header_value(), "session_id=abc123; extra=1");
    }

    #[test]
    fn test_no_cookies() {
        let credential = SessionCredential::from_headers(&HeaderMap::new());
        assert!(credential.is_empty());
        assert_eq!(credential.header_value(), "");
    }
}
