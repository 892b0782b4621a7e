use bytes::Bytes;

/// A fully buffered HTTP response as seen by the retry state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status:  u16,
    pub headers: Vec<(String, String)>,
    pub body:    Bytes,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive lookup of the first header named `name`.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Leading part of the body for error messages.
    pub fn body_snippet(&self, max_bytes: usize) -> String {
        let end = self.body.len().min(max_bytes);
        String::from_utf8_lossy(&self.body[..end]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = HttpResponse::new(200).header("ETag", "\"v1\"").header("Retry-After", "3");
        assert_eq!(response.header_value("etag"), Some("\"v1\""));
        assert_eq!(response.header_value("RETRY-AFTER"), Some("3"));
        assert_eq!(response.header_value("content-type"), None);
    }

    #[test]
    fn test_body_snippet_truncates() {
        let response = HttpResponse::new(404).body("x".repeat(500));
        assert_eq!(response.body_snippet(200).len(), 200);
        assert_eq!(HttpResponse::new(404).body("short").body_snippet(200), "short");
    }
}
