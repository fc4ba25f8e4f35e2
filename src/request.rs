//! Incoming HTTP request type.

use http::{HeaderMap, Method};

/// An incoming request as seen by an edge handler.
///
/// The edge routes are all `GET`, so the body is never read.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
}

impl Request {
    pub(crate) fn new(method: Method, path: String, headers: HeaderMap) -> Self {
        Self { method, path, headers }
    }

    pub(crate) fn from_parts(parts: http::request::Parts) -> Self {
        Self::new(parts.method, parts.uri.path().to_owned(), parts.headers)
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Header lookup; names are case-insensitive. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// The `Host` header, used to derive the public origin when none is configured.
    pub fn host(&self) -> Option<&str> {
        self.header(http::header::HOST.as_str())
    }
}

#[cfg(test)]
impl Request {
    /// `GET {path}` with the given headers, for handler tests.
    pub(crate) fn get(path: &str, headers: &[(&'static str, &str)]) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            if let Ok(value) = value.parse() {
                map.insert(*name, value);
            }
        }
        Self::new(Method::GET, path.to_owned(), map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = Request::get("/robots.txt", &[("host", "app.example.com")]);
        assert_eq!(req.header("HOST"), Some("app.example.com"));
        assert_eq!(req.host(), Some("app.example.com"));
        assert_eq!(req.header("x-missing"), None);
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/robots.txt");
    }
}
