use crate::error::UnknownMethod;
use crate::headers::CaseInsensitiveHeaders;
use crate::params::Params;
use std::str::FromStr;

/// HTTP Methods supported by the client
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Selector order, wrapping back to GET.
    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::Get => HttpMethod::Post,
            HttpMethod::Post => HttpMethod::Put,
            HttpMethod::Put => HttpMethod::Delete,
            HttpMethod::Delete => HttpMethod::Get,
        }
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request tabs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestTab {
    Params,
    Body,
}

/// One outgoing call, built fresh from the form on every send.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: CaseInsensitiveHeaders,
    pub params: Params,
    pub body: String,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: CaseInsensitiveHeaders::default(),
            params: Params::new(),
            body: String::new(),
        }
    }
}

/// A response as delivered by the HTTP layer, any status code included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub text: String,
}

/// Outcome of one request attempt.
///
/// `Failure` means the call raised before a response existed; 4xx/5xx replies
/// are still `Success`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseResult {
    Success(HttpResponse),
    Failure { error: String },
}

impl ResponseResult {
    pub fn failure(error: impl Into<String>) -> Self {
        ResponseResult::Failure {
            error: error.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ResponseResult::Success(response) => Some(response.status_code),
            ResponseResult::Failure { .. } => None,
        }
    }

    pub fn headers(&self) -> Option<&[(String, String)]> {
        match self {
            ResponseResult::Success(response) => Some(&response.headers),
            ResponseResult::Failure { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ResponseResult::Success(response) => Some(&response.text),
            ResponseResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResponseResult::Success(_) => None,
            ResponseResult::Failure { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_cycle_visits_every_method_once() {
        let mut method = HttpMethod::Get;
        let mut seen = Vec::new();
        for _ in 0..HttpMethod::ALL.len() {
            seen.push(method);
            method = method.next();
        }
        assert_eq!(seen, HttpMethod::ALL);
        assert_eq!(method, HttpMethod::Get);
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
        assert_eq!(" Post ".parse::<HttpMethod>(), Ok(HttpMethod::Post));
        assert_eq!(
            "PATCH".parse::<HttpMethod>(),
            Err(UnknownMethod("PATCH".to_string()))
        );
    }

    #[test]
    fn failure_exposes_only_the_error() {
        let result = ResponseResult::failure("dns error");
        assert_eq!(result.error(), Some("dns error"));
        assert_eq!(result.status_code(), None);
        assert!(result.headers().is_none());
        assert!(result.text().is_none());
    }
}
