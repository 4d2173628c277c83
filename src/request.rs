use crate::error::TransportError;
use crate::params::query_pairs;
use crate::types::{HttpMethod, HttpResponse, RequestSpec};
use reqwest::header::HeaderMap;

/// Anything that can perform one HTTP call for a [`RequestSpec`].
///
/// Implementations block; the dispatcher always calls them off the UI thread.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, spec: &RequestSpec) -> Result<HttpResponse, TransportError>;
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Transport backed by reqwest's blocking client. Timeouts and redirects are
/// whatever reqwest defaults to.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    /// Client identifying itself as this application.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self::with_client(client))
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, spec: &RequestSpec) -> Result<HttpResponse, TransportError> {
        let url = reqwest::Url::parse(&spec.url).map_err(|e| TransportError::InvalidUrl {
            url: spec.url.clone(),
            reason: e.to_string(),
        })?;
        let mut builder = self.client.request(spec.method.into(), url);

        // Add headers
        for (key, value) in spec.headers.iter() {
            builder = builder.header(key, value);
        }

        let query = query_pairs(&spec.params);
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        if !spec.body.is_empty() {
            builder = builder.body(spec.body.clone());
        }

        let response = builder.send()?;
        let status_code = response.status().as_u16();
        let headers = flatten_headers(response.headers());
        let text = response.text()?;

        Ok(HttpResponse {
            status_code,
            headers,
            text,
        })
    }
}

/// One entry per header name; repeated fields are joined with `", "`.
fn flatten_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .keys()
        .map(|name| {
            let value = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, SET_COOKIE};

    #[test]
    fn repeated_header_fields_are_joined() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));

        let flat = flatten_headers(&headers);
        assert_eq!(flat.len(), 2);
        assert!(flat.contains(&("content-type".to_string(), "text/plain".to_string())));
        assert!(flat.contains(&("set-cookie".to_string(), "a=1, b=2".to_string())));
    }

    #[test]
    fn unparsable_urls_fail_before_sending() {
        let transport = ReqwestTransport::new();
        for url in ["", "not a url", "ftp//missing-colon"] {
            let spec = RequestSpec::new(HttpMethod::Get, url);
            match transport.execute(&spec) {
                Err(TransportError::InvalidUrl { url: rejected, .. }) => assert_eq!(rejected, url),
                other => panic!("{url:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn methods_map_onto_reqwest() {
        let mapped: Vec<reqwest::Method> =
            HttpMethod::ALL.iter().map(|m| (*m).into()).collect();
        assert_eq!(
            mapped,
            vec![
                reqwest::Method::GET,
                reqwest::Method::POST,
                reqwest::Method::PUT,
                reqwest::Method::DELETE,
            ]
        );
    }
}
