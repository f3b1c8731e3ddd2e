//! Scoped HTTP plumbing shared by the endpoint wrappers

use gm_client_api::ForwardedCookies;
use gm_rest_api_contract::ApiEnvelope;
use reqwest::header::COOKIE;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{RestClientError, RestClientResult};

/// Success policy shared by every wrapper: statuses in [200, 399).
pub(crate) fn is_success_status(status: StatusCode) -> bool {
    (200..399).contains(&status.as_u16())
}

/// HTTP client restricted to one backend resource prefix.
///
/// Holds the forwarded-cookie context captured at construction; individual
/// operations opt into forwarding it, mirroring which backend routes are
/// cookie-authenticated during server-side rendering.
#[derive(Debug, Clone)]
pub(crate) struct ScopedClient {
    http: HttpClient,
    base: String,
    forwarded: Option<ForwardedCookies>,
}

impl ScopedClient {
    pub(crate) fn new(
        http: HttpClient,
        base_url: &Url,
        prefix: &str,
        forwarded: Option<ForwardedCookies>,
    ) -> Self {
        let base = format!("{}{}", base_url.as_str().trim_end_matches('/'), prefix);
        Self {
            http,
            base,
            forwarded,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> RestClientResult<ApiEnvelope<T>> {
        self.request(Method::GET, path, None::<&()>, None).await
    }

    /// GET that forwards the `Cookie` header: the per-call override wins,
    /// then the context captured at construction.
    pub(crate) async fn get_forwarding<T: DeserializeOwned>(
        &self,
        path: &str,
        forwarded: Option<&ForwardedCookies>,
    ) -> RestClientResult<ApiEnvelope<T>> {
        let cookies = forwarded.or(self.forwarded.as_ref());
        self.request(Method::GET, path, None::<&()>, cookies).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> RestClientResult<ApiEnvelope<T>> {
        self.request(Method::POST, path, Some(body), None).await
    }

    /// POST whose response body is irrelevant beyond the status check
    pub(crate) async fn post_unit(&self, path: &str) -> RestClientResult<()> {
        let response = self.send(Method::POST, path, None::<&()>, None).await?;
        self.check_status(response).await.map(|_| ())
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> RestClientResult<ApiEnvelope<T>> {
        self.request(Method::DELETE, path, None::<&()>, None).await
    }

    async fn request<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        cookies: Option<&ForwardedCookies>,
    ) -> RestClientResult<ApiEnvelope<T>> {
        let response = self.send(method, path, body, cookies).await?;
        let text = self.check_status(response).await?;
        serde_json::from_str(&text).map_err(RestClientError::from)
    }

    async fn send<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        cookies: Option<&ForwardedCookies>,
    ) -> RestClientResult<Response> {
        let url = Url::parse(&format!("{}{}", self.base, path))?;

        let mut request = self.http.request(method, url);

        if let Some(cookies) = cookies {
            request = request.header(COOKIE, cookies.as_header_value());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Returns the body text on success; on a non-success status, decodes
    /// the error envelope for its message when one parses.
    async fn check_status(&self, response: Response) -> RestClientResult<String> {
        let status = response.status();
        let text = response.text().await?;

        if is_success_status(status) {
            return Ok(text);
        }

        match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&text) {
            Ok(envelope) => Err(RestClientError::Status {
                status,
                message: envelope.message,
            }),
            Err(_) => Err(RestClientError::UnexpectedResponse(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_span_200_to_398() {
        assert!(!is_success_status(StatusCode::from_u16(199).unwrap()));
        assert!(is_success_status(StatusCode::OK));
        assert!(is_success_status(StatusCode::FOUND));
        assert!(is_success_status(StatusCode::from_u16(398).unwrap()));
        assert!(!is_success_status(StatusCode::from_u16(399).unwrap()));
        assert!(!is_success_status(StatusCode::UNAUTHORIZED));
        assert!(!is_success_status(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn scoped_base_joins_prefix_onto_root() {
        let http = HttpClient::new();
        let base_url = Url::parse("http://localhost:8000").unwrap();
        let scoped = ScopedClient::new(http, &base_url, "/repository", None);

        assert_eq!(scoped.base, "http://localhost:8000/repository");
    }
}
