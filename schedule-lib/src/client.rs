//! Main ScheduleClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue, REFERER};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, RequestBuilder, Response};
use url::Url;

use crate::error::{ApiError, Error};

/// Header Flask-WTF reads the CSRF token from.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Page the admin requests are sent from. Over HTTPS the CSRF check also
/// requires a same-origin `Referer`.
const ADMIN_PAGE_PATH: &str = "/admin/schedule";

/// The client for the admin schedule API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use schedule_lib::ScheduleClient;
///
/// let client = ScheduleClient::builder()
///     .url("http://localhost:5000")
///     .session_cookie("session=...")
///     .build()?;
///
/// let items = client.items_for_day(0).await?;
/// ```
#[derive(Clone)]
pub struct ScheduleClient {
    inner: Arc<ScheduleClientInner>,
}

struct ScheduleClientInner {
    base_url: String,
    referer: Option<HeaderValue>,
    session_cookie: Option<String>,
    csrf_token: Option<String>,
    http_client: Client,
    timeout: Option<Duration>,
}

fn join_path(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

impl ScheduleClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ScheduleClientBuilder<Missing> {
        ScheduleClientBuilder::new()
    }

    /// Returns the base URL of the site.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Full URL for an API path.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        join_path(&self.inner.base_url, path)
    }

    /// Starts a request carrying the session cookie, CSRF token, referer and
    /// timeout.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(referer) = &self.inner.referer {
            headers.insert(REFERER, referer.clone());
        }
        if let Some(cookie) = &self.inner.session_cookie
            && let Ok(value) = HeaderValue::from_str(cookie)
        {
            headers.insert(COOKIE, value);
        }
        if let Some(token) = &self.inner.csrf_token
            && let Ok(value) = HeaderValue::from_str(token)
        {
            headers.insert(CSRF_HEADER, value);
        }

        let mut request = self.inner.http_client.request(method, url).headers(headers);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    /// Sends a request, mapping transport failures and error statuses.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status.is_redirection() {
            Err(ApiError::LoginRequired)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_body(status.as_u16(), &body))
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ScheduleClient`].
///
/// Uses the typestate pattern so the site URL must be set before `build`.
pub struct ScheduleClientBuilder<U> {
    url: U,
    session_cookie: Option<String>,
    csrf_token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ScheduleClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            session_cookie: None,
            csrf_token: None,
            timeout: None,
            connect_timeout: None,
        }
    }

    /// Sets the site URL, e.g. `http://localhost:5000`.
    pub fn url(self, url: impl Into<String>) -> ScheduleClientBuilder<Set<String>> {
        ScheduleClientBuilder {
            url: Set(url.into()),
            session_cookie: self.session_cookie,
            csrf_token: self.csrf_token,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

impl Default for ScheduleClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ScheduleClientBuilder<U> {
    /// Sets the `Cookie` header value of a logged-in admin session.
    pub fn session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Sets the CSRF token sent as `X-CSRFToken` with every request.
    ///
    /// The site rejects deletes without it.
    pub fn csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

impl ScheduleClientBuilder<Set<String>> {
    /// Builds the [`ScheduleClient`].
    pub fn build(self) -> Result<ScheduleClient, Error> {
        let base_url = self.url.0;
        let parsed = Url::parse(&base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!("{}: scheme must be http or https", base_url)));
        }

        // Redirects are not followed so an expired session surfaces as
        // `ApiError::LoginRequired`.
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http_client = builder.build().map_err(ApiError::from)?;
        let referer = HeaderValue::from_str(&join_path(&base_url, ADMIN_PAGE_PATH)).ok();

        Ok(ScheduleClient {
            inner: Arc::new(ScheduleClientInner {
                base_url,
                referer,
                session_cookie: self.session_cookie,
                csrf_token: self.csrf_token,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_urls() {
        let result = ScheduleClient::builder().url("not a url").build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));

        let result = ScheduleClient::builder().url("ftp://example.com").build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = ScheduleClient::builder()
            .url("http://localhost:5000/")
            .build()
            .expect("valid url");
        assert_eq!(
            client.endpoint("/admin/schedule/data"),
            "http://localhost:5000/admin/schedule/data"
        );
    }

    #[test]
    fn test_requests_carry_session_and_csrf_headers() {
        let client = ScheduleClient::builder()
            .url("https://gym.example")
            .session_cookie("session=abc")
            .csrf_token("token-123")
            .build()
            .expect("valid url");

        let request = client
            .request(Method::DELETE, &client.endpoint("/admin/schedule/item/7"))
            .build()
            .expect("valid request");
        let headers = request.headers();

        assert_eq!(request.url().path(), "/admin/schedule/item/7");
        assert_eq!(headers.get("x-csrftoken").and_then(|v| v.to_str().ok()), Some("token-123"));
        assert_eq!(headers.get(COOKIE).and_then(|v| v.to_str().ok()), Some("session=abc"));
        assert_eq!(
            headers.get(REFERER).and_then(|v| v.to_str().ok()),
            Some("https://gym.example/admin/schedule")
        );
    }

    #[test]
    fn test_no_csrf_header_without_token() {
        let client = ScheduleClient::builder()
            .url("http://localhost:5000")
            .build()
            .expect("valid url");

        let request = client
            .request(Method::GET, &client.endpoint("/admin/schedule/data"))
            .build()
            .expect("valid request");

        assert!(request.headers().get(CSRF_HEADER).is_none());
        assert!(request.headers().get(COOKIE).is_none());
    }
}
