use crate::{
    config::{normalize_prefix, ClientConfig},
    responses::EMPTY_OBJECT_SENTINEL,
    ClientError, Failure, Result,
};
use std::{
    collections::HashMap,
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use futures::future::BoxFuture;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// Issues requests against `<base_url><prefix><endpoint>` and resolves every
/// call to a decoded payload or a [`ClientError`].
///
/// Holds no per-call state; clones share the transport.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    prefix: String,
    transport: Arc<dyn HttpClient>,
}

/// The transport a [`Client`] sends through.
pub trait HttpClient: Send + Sync {
    fn request(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, std::result::Result<HttpResponse, Failure>>;
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

static HEADER_CONTENT_TYPE: &str = "Content-Type";
static CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::DELETE => reqwest::Method::DELETE,
        }
    }
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    inner: reqwest::Client,
}

impl ReqwestHttpClient {
    /// With `include_credentials`, cookies set by the backend are stored and
    /// sent back on later requests.
    pub fn new(include_credentials: bool) -> std::result::Result<Self, Failure> {
        let inner = reqwest::Client::builder()
            .cookie_store(include_credentials)
            .build()?;
        Ok(Self { inner })
    }

}

impl HttpClient for ReqwestHttpClient {
    fn request(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, std::result::Result<HttpResponse, Failure>> {
        Box::pin(async move {
            let url = url::Url::parse(&request.url)?;
            let mut builder = self.inner.request(request.method.into(), url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        })
    }
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestHttpClient::new(config.include_credentials)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport<H>(config: &ClientConfig, transport: H) -> Self
    where
        H: HttpClient + 'static,
    {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            prefix: normalize_prefix(&config.path_prefix),
            transport: Arc::new(transport),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = normalize_prefix(prefix);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request::<T, ()>(HttpMethod::GET, endpoint, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::POST, endpoint, Some(payload)).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::PUT, endpoint, Some(payload)).await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::PATCH, endpoint, Some(payload)).await
    }

    /// An empty 2xx body decodes as the empty object `{}`.
    pub async fn delete<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request::<T, ()>(HttpMethod::DELETE, endpoint, None).await
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, self.prefix, endpoint)
    }

    async fn request<T, B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url_for(endpoint);

        let outcome = match build_request(method, url.clone(), payload) {
            Ok(request) => {
                debug!(method = %method, url = %url, "issuing request");
                let started = Instant::now();
                match self.transport.request(request).await {
                    Ok(response) => {
                        handle_response::<T>(method, &url, started.elapsed(), response)
                    }
                    Err(failure) => Err(ClientError::from_failure(failure)),
                }
            }
            Err(failure) => Err(ClientError::from_failure(failure)),
        };

        if let Err(err) = &outcome {
            warn!(
                method = %method,
                url = %url,
                status = err.status(),
                error = err.message(),
                "request failed"
            );
        }
        outcome
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

fn build_request<B>(
    method: HttpMethod,
    url: String,
    payload: Option<&B>,
) -> std::result::Result<HttpRequest, Failure>
where
    B: Serialize + ?Sized,
{
    let body = payload
        .map(|payload| serde_json::to_string(payload))
        .transpose()
        .map_err(Failure::Serialize)?;

    let mut headers = HashMap::new();
    headers.insert(HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string());

    Ok(HttpRequest {
        method,
        url,
        headers,
        body,
    })
}

fn handle_response<T>(
    method: HttpMethod,
    url: &str,
    elapsed: Duration,
    response: HttpResponse,
) -> Result<T>
where
    T: DeserializeOwned,
{
    let status_code = response.status;
    debug!(
        method = %method,
        url = %url,
        status = status_code,
        elapsed_ms = elapsed.as_millis() as u64,
        "received response"
    );

    if (200..300).contains(&status_code) {
        let body = if method == HttpMethod::DELETE && response.body.trim().is_empty() {
            EMPTY_OBJECT_SENTINEL
        } else {
            response.body.as_str()
        };
        serde_json::from_str::<T>(body).map_err(|err| ClientError::decode(status_code, err))
    } else {
        Err(ClientError::from_status(
            status_code,
            &response.status_text,
            &response.body,
        ))
    }
}
