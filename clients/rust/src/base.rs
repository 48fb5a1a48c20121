use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub(crate) struct BaseClient {
    address: String,
    client: Client,
}

#[derive(Debug, Error)]
pub enum APIError {
    #[error("Network error. Check the connection to the server.")]
    Network,
    #[error("The server returned a malformed response")]
    MalformedResponse,
    #[error("{0}")]
    NotFound(String),
    /// Non 2xx response. `message` is taken from the response body when
    /// there was one.
    #[error("{}", status_message(.status, .message))]
    UnexpectedStatusCode {
        status: StatusCode,
        message: Option<String>,
    },
    /// Rejected before anything was sent
    #[error("{0}")]
    InvalidInput(String),
}

fn status_message(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("HTTP Error: {}", status.as_u16()),
    }
}

impl APIError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::UnexpectedStatusCode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Replaces a 404 response with a `NotFound` carrying `message`
    pub(crate) fn not_found_as(self, message: &str) -> Self {
        match self {
            Self::UnexpectedStatusCode { status, .. } if status == StatusCode::NOT_FOUND => {
                Self::NotFound(message.to_string())
            }
            e => e,
        }
    }

    /// Uses `message` for a response with the given status and an empty body
    pub(crate) fn with_fallback(self, expected: StatusCode, message: &str) -> Self {
        match self {
            Self::UnexpectedStatusCode {
                status,
                message: None,
            } if status == expected => Self::UnexpectedStatusCode {
                status,
                message: Some(message.to_string()),
            },
            e => e,
        }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

/// The `message` of a json error body, otherwise the body text itself
fn error_body_message(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["message"].as_str().map(str::trim).map(String::from))
        .filter(|message| !message.is_empty());
    Some(message.unwrap_or_else(|| body.to_string()))
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address: address.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn get_client(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        debug!("{} {}", method, url);
        self.client.request(method, &url)
    }

    async fn check_status_code(&self, res: Response) -> Result<Response, APIError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        let body = body.trim();
        warn!("Request failed with status {}: {}", status, body);
        Err(APIError::UnexpectedStatusCode {
            status,
            message: error_body_message(body),
        })
    }

    async fn get_json_response<T: DeserializeOwned>(&self, res: Response) -> APIResponse<T> {
        let is_json = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        let text = res.text().await.map_err(|_| APIError::Network)?;

        // Bodies that carry no json are treated as `null`, which is a valid
        // value for the `()`, `Option` and `serde_json::Value` responses
        let value = if is_json && !text.trim().is_empty() {
            serde_json::from_str::<serde_json::Value>(&text)
                .map_err(|_| APIError::MalformedResponse)?
        } else {
            serde_json::Value::Null
        };
        serde_json::from_value(value).map_err(|e| {
            warn!("Unable to parse api response: {}", e);
            APIError::MalformedResponse
        })
    }

    async fn handle_api_response<T: DeserializeOwned>(&self, res: Response) -> APIResponse<T> {
        let res = self.check_status_code(res).await?;
        self.get_json_response(res).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> APIResponse<T> {
        let res = match builder.send().await {
            Ok(res) => res,
            Err(e) => {
                warn!("Request could not be sent: {}", e);
                return Err(APIError::Network);
            }
        };
        self.handle_api_response(res).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: String) -> APIResponse<T> {
        self.send(self.get_client(Method::GET, &path)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: String) -> APIResponse<T> {
        self.send(self.get_client(Method::DELETE, &path)).await
    }

    pub async fn put<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::PUT, &path).json(&body))
            .await
    }

    pub async fn post<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::POST, &path).json(&body))
            .await
    }

    pub async fn post_multipart<T: DeserializeOwned, Q: Serialize>(
        &self,
        form: Form,
        path: String,
        query: &Q,
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::POST, &path)
                .query(query)
                .multipart(form),
        )
        .await
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        form: Form,
        path: String,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::PUT, &path).multipart(form))
            .await
    }
}
