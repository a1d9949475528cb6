use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::events::{AppEvent, EventBus};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One part of a multipart payload (product and testimonial create/update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam between the client and the wire, so the whole orchestration layer can
/// be exercised against a scripted in-memory backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    api_root: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Self {
        HttpTransport {
            http: reqwest::Client::new(),
            api_root: config.api_root(),
        }
    }

    fn build_form(fields: Vec<FormField>) -> Result<multipart::Form, ApiError> {
        let mut form = multipart::Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    let part = multipart::Part::bytes(data)
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(|e| ApiError::Transport(e.to_string()))?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.api_root, request.path);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => builder.multipart(Self::build_form(fields)?),
        };

        let response = builder.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        // Some endpoints answer with an empty body; treat that as null.
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        Ok(ApiResponse { status, body })
    }
}

/// HTTP client wrapper for the storefront backend.
///
/// Attaches the session's bearer token to every request. On a 401 it clears
/// all three session entries and publishes `AppEvent::Unauthorized` before
/// surfacing the failure; there is no retry policy.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    events: EventBus,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>, events: EventBus) -> Self {
        ApiClient {
            transport,
            session,
            events,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ApiError> {
        debug!("{} {}", method.as_str(), path);

        let request = ApiRequest {
            method,
            path: path.to_string(),
            bearer: self.session.token(),
            body,
        };

        let response = self.transport.send(request).await?;

        if response.status == 401 {
            warn!("Unauthorized response from {}; tearing down session", path);
            self.session.clear();
            self.events.publish(AppEvent::Unauthorized);
            return Err(ApiError::Unauthorized {
                message: backend_message(&response.body),
            });
        }

        if !response.is_success() {
            return Err(ApiError::Backend {
                status: response.status,
                message: backend_message(&response.body),
            });
        }

        Ok(response.body)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.request(Method::Get, path, RequestBody::Empty).await?;
        decode(body)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let payload = serde_json::to_value(body)?;
        let body = self
            .request(Method::Post, path, RequestBody::Json(payload))
            .await?;
        decode(body)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let payload = serde_json::to_value(body)?;
        let body = self
            .request(Method::Put, path, RequestBody::Json(payload))
            .await?;
        decode(body)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self
            .request(Method::Delete, path, RequestBody::Empty)
            .await?;
        decode(body)
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<FormField>,
    ) -> Result<T, ApiError> {
        let body = self
            .request(Method::Post, path, RequestBody::Multipart(fields))
            .await?;
        decode(body)
    }

    pub async fn put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<FormField>,
    ) -> Result<T, ApiError> {
        let body = self
            .request(Method::Put, path, RequestBody::Multipart(fields))
            .await?;
        decode(body)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(ApiError::Decode)
}

fn backend_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| "Request failed".to_string())
}
