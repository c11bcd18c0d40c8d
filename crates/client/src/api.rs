//! REST API client for the Taskdeck HTTP endpoints.
//!
//! Wraps the `/api/auth`, `/api/todos` and `/api/projects` resources using
//! [`reqwest`], unwrapping the `{"data": ...}` envelope on success and the
//! `{"error": ...}` envelope on failure.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use taskdeck_core::project::{CreateProject, Project};
use taskdeck_core::session::SessionInfo;
use taskdeck_core::signup::{LoginForm, SignupForm};
use taskdeck_core::todo::{CreateTodo, Todo, TodoWithProject, UpdateTodo};
use taskdeck_core::types::DbId;

/// HTTP client for a single Taskdeck server.
#[derive(Clone)]
pub struct TaskdeckApi {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

/// Errors from the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The server's `error` message, or the raw body if it had none.
        message: String,
    },

    /// A form was rejected locally, before any request was made.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status of a server-side failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

impl TaskdeckApi {
    /// Create a new, unauthenticated client.
    ///
    /// * `api_url` - Server base URL, e.g. `http://localhost:3000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach (or clear) the bearer token sent with resource requests.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // ---- auth ----

    pub async fn sign_in(&self, form: &LoginForm) -> Result<SessionInfo, ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(form)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn sign_up(&self, form: &SignupForm) -> Result<SessionInfo, ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/signup"))
            .json(form)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- todos ----

    /// List the caller's todos, newest first, with their projects.
    pub async fn list_todos(&self) -> Result<Vec<TodoWithProject>, ApiError> {
        let response = self.authed(self.client.get(self.url("/api/todos"))).send().await?;
        Self::parse_data(response).await
    }

    pub async fn create_todo(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        let response = self
            .authed(self.client.post(self.url("/api/todos")))
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// Apply a partial update. `None` means no row matched the id for
    /// this caller.
    pub async fn update_todo(
        &self,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, ApiError> {
        let response = self
            .authed(self.client.patch(self.url(&format!("/api/todos/{id}"))))
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn delete_todo(&self, id: DbId) -> Result<(), ApiError> {
        let response = self
            .authed(self.client.delete(self.url(&format!("/api/todos/{id}"))))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- projects ----

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/api/projects")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn create_project(&self, input: &CreateProject) -> Result<Project, ApiError> {
        let response = self
            .authed(self.client.post(self.url("/api/projects")))
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Ensure the response has a success status code. On failure the
    /// server's `error` message is extracted so callers can show it as is.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Parse a successful `{"data": ...}` body into the expected type.
    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<DataEnvelope<T>>().await?.data)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
