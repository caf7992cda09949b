// src/api.rs
// Thin typed client for the judge platform REST API, plus the response
// envelopes the server wraps its payloads in.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ServerConfig;
use crate::errors::ApiError;
use crate::models::{Playlist, Problem, User};

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(server: &ServerConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(server.request_timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: server.base_url.trim_end_matches('/').to_string(),
            token: server.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = self.request(Method::GET, path).send().await?;
        Self::decode(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!("POST {}", path);
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::decode(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!("PUT {}", path);
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::decode(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("DELETE {}", path);
        let response = self.request(Method::DELETE, path).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        // Error bodies are {"message": "..."} when the server produced them
        // itself, anything at all when a proxy did.
        let message = match response.json::<ErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: String,
}

// Response envelopes.

#[derive(Deserialize, Debug)]
pub struct ProblemListResponse {
    #[serde(default)]
    pub problems: Vec<Problem>,
}

#[derive(Deserialize, Debug)]
pub struct ProblemResponse {
    pub problem: Problem,
}

#[derive(Deserialize, Debug)]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

#[derive(Deserialize, Debug)]
pub struct PlaylistResponse {
    pub playlist: Playlist,
}

#[derive(Deserialize, Debug)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Deserialize, Debug)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_list_envelope_tolerates_missing_field() {
        let response: ProblemListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.problems.is_empty());
    }

    #[test]
    fn error_body_reads_message_or_error_key() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(body.message, "nope");
        let body: ErrorBody = serde_json::from_str(r#"{"error": "still nope"}"#).unwrap();
        assert_eq!(body.message, "still nope");
    }
}
