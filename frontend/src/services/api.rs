use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{ApiErrorBody, AuthResponse, Container, ListResult, PasswordAuthRequest, User};
use thiserror::Error;

use crate::services::auth_store::AuthStore;
use crate::services::config::AppConfig;
use crate::services::logging::Logger;

/// Relations hydrated with every container query: plants with their
/// species, and the owning user
pub const CONTAINER_EXPAND: &str = "plants.species,user";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to serialize request: {0}")]
    Serialization(String),
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("You need to sign in first")]
    Unauthenticated,
}

impl ApiError {
    /// Build a server error from a non-2xx body, preferring the backend's own message
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|parsed| parsed.message)
            .filter(|message| !message.is_empty())
            .or_else(|| Some(body.trim().to_string()).filter(|text| !text.is_empty()))
            .unwrap_or_else(|| "Unknown error".to_string());

        ApiError::Server { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status: 401, .. } | ApiError::Unauthenticated)
    }
}

/// Client for the hosted record backend.
///
/// Owns the [`AuthStore`]; sign-in, refresh and logout all go through it so
/// that auth listeners fire for each of them.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
    auth: AuthStore,
}

impl ApiClient {
    pub fn new(config: &AppConfig, auth: AuthStore) -> Self {
        Self::with_base_url(config.api_url.clone(), auth)
    }

    /// Create a client with a custom base URL
    pub fn with_base_url(base_url: String, auth: AuthStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn auth_store(&self) -> &AuthStore {
        &self.auth
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign in with email/username and password, storing the session
    pub async fn auth_with_password(&self, identity: &str, password: &str) -> Result<User, ApiError> {
        let url = self.collection_url("users", "auth-with-password");
        let request = PasswordAuthRequest {
            identity: identity.to_string(),
            password: password.to_string(),
        };

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let auth: AuthResponse = self.read_json(response).await?;
        self.auth.save(auth.token, Some(auth.record.clone()));
        Ok(auth.record)
    }

    /// Exchange the stored token for a fresh one.
    ///
    /// A 401 means the session is gone, so the store is cleared.
    pub async fn auth_refresh(&self) -> Result<User, ApiError> {
        let token = self.authorization()?;
        let url = self.collection_url("users", "auth-refresh");

        let result = match Request::post(&url).header("Authorization", &token).send().await {
            Ok(response) => self.read_json::<AuthResponse>(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        };

        match result {
            Ok(auth) => {
                self.auth.save(auth.token, Some(auth.record.clone()));
                Ok(auth.record)
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.auth.clear();
                }
                Err(e)
            }
        }
    }

    /// Forget the session locally
    pub fn logout(&self) {
        self.auth.clear();
    }

    /// One page of the signed-in user's containers, plants and species expanded
    pub async fn list_containers(&self, page: u32, per_page: u32) -> Result<ListResult<Container>, ApiError> {
        let token = self.authorization()?;
        let url = self.containers_list_url(page, per_page);

        let response = Request::get(&url)
            .header("Authorization", &token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.read_json(response).await
    }

    /// A single container with plants and species expanded
    pub async fn get_container(&self, id: &str) -> Result<Container, ApiError> {
        let token = self.authorization()?;
        let url = format!(
            "{}/api/collections/containers/records/{}?expand={}",
            self.base_url, id, CONTAINER_EXPAND
        );

        let response = Request::get(&url)
            .header("Authorization", &token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.read_json(response).await
    }

    fn collection_url(&self, collection: &str, action: &str) -> String {
        format!("{}/api/collections/{}/{}", self.base_url, collection, action)
    }

    fn containers_list_url(&self, page: u32, per_page: u32) -> String {
        format!(
            "{}/api/collections/containers/records?page={}&perPage={}&sort=name&expand={}",
            self.base_url,
            page.max(1),
            per_page,
            CONTAINER_EXPAND
        )
    }

    fn authorization(&self) -> Result<String, ApiError> {
        let token = self.auth.token();
        if token.is_empty() {
            Err(ApiError::Unauthenticated)
        } else {
            Ok(token)
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let url = response.url();
        let result = if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_response_body(status, &body))
        };

        if let Err(e) = &result {
            Logger::warn_with_component("api", &format!("{} failed: {}", url, e));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            &AppConfig::default().with_api_url("http://127.0.0.1:8090"),
            AuthStore::new(),
        )
    }

    #[test]
    fn test_urls() {
        let client = client();
        assert_eq!(
            client.collection_url("users", "auth-with-password"),
            "http://127.0.0.1:8090/api/collections/users/auth-with-password"
        );
        assert_eq!(
            client.containers_list_url(2, 50),
            "http://127.0.0.1:8090/api/collections/containers/records?page=2&perPage=50&sort=name&expand=plants.species,user"
        );
        assert_eq!(
            client.containers_list_url(0, 10),
            "http://127.0.0.1:8090/api/collections/containers/records?page=1&perPage=10&sort=name&expand=plants.species,user"
        );
    }

    #[test]
    fn test_container_expand_covers_every_hydrated_relation() {
        let relations: Vec<&str> = CONTAINER_EXPAND.split(',').collect();
        assert_eq!(relations, vec!["plants.species", "user"]);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::with_base_url("https://api.gardendiary.app/".to_string(), AuthStore::new());
        assert_eq!(client.base_url(), "https://api.gardendiary.app");
    }

    #[test]
    fn test_authorization_requires_token() {
        let client = client();
        assert_eq!(client.authorization(), Err(ApiError::Unauthenticated));

        client.auth_store().save("jwt", None);
        assert_eq!(client.authorization(), Ok("jwt".to_string()));
    }

    #[test]
    fn test_logout_clears_store() {
        let client = client();
        client.auth_store().save("jwt", None);
        client.logout();
        assert!(client.auth_store().token().is_empty());
    }

    #[test]
    fn test_error_from_backend_envelope() {
        let error = ApiError::from_response_body(
            400,
            r#"{"code":400,"message":"Failed to authenticate.","data":{}}"#,
        );
        assert_eq!(
            error,
            ApiError::Server { status: 400, message: "Failed to authenticate.".to_string() }
        );
        assert_eq!(error.to_string(), "Server error 400: Failed to authenticate.");
    }

    #[test]
    fn test_error_from_plain_or_empty_body() {
        assert_eq!(
            ApiError::from_response_body(502, "Bad Gateway\n"),
            ApiError::Server { status: 502, message: "Bad Gateway".to_string() }
        );
        assert_eq!(
            ApiError::from_response_body(500, ""),
            ApiError::Server { status: 500, message: "Unknown error".to_string() }
        );
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::Unauthenticated.is_unauthorized());
        assert!(ApiError::from_response_body(401, "").is_unauthorized());
        assert!(!ApiError::from_response_body(403, "").is_unauthorized());
        assert!(!ApiError::Network("offline".to_string()).is_unauthorized());
    }
}
