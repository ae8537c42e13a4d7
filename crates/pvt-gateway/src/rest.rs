//! HTTP adapters for a hosted backend
//!
//! - [`RestRowStore`]: PostgREST-style table access (`/rest/v1/<table>`)
//! - [`EdgeFunctionClient`]: JSON functions (`/functions/v1/<name>`) for
//!   translations and example sentences
//!
//! The table is expected to have `user_id`, `verb`, `meanings` (text array) and
//! a nullable integer `schema_version`, with a unique constraint on
//! `(user_id, verb)`.

use crate::error::GatewayError;
use crate::traits::{
    ExampleRequest, ExampleService, RowStore, TranslationRequest, TranslationService,
};
use async_trait::async_trait;
use pvt_matrix::{SchemaVersion, StoredRow};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_ERROR_BODY: usize = 512;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach the hosted backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Project base URL, e.g. `https://abc.example.co`
    pub base_url: String,
    /// Public API key sent as `apikey`
    pub api_key: String,
    /// User access token; the API key is used as bearer when absent
    #[serde(default)]
    pub access_token: Option<String>,
}

impl ServiceEndpoint {
    /// Create an endpoint
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: None,
        }
    }

    /// With a user access token
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        builder.header("apikey", &self.api_key).bearer_auth(bearer)
    }

    fn validate(&self) -> Result<(), GatewayError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(GatewayError::Config(format!(
                "base url must be http(s), got '{}'",
                self.base_url
            )));
        }
        if self.api_key.is_empty() {
            return Err(GatewayError::Config("api key is empty".to_string()));
        }
        Ok(())
    }
}

fn build_client() -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(|e| GatewayError::Config(e.to_string()))
}

async fn check(service: &'static str, response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    Err(GatewayError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// Row store speaking PostgREST conventions
#[derive(Debug, Clone)]
pub struct RestRowStore {
    client: Client,
    endpoint: ServiceEndpoint,
    table: String,
}

impl RestRowStore {
    const SERVICE: &'static str = "row store";

    /// Create a store for `table`
    ///
    /// # Errors
    /// `GatewayError::Config` for a malformed endpoint or client setup failure
    pub fn new(endpoint: ServiceEndpoint, table: impl Into<String>) -> Result<Self, GatewayError> {
        endpoint.validate()?;
        Ok(Self {
            client: build_client()?,
            endpoint,
            table: table.into(),
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let url = self.endpoint.url(&format!("rest/v1/{}", self.table));
        self.endpoint.authorize(self.client.request(method, url))
    }
}

#[async_trait]
impl RowStore for RestRowStore {
    async fn select(&self, user_id: &str) -> Result<Vec<StoredRow>, GatewayError> {
        tracing::debug!("Selecting rows for user {}", user_id);
        let response = self
            .request(Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq(user_id)),
                ("order", "verb.asc".to_string()),
            ])
            .send()
            .await?;
        check(Self::SERVICE, response)
            .await?
            .json::<Vec<StoredRow>>()
            .await
            .map_err(|e| GatewayError::Decode {
                service: Self::SERVICE,
                reason: e.to_string(),
            })
    }

    async fn insert(&self, rows: &[StoredRow]) -> Result<(), GatewayError> {
        if rows.is_empty() {
            return Ok(());
        }
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        match check(Self::SERVICE, response).await {
            Err(GatewayError::Status { status: 409, .. }) => Err(GatewayError::Conflict {
                verb: rows[0].verb.clone(),
            }),
            other => other.map(|_| ()),
        }
    }

    async fn upsert(&self, row: &StoredRow) -> Result<(), GatewayError> {
        let response = self
            .request(Method::POST)
            .query(&[("on_conflict", "user_id,verb")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[row])
            .send()
            .await?;
        check(Self::SERVICE, response).await.map(|_| ())
    }

    async fn update_meanings(
        &self,
        user_id: &str,
        verb: &str,
        meanings: &[String],
        version: SchemaVersion,
    ) -> Result<(), GatewayError> {
        let body = serde_json::json!({
            "meanings": meanings,
            "schema_version": version,
        });
        let response = self
            .request(Method::PATCH)
            .query(&[("user_id", eq(user_id)), ("verb", eq(verb))])
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await?;
        check(Self::SERVICE, response).await.map(|_| ())
    }

    async fn delete(&self, user_id: &str, verb: &str) -> Result<(), GatewayError> {
        let response = self
            .request(Method::DELETE)
            .query(&[("user_id", eq(user_id)), ("verb", eq(verb))])
            .send()
            .await?;
        check(Self::SERVICE, response).await.map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(default)]
    translation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExampleResponse {
    #[serde(default)]
    example: Option<String>,
}

/// Client for hosted JSON functions
#[derive(Debug, Clone)]
pub struct EdgeFunctionClient {
    client: Client,
    endpoint: ServiceEndpoint,
    translate_function: String,
    example_function: String,
}

impl EdgeFunctionClient {
    /// Default translation function name
    pub const TRANSLATE_FUNCTION: &'static str = "translate-phrasal-verb";
    /// Default example function name
    pub const EXAMPLE_FUNCTION: &'static str = "generate-example";

    /// Create a client with the default function names
    ///
    /// # Errors
    /// `GatewayError::Config` for a malformed endpoint or client setup failure
    pub fn new(endpoint: ServiceEndpoint) -> Result<Self, GatewayError> {
        endpoint.validate()?;
        Ok(Self {
            client: build_client()?,
            endpoint,
            translate_function: Self::TRANSLATE_FUNCTION.to_string(),
            example_function: Self::EXAMPLE_FUNCTION.to_string(),
        })
    }

    /// Override function names
    #[must_use]
    pub fn with_functions(
        mut self,
        translate: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        self.translate_function = translate.into();
        self.example_function = example.into();
        self
    }

    async fn invoke<B, R>(&self, service: &'static str, name: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let url = self.endpoint.url(&format!("functions/v1/{name}"));
        let response = self
            .endpoint
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await?;
        check(service, response)
            .await?
            .json::<R>()
            .await
            .map_err(|e| GatewayError::Decode {
                service,
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl TranslationService for EdgeFunctionClient {
    async fn translate(&self, request: TranslationRequest) -> Result<String, GatewayError> {
        let response: TranslationResponse = self
            .invoke("translate", &self.translate_function, &request)
            .await?;
        Ok(response.translation.unwrap_or_default())
    }
}

#[async_trait]
impl ExampleService for EdgeFunctionClient {
    async fn example(&self, request: ExampleRequest) -> Result<String, GatewayError> {
        let response: ExampleResponse = self
            .invoke("example", &self.example_function, &request)
            .await?;
        Ok(response.example.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_join_cleanly() {
        let endpoint = ServiceEndpoint::new("https://abc.example.co/", "key");
        assert_eq!(
            endpoint.url("rest/v1/phrasal_verbs"),
            "https://abc.example.co/rest/v1/phrasal_verbs"
        );
    }

    #[test]
    fn endpoint_validation() {
        assert!(ServiceEndpoint::new("ftp://x", "key").validate().is_err());
        assert!(ServiceEndpoint::new("https://x", "").validate().is_err());
        assert!(ServiceEndpoint::new("https://x", "key").validate().is_ok());
    }

    #[test]
    fn constructors_reject_bad_config() {
        assert!(matches!(
            RestRowStore::new(ServiceEndpoint::new("nope", "key"), "phrasal_verbs"),
            Err(GatewayError::Config(_))
        ));
        assert!(EdgeFunctionClient::new(ServiceEndpoint::new("https://x", "key")).is_ok());
    }

    #[test]
    fn filters_use_eq_operator() {
        assert_eq!(eq("Look"), "eq.Look");
    }

    #[test]
    fn translation_response_tolerates_missing_field() {
        let resp: TranslationResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.translation.is_none());
        let resp: ExampleResponse = serde_json::from_str(r#"{"example":"A|B"}"#).unwrap();
        assert_eq!(resp.example.as_deref(), Some("A|B"));
    }
}
