use crate::api::models::{PicklistValues, QuoteRecord, RateCardRequest, RateRow};
use crate::core::services::{PicklistSource, RateLookup, RecordSource, SolutionLookup};
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("ratecard-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct RateCardClient {
    client: Client,
    pub base_url: String,
    pub api_key: Option<String>,
}

impl RateCardClient {
    // Create base client with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(RateCardClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        })
    }

    pub fn with_api_key(base_url: String, api_key: String) -> Result<Self, ApiError> {
        let mut client = RateCardClient::new(base_url)?;
        client.api_key = Some(api_key);
        Ok(client)
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        request
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                401 | 403 => Err(ApiError::Unauthorized {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    server_message: error_text,
                }),
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                    endpoint: endpoint.to_string(),
                }),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                    endpoint: endpoint.to_string(),
                }
            } else {
                ApiError::Http {
                    status: 0,
                    endpoint: endpoint.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })
    }
}

#[async_trait]
impl RecordSource for RateCardClient {
    async fn fetch_quote(&self, quote_id: &str) -> Result<QuoteRecord, ApiError> {
        let endpoint = format!("/api/quotes/{}", quote_id);
        let request = self.build_request(Method::GET, &endpoint);
        let response = self.send(request, &endpoint).await?;
        self.handle_response(response, &endpoint).await
    }
}

#[async_trait]
impl PicklistSource for RateCardClient {
    async fn fetch_picklists(
        &self,
        object: &str,
        record_type: &str,
    ) -> Result<PicklistValues, ApiError> {
        let endpoint = format!("/api/picklists/{}/{}", object, record_type);
        let request = self.build_request(Method::GET, &endpoint);
        let response = self.send(request, &endpoint).await?;
        self.handle_response(response, &endpoint).await
    }
}

#[async_trait]
impl SolutionLookup for RateCardClient {
    async fn fetch_solution_types(
        &self,
        xb_service: &str,
        destination_country: &str,
    ) -> Result<Vec<String>, ApiError> {
        let endpoint = "/api/solution-types";
        let request = self
            .build_request(Method::GET, endpoint)
            .query(&[("service", xb_service), ("destination", destination_country)]);
        let response = self.send(request, endpoint).await?;
        self.handle_response(response, endpoint).await
    }
}

#[async_trait]
impl RateLookup for RateCardClient {
    async fn fetch_rate_cards(&self, request: &RateCardRequest) -> Result<Vec<RateRow>, ApiError> {
        let endpoint = "/api/rate-cards/search";
        let builder = self.build_request(Method::POST, endpoint).json(request);
        let response = self.send(builder, endpoint).await?;
        self.handle_response(response, endpoint).await
    }
}
