//! Stripe payment intents over the REST API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::payments::{
    CreateIntent, PaymentGateway, PaymentIntent, PaymentIntentStatus, PaymentsError,
};

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

#[derive(Clone)]
pub struct StripeConfig {
    /// API origin, e.g. `"https://api.stripe.com"`.
    pub api_base: String,

    /// Secret key sent as the bearer credential.
    pub secret_key: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_base", &self.api_base)
            .field("secret_key", &"**redacted**")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

impl StripeClient {
    #[must_use]
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_intent(&self, intent: CreateIntent) -> Result<PaymentIntent, PaymentsError> {
        let mut form = vec![
            ("amount".to_string(), intent.amount_minor.to_string()),
            ("currency".to_string(), intent.currency),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
        ];

        form.extend(
            intent
                .metadata
                .into_iter()
                .map(|(key, value)| (format!("metadata[{key}]"), value)),
        );

        let response = self
            .http
            .post(self.url("/v1/payment_intents"))
            .bearer_auth(&self.config.secret_key)
            .form(&form)
            .send()
            .await?;

        let created: IntentResponse = parse_response(response).await?;

        let client_secret = created
            .client_secret
            .ok_or_else(|| PaymentsError::MissingClientSecret(created.id.clone()))?;

        tracing::debug!(intent = %created.id, "payment intent created");

        Ok(PaymentIntent {
            id: created.id,
            client_secret,
        })
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntentStatus, PaymentsError> {
        let response = self
            .http
            .get(self.url(&format!("/v1/payment_intents/{id}")))
            .bearer_auth(&self.config.secret_key)
            .send()
            .await?;

        let intent: IntentResponse = parse_response(response).await?;

        Ok(PaymentIntentStatus::from(intent.status.as_str()))
    }
}

async fn parse_response(response: Response) -> Result<IntentResponse, PaymentsError> {
    let status = response.status();

    if !status.is_success() {
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_else(|_| "unreadable error body".to_string());

        return Err(PaymentsError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    status: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}
