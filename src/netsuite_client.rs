use crate::config::Config;
use crate::errors::{AppError, RemoteError, ResultExt};
use crate::models::{CustomerPayload, InboundProspect};
use crate::prospect::build_customer_payload;
use crate::signer::{with_realm, OAuthSigner};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

/// Result of one customer creation attempt.
///
/// Remote failures are data, not errors: they never propagate past the
/// submitter, and the caller decides what to tell its own client.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// NetSuite accepted the record; holds the returned representation
    /// (`Null` when the body was empty).
    Created(Value),
    /// NetSuite rejected the record or could not be reached.
    Failed(RemoteError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }

    pub fn into_result(self) -> Result<Value, RemoteError> {
        match self {
            SubmitOutcome::Created(body) => Ok(body),
            SubmitOutcome::Failed(err) => Err(err),
        }
    }

    /// Structured `{success, data | error}` form used in logs.
    pub fn to_json(&self) -> Value {
        match self {
            SubmitOutcome::Created(body) => json!({ "success": true, "data": body }),
            SubmitOutcome::Failed(err) => json!({
                "success": false,
                "status": err.status,
                "error": err.detail,
            }),
        }
    }
}

/// Client for the NetSuite REST record API.
///
/// Holds only immutable state, so one instance is shared by every request.
#[derive(Clone, Debug)]
pub struct NetSuiteClient {
    client: reqwest::Client,
    endpoint: String,
    realm: String,
    signer: OAuthSigner,
}

impl NetSuiteClient {
    /// Creates a new `NetSuiteClient`.
    ///
    /// No request timeout is configured; the outbound call runs for as long as
    /// the transport allows.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create NetSuite client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: config.customer_endpoint(),
            realm: config.credentials.account_id.clone(),
            signer: OAuthSigner::new(&config.credentials),
        })
    }

    /// The customer record endpoint every submission is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Maps a prospect and creates the matching customer in NetSuite.
    ///
    /// # Returns
    ///
    /// * `Ok(SubmitOutcome)` - Whatever NetSuite answered, including failures.
    /// * `Err(AppError)` - Only for local failures (signing, serialization).
    pub async fn submit(&self, prospect: &InboundProspect) -> Result<SubmitOutcome, AppError> {
        tracing::debug!(
            "Inbound prospect: {}",
            serde_json::to_string(prospect).unwrap_or_default()
        );

        let payload = build_customer_payload(prospect);
        let outcome = self.create_customer(&payload).await?;

        match &outcome {
            SubmitOutcome::Created(body) => {
                tracing::info!("✓ Customer '{}' created in NetSuite", payload.entity_id);
                tracing::debug!("NetSuite response: {}", body);
            }
            SubmitOutcome::Failed(err) => {
                tracing::error!(
                    "Failed to create customer '{}': {}",
                    payload.entity_id,
                    outcome.to_json()
                );
                tracing::debug!("NetSuite failure detail: {}", err);
            }
        }

        Ok(outcome)
    }

    /// Posts a customer payload with a freshly signed `Authorization` header.
    pub async fn create_customer(
        &self,
        payload: &CustomerPayload,
    ) -> Result<SubmitOutcome, AppError> {
        tracing::info!("Creating customer in NetSuite: {}", self.endpoint);

        let header = self
            .signer
            .sign("POST", &self.endpoint)
            .context("Failed to sign NetSuite request")?;
        let body = serde_json::to_vec(payload).context("Failed to serialize customer payload")?;

        let response = match self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, with_realm(&header, &self.realm))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return Ok(SubmitOutcome::Failed(RemoteError {
                    status: None,
                    detail: Value::String(format!("NetSuite request failed: {}", e)),
                }))
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return Ok(SubmitOutcome::Failed(RemoteError {
                    status: Some(status.as_u16()),
                    detail: Value::String(format!("Failed to read NetSuite response: {}", e)),
                }))
            }
        };

        let body = parse_body(&text);

        if !status.is_success() {
            return Ok(SubmitOutcome::Failed(RemoteError {
                status: Some(status.as_u16()),
                detail: body,
            }));
        }

        Ok(SubmitOutcome::Created(body))
    }
}

/// NetSuite answers with JSON, but proxies and gateways in front of it may not.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
