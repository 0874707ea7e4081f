//! HTTP backend for the Lotus REST API
//!
//! [`SpaBackend`] is the seam between the checkout engine and the
//! network; [`NetworkBackend`] is the reqwest implementation. Tests
//! drive the engine through in-memory implementations of the trait.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    AppointmentRef, Guest, InvoiceEnsured, InvoiceGenerated, InvoiceNumber, Offer, PaymentCreated,
    PaymentRequest, Product, Sale, SaleCreate,
};
use shared::ApiResponse;

use crate::artifact::{ArtifactEndpoint, ArtifactProbe};
use crate::config::ClientConfig;
use crate::error::{CheckoutError, CheckoutResult};

/// Backend operations the checkout flow depends on
#[async_trait]
pub trait SpaBackend: Send + Sync {
    async fn guest_by_code(&self, code: &str) -> CheckoutResult<Guest>;
    async fn ensure_invoice(&self, guest_id: &str) -> CheckoutResult<InvoiceEnsured>;
    async fn invoice_number(&self, invoice_id: &str) -> CheckoutResult<InvoiceNumber>;
    async fn generate_invoice(&self, sale_id: &str) -> CheckoutResult<InvoiceGenerated>;
    async fn guest_appointments(&self, guest_id: &str) -> CheckoutResult<Vec<AppointmentRef>>;
    async fn offers(&self) -> CheckoutResult<Vec<Offer>>;
    async fn products(&self) -> CheckoutResult<Vec<Product>>;
    async fn create_sale(&self, sale: &SaleCreate) -> CheckoutResult<Sale>;
    async fn create_payment(&self, payment: &PaymentRequest) -> CheckoutResult<PaymentCreated>;
    async fn invoice_artifact(
        &self,
        endpoint: ArtifactEndpoint,
        invoice_id: &str,
    ) -> CheckoutResult<ArtifactProbe>;
}

/// Network backend over reqwest
#[derive(Debug, Clone)]
pub struct NetworkBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkBackend {
    pub fn new(config: &ClientConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> CheckoutResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut req = self.client.get(&url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> CheckoutResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut req = self.client.post(&url).json(body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> CheckoutResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut req = self.client.post(&url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> CheckoutResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            // Prefer the structured error message when the body carries one
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or(text);
            return Err(match status {
                StatusCode::NOT_FOUND => CheckoutError::NotFound(message),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    CheckoutError::Validation(message)
                }
                _ => CheckoutError::BackendUnavailable(format!("{}: {}", status, message)),
            });
        }
        let envelope: ApiResponse<T> = response.json().await?;
        envelope
            .into_result()
            .map_err(CheckoutError::BackendUnavailable)
    }
}

#[async_trait]
impl SpaBackend for NetworkBackend {
    async fn guest_by_code(&self, code: &str) -> CheckoutResult<Guest> {
        self.get(&format!("api/guests/code/{}", code)).await
    }

    async fn ensure_invoice(&self, guest_id: &str) -> CheckoutResult<InvoiceEnsured> {
        self.post_empty(&format!("api/invoices/get-or-create/{}", guest_id))
            .await
    }

    async fn invoice_number(&self, invoice_id: &str) -> CheckoutResult<InvoiceNumber> {
        self.get(&format!("api/invoices/{}", invoice_id)).await
    }

    async fn generate_invoice(&self, sale_id: &str) -> CheckoutResult<InvoiceGenerated> {
        self.post_empty(&format!("api/invoices/generate/{}", sale_id))
            .await
    }

    async fn guest_appointments(&self, guest_id: &str) -> CheckoutResult<Vec<AppointmentRef>> {
        self.get(&format!("api/guests/{}/appointments", guest_id))
            .await
    }

    async fn offers(&self) -> CheckoutResult<Vec<Offer>> {
        self.get("api/offers-discounts/").await
    }

    async fn products(&self) -> CheckoutResult<Vec<Product>> {
        self.get("api/products/").await
    }

    async fn create_sale(&self, sale: &SaleCreate) -> CheckoutResult<Sale> {
        self.post("api/sales/", sale).await
    }

    async fn create_payment(&self, payment: &PaymentRequest) -> CheckoutResult<PaymentCreated> {
        self.post("api/payments/", payment).await
    }

    async fn invoice_artifact(
        &self,
        endpoint: ArtifactEndpoint,
        invoice_id: &str,
    ) -> CheckoutResult<ArtifactProbe> {
        let url = format!("{}/{}", self.base_url, endpoint.path(invoice_id));
        let mut req = self.client.get(&url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| format!("{} returned {}", endpoint.label(), status));
            return Ok(ArtifactProbe::Error { message });
        }

        // A JSON body on an artifact endpoint is a structured error,
        // not a document
        if content_type.contains("application/json") {
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| format!("{} returned an unexpected JSON body", endpoint.label()));
            return Ok(ArtifactProbe::Error { message });
        }

        let bytes = response.bytes().await?.to_vec();
        Ok(ArtifactProbe::Document {
            content_type,
            bytes,
        })
    }
}
