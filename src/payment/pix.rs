use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use crate::config::{ChargeFieldNames, PaymentConfig};
use crate::domain::BillingInfo;
use super::error::PaymentError;

pub const DEFAULT_DESCRIPTION: &str = "Voice-over recording order";

#[derive(Debug, Clone, PartialEq)]
pub struct PixChargeRequest {
    /// Minor currency units.
    pub amount_cents: u64,
    pub customer: BillingInfo,
    pub description: Option<String>,
}

/// A created charge, ready to be shown to the payer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixCharge {
    pub id: String,
    pub qr_code_image_url: String,
    /// "Copia e Cola" payment code.
    pub qr_code_text: String,
}

#[derive(Clone)]
pub struct PixClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    fields: ChargeFieldNames,
}

impl PixClient {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            http: Client::new(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.clone(),
            fields: config.fields.clone(),
        }
    }

    #[instrument(skip(self, request), fields(amount_cents = request.amount_cents))]
    pub async fn create_charge(&self, request: &PixChargeRequest) -> Result<PixCharge, PaymentError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            error!("Payment API key is missing");
            PaymentError::MissingCredential
        })?;
        if request.amount_cents == 0 {
            return Err(PaymentError::InvalidAmount);
        }

        let description = request.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);
        let body = json!({
            "customer": {
                "name": request.customer.name,
                "email": request.customer.email,
                "tax_id": request.customer.tax_id,
            },
            "items": [{
                "description": description,
                "amount": request.amount_cents,
                "quantity": 1,
            }]
        });

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            error!(status = status.as_u16(), "Payment provider rejected the charge");
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| PaymentError::MalformedResponse(e.to_string()))?;
        let charge = PixCharge {
            id: charge_id(&value, &self.fields.id)?,
            qr_code_image_url: required_text(&value, &self.fields.qr_code_image_url)?,
            qr_code_text: required_text(&value, &self.fields.qr_code_text)?,
        };
        info!(charge_id = %charge.id, "PIX charge created");
        Ok(charge)
    }
}

fn required_text(value: &Value, key: &str) -> Result<String, PaymentError> {
    match value.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(PaymentError::MissingField(key.to_string())),
    }
}

/// Providers send ids either as strings or as integers.
fn charge_id(value: &Value, key: &str) -> Result<String, PaymentError> {
    match value.get(key) {
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => required_text(value, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PixChargeRequest {
        PixChargeRequest {
            amount_cents: 2000,
            customer: BillingInfo {
                name: "Ana Souza".to_string(),
                email: "ana@example.com".to_string(),
                tax_id: "12345678909".to_string(),
            },
            description: None,
        }
    }

    fn client_for(url: &str, api_key: Option<&str>) -> PixClient {
        PixClient::new(&PaymentConfig {
            api_key: api_key.map(str::to_string),
            base_url: format!("{}/charges", url),
            ..PaymentConfig::default()
        })
    }

    #[tokio::test]
    async fn test_create_charge_succeeds() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/charges")
            .match_header("authorization", "Bearer sk_test")
            .match_body(mockito::Matcher::PartialJson(json!({
                "customer": { "tax_id": "12345678909" },
                "items": [{ "description": DEFAULT_DESCRIPTION, "amount": 2000, "quantity": 1 }]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "ch_123",
                    "qr_code_image_url": "https://pix.example/qr/ch_123.png",
                    "qr_code_text": "00020126580014br.gov.bcb.pix"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let charge = client_for(&server.url(), Some("sk_test")).create_charge(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(charge.id, "ch_123");
        assert_eq!(charge.qr_code_text, "00020126580014br.gov.bcb.pix");
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/charges").expect(0).create_async().await;

        let result = client_for(&server.url(), None).create_charge(&request()).await;

        mock.assert_async().await;
        assert_eq!(result, Err(PaymentError::MissingCredential));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/charges")
            .with_status(401)
            .with_body(r#"{"error": "invalid key"}"#)
            .create_async()
            .await;

        let err = client_for(&server.url(), Some("bad")).create_charge(&request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_missing_copy_paste_code_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/charges")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "id": "ch_1", "qr_code_image_url": "https://pix.example/qr.png" }).to_string())
            .create_async()
            .await;

        let result = client_for(&server.url(), Some("sk_test")).create_charge(&request()).await;
        assert_eq!(result, Err(PaymentError::MissingField("qr_code_text".to_string())));
    }

    #[tokio::test]
    async fn test_custom_field_names() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/charges")
            .with_status(200)
            .with_body(json!({ "charge_id": 77, "qr_image": "https://q", "brcode": "000201" }).to_string())
            .create_async()
            .await;

        let client = PixClient::new(&PaymentConfig {
            api_key: Some("sk_test".to_string()),
            base_url: format!("{}/charges", server.url()),
            fields: ChargeFieldNames {
                id: "charge_id".to_string(),
                qr_code_image_url: "qr_image".to_string(),
                qr_code_text: "brcode".to_string(),
            },
            ..PaymentConfig::default()
        });
        let charge = client.create_charge(&request()).await.unwrap();
        assert_eq!(charge.id, "77");
        assert_eq!(charge.qr_code_text, "000201");
    }

    #[tokio::test]
    async fn test_numeric_qr_code_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/charges")
            .with_status(200)
            .with_body(json!({ "id": 12, "qr_code_image_url": "https://q", "qr_code_text": 20126 }).to_string())
            .create_async()
            .await;

        let result = client_for(&server.url(), Some("sk_test")).create_charge(&request()).await;
        assert_eq!(result, Err(PaymentError::MissingField("qr_code_text".to_string())));
    }

    #[tokio::test]
    async fn test_zero_amount_is_rejected() {
        let mut req = request();
        req.amount_cents = 0;
        let result = client_for("http://127.0.0.1:9", Some("sk_test")).create_charge(&req).await;
        assert_eq!(result, Err(PaymentError::InvalidAmount));
    }
}
