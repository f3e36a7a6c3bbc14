use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the customer wants the bare voice track or a mixed production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingType {
    Raw,
    Produced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProduction,
    Completed,
    Delivered,
}

impl OrderStatus {
    /// The only status an order may move to from this one.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::InProduction),
            OrderStatus::InProduction => Some(OrderStatus::Completed),
            OrderStatus::Completed => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProduction => "in_production",
            OrderStatus::Completed => "completed",
            OrderStatus::Delivered => "delivered",
        };
        f.write_str(label)
    }
}

/// Customer billing identity used for PIX charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingInfo {
    pub name: String,
    pub email: String,
    pub tax_id: String,
}

/// Represents a recording order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub recording_type: RecordingType,
    pub style_tags: Vec<String>,
    pub script: String,
    pub voice_actor_id: String,
    pub estimated_seconds: u32,
    pub credits: u32,
    pub status: OrderStatus,
    pub final_audio_url: Option<String>,
    pub billing: Option<BillingInfo>,
    pub payment_charge_id: Option<String>,
}

/// Params for creating a new order. Built from a validated form
/// (`ValidatedOrder::into_create`), so the cost always matches the estimate.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub recording_type: RecordingType,
    pub style_tags: Vec<String>,
    pub script: String,
    pub voice_actor_id: String,
    pub estimated_seconds: u32,
    pub credits: u32,
}
