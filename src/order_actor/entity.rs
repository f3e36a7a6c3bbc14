use chrono::Utc;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};
use super::actions::{OrderAction, OrderActionResult};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from creation params.
    ///
    /// # Notes
    /// The order is stamped with the current time and starts as `Pending`.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.script.trim().is_empty() {
            return Err("Script is empty".to_string());
        }
        if (params.estimated_seconds == 0) != (params.credits == 0) {
            return Err("Credit cost does not match the estimated duration".to_string());
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            created_at: Utc::now(),
            recording_type: params.recording_type,
            style_tags: params.style_tags,
            script: params.script,
            voice_actor_id: params.voice_actor_id,
            estimated_seconds: params.estimated_seconds,
            credits: params.credits,
            status: OrderStatus::Pending,
            final_audio_url: None,
            billing: None,
            payment_charge_id: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Err("Orders change only through actions".to_string())
    }

    /// Handles order-specific actions.
    ///
    /// # Errors
    /// - skipping or reversing a status
    /// - attaching audio outside production
    /// - attaching a second payment, or paying a non-pending order
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, String> {
        match action {
            OrderAction::Advance { to } => {
                if self.status.next() != Some(to) {
                    return Err(format!("Cannot move order from {} to {}", self.status, to));
                }
                self.status = to;
                Ok(OrderActionResult::Advance(to))
            }
            OrderAction::AttachFinalAudio(url) => match self.status {
                OrderStatus::InProduction | OrderStatus::Completed => {
                    self.final_audio_url = Some(url);
                    Ok(OrderActionResult::AttachFinalAudio(()))
                }
                status => Err(format!("Cannot attach audio to a {} order", status)),
            },
            OrderAction::AttachPayment { charge_id, billing } => {
                if self.status != OrderStatus::Pending {
                    return Err(format!("Cannot pay for a {} order", self.status));
                }
                if self.payment_charge_id.is_some() {
                    return Err("Order already has a payment charge".to_string());
                }
                self.payment_charge_id = Some(charge_id);
                self.billing = Some(billing);
                Ok(OrderActionResult::AttachPayment(()))
            }
        }
    }
}
