use crate::domain::{BillingInfo, OrderStatus};

/// Custom actions for Order entities.
///
/// Orders are never patched directly; every mutation after creation is one of these.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order one step forward.
    ///
    /// # Errors
    /// Fails unless `to` is the immediate successor of the current status.
    Advance { to: OrderStatus },
    /// Attaches the final recording.
    AttachFinalAudio(String),
    /// Records the PIX charge created for this order.
    AttachPayment { charge_id: String, billing: BillingInfo },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Advance(OrderStatus),
    AttachFinalAudio(()),
    AttachPayment(()),
}
