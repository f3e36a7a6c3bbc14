use tracing::{debug, error, info, instrument, warn};
use crate::actor_framework::{ResourceClient, SnapshotFilter, Subscription};
use crate::auth::Session;
use crate::clients::{UserClient, VoiceActorClient};
use crate::domain::{BillingInfo, Order, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::order_form::{validate_billing, Estimator, OrderForm};
use crate::payment::{PixCharge, PixChargeRequest, PixClient};
use crate::pending::PendingFlag;

/// Client for the orders collection.
///
/// This client handles orchestration: it validates the customer and the
/// chosen voice before creating an order, and drives the PIX checkout.
///
/// Reads are always scoped to the caller's session.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    voice_actor_client: VoiceActorClient,
    estimator: Estimator,
    payments: PixClient,
    credit_price_cents: u64,
    /// In-flight submissions, keyed per customer form.
    submitting: PendingFlag,
    /// In-flight checkouts, keyed per order.
    paying: PendingFlag,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        voice_actor_client: VoiceActorClient,
        estimator: Estimator,
        payments: PixClient,
        credit_price_cents: u64,
    ) -> Self {
        Self {
            inner,
            user_client,
            voice_actor_client,
            estimator,
            payments,
            credit_price_cents,
            submitting: PendingFlag::new(),
            paying: PendingFlag::new(),
        }
    }

    #[instrument(skip(self, session, form), fields(user_id = %session.user_id, voice_actor_id = %form.voice_actor_id))]
    pub async fn submit_order(&self, session: &Session, form: &OrderForm) -> Result<String, OrderError> {
        let _ticket = self.submitting.try_begin(session.user_id.as_str()).ok_or_else(|| {
            warn!("Submission already in progress for this form");
            OrderError::AlreadyPending
        })?;
        info!("Processing submit_order request");

        // Step 1: Validate form fields
        let validated = form.validate(&self.estimator).map_err(|e| {
            error!(error = %e, "Form validation failed");
            OrderError::InvalidForm(e)
        })?;

        // Step 2: Validate user
        match self.user_client.get_user(session.user_id.clone()).await {
            Ok(Some(user)) => info!(user_name = %user.name, "User validation successful"),
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(session.user_id.clone()));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::InvalidUser(format!("User validation failed: {}", e)));
            }
        }

        // Step 3: Validate voice
        match self.voice_actor_client.get_voice_actor(validated.voice_actor_id.clone()).await {
            Ok(Some(actor)) => info!(voice_actor = %actor.name, "Voice validation successful"),
            Ok(None) => {
                error!("Voice actor not found");
                return Err(OrderError::InvalidVoiceActor(validated.voice_actor_id));
            }
            Err(e) => {
                error!(error = %e, "Voice validation failed");
                return Err(OrderError::InvalidVoiceActor(format!("Voice validation failed: {}", e)));
            }
        }

        // Step 4: Create order
        let estimate = validated.estimate;
        let id = self.inner.create(validated.into_create(session.user_id.as_str())).await?;
        info!(
            order_id = %id,
            seconds = estimate.estimated_seconds,
            credits = estimate.credits,
            "Order created successfully"
        );
        Ok(id)
    }

    /// Reads an order, hiding other customers' orders.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn get_order_for(&self, session: &Session, id: String) -> Result<Order, OrderError> {
        let order = self
            .inner
            .get(id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.clone()))?;
        if !session.is_admin && order.user_id != session.user_id {
            warn!(order_id = %id, "Order belongs to another user");
            return Err(OrderError::NotFound(id));
        }
        Ok(order)
    }

    /// Live list of the signed-in customer's orders.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn subscribe_user_orders(&self, session: &Session) -> Result<Subscription<Order>, OrderError> {
        debug!("Sending request");
        let user_id = session.user_id.clone();
        Ok(self
            .inner
            .subscribe(SnapshotFilter::new(move |order: &Order| order.user_id == user_id))
            .await?)
    }

    /// Live list of every order, for the admin panel.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn subscribe_all_orders(&self, session: &Session) -> Result<Subscription<Order>, OrderError> {
        if !session.is_admin {
            return Err(OrderError::Forbidden("the order queue is admin-only".to_string()));
        }
        debug!("Sending request");
        Ok(self.inner.subscribe(SnapshotFilter::all()).await?)
    }

    /// Moves an order forward. Admins drive production; customers may only
    /// confirm delivery of their own completed orders.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn advance_status(&self, session: &Session, order_id: String, to: OrderStatus) -> Result<OrderStatus, OrderError> {
        let order = self.get_order_for(session, order_id.clone()).await?;
        if !session.is_admin && to != OrderStatus::Delivered {
            error!(from = %order.status, to = %to, "Customer attempted an admin transition");
            return Err(OrderError::Forbidden(format!("customers cannot set status {}", to)));
        }

        match self.inner.perform_action(order_id, OrderAction::Advance { to }).await? {
            OrderActionResult::Advance(status) => {
                info!(status = %status, "Order status updated");
                Ok(status)
            }
            other => Err(OrderError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn attach_final_audio(&self, session: &Session, order_id: String, audio_url: String) -> Result<(), OrderError> {
        if !session.is_admin {
            return Err(OrderError::Forbidden("only administrators deliver audio".to_string()));
        }
        match self.inner.perform_action(order_id, OrderAction::AttachFinalAudio(audio_url)).await? {
            OrderActionResult::AttachFinalAudio(()) => Ok(()),
            other => Err(OrderError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    /// Creates a PIX charge for the order's credits and records it on the order.
    #[instrument(skip(self, session, billing), fields(user_id = %session.user_id))]
    pub async fn start_pix_payment(&self, session: &Session, order_id: String, billing: BillingInfo) -> Result<PixCharge, OrderError> {
        // Step 1: Check the billing form
        validate_billing(&billing).map_err(|e| {
            error!(error = %e, "Billing validation failed");
            OrderError::InvalidForm(e)
        })?;
        let _ticket = self.paying.try_begin(order_id.as_str()).ok_or_else(|| {
            warn!(order_id = %order_id, "Payment already in progress for this order");
            OrderError::AlreadyPending
        })?;

        // Step 2: Load and check the order
        let order = self.get_order_for(session, order_id.clone()).await?;
        if order.payment_charge_id.is_some() {
            return Err(OrderError::Rejected("order already has a payment charge".to_string()));
        }
        if order.status != OrderStatus::Pending {
            return Err(OrderError::Rejected(format!("cannot pay for a {} order", order.status)));
        }

        // Step 3: Create the charge
        let amount_cents = u64::from(order.credits) * self.credit_price_cents;
        let request = PixChargeRequest {
            amount_cents,
            customer: billing.clone(),
            description: Some(format!("Voice-over order {} ({} credits)", order.id, order.credits)),
        };
        let charge = self.payments.create_charge(&request).await.map_err(|e| {
            error!(error = %e, "Charge creation failed");
            OrderError::Payment(e)
        })?;

        // Step 4: Record it on the order
        let attached = self
            .inner
            .perform_action(
                order_id.clone(),
                OrderAction::AttachPayment {
                    charge_id: charge.id.clone(),
                    billing,
                },
            )
            .await;
        if let Err(e) = attached {
            error!(
                charge_id = %charge.id,
                order_id = %order_id,
                error = %e,
                "Charge created but not recorded on the order"
            );
            return Err(OrderError::Rejected(format!(
                "charge {} was created but could not be recorded: {}",
                charge.id, e
            )));
        }
        info!(charge_id = %charge.id, amount_cents, "Payment started");
        Ok(charge)
    }
}
