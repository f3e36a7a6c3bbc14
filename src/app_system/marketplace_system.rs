use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info, instrument, warn};

use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::auth::SessionContext;
use crate::clients::{OrderClient, UserClient, VoiceActorClient};
use crate::config::AppConfig;
use crate::domain::{Order, User, VoiceActor, VoiceActorDemo};
use crate::genai::GenAiClient;
use crate::order_form::{Estimator, OrderDraft};
use crate::payment::PixClient;
use super::error::AppError;

/// Spawns one collection actor with a `<prefix>_<n>` id sequence.
fn spawn_collection<T: Entity<Id = String>>(
    name: &'static str,
    prefix: &'static str,
    buffer_size: usize,
) -> (ResourceClient<T>, tokio::task::JoinHandle<()>) {
    let counter = AtomicU64::new(1);
    let next_id = move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", prefix, id)
    };
    let (actor, client) = ResourceActor::<T>::new(name, buffer_size, next_id);
    (client, tokio::spawn(actor.run()))
}

/// The main application system that owns every collection and external client.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct MarketplaceSystem {
    pub user_client: UserClient,
    pub voice_actor_client: VoiceActorClient,
    pub order_client: OrderClient,
    /// `None` when no generation API key is configured.
    pub genai: Option<GenAiClient>,
    pub session: SessionContext,
    estimator: Estimator,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketplaceSystem {
    #[instrument(name = "marketplace_system", skip(config))]
    pub fn new(config: &AppConfig) -> Self {
        let buffer_size = config.store.buffer_size;
        let estimator = config.estimator.estimator();

        // 1. Collections
        let (users, user_handle) = spawn_collection::<User>("users", "user", buffer_size);
        let (voice_actors, voice_actor_handle) =
            spawn_collection::<VoiceActor>("voice_actors", "voice_actor", buffer_size);
        let (demos, demo_handle) = spawn_collection::<VoiceActorDemo>("voice_actor_demos", "demo", buffer_size);
        let (orders, order_handle) = spawn_collection::<Order>("orders", "order", buffer_size);

        // 2. Clients
        let user_client = UserClient::new(users);
        let voice_actor_client = VoiceActorClient::new(voice_actors, demos);
        let order_client = OrderClient::new(
            orders,
            user_client.clone(),
            voice_actor_client.clone(),
            estimator,
            PixClient::new(&config.payment),
            config.payment.credit_price_cents,
        );

        // 3. External generation provider
        let genai = match GenAiClient::new(&config.genai) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "AI generation disabled");
                None
            }
        };

        info!("Marketplace system started");
        Self {
            user_client,
            voice_actor_client,
            order_client,
            genai,
            session: SessionContext::new(),
            estimator,
            handles: vec![user_handle, voice_actor_handle, demo_handle, order_handle],
        }
    }

    /// A fresh order form bound to the configured rates.
    pub fn new_draft(&self) -> OrderDraft {
        OrderDraft::new(self.estimator)
    }

    pub fn genai(&self) -> Result<&GenAiClient, AppError> {
        self.genai
            .as_ref()
            .ok_or(AppError::GenAi(crate::genai::GenAiError::MissingCredential))
    }

    /// Collection actors stop once every client is dropped.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.voice_actor_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(AppError::TaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::domain::{OrderStatus, RecordingType, UserCreate, VoiceActorCreate};
    use crate::order_form::ScriptMode;

    fn admin() -> Session {
        Session::admin("admin_1", "admin@example.com")
    }

    #[tokio::test]
    async fn test_end_to_end_order_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
        let system = MarketplaceSystem::new(&AppConfig::default());
        assert!(system.genai().is_err());

        let user_id = system
            .user_client
            .create_user(UserCreate { name: "Ana".into(), email: "ana@example.com".into(), phone: None })
            .await?;
        let customer = Session::customer(user_id.clone(), "ana@example.com");

        let voice_id = system
            .voice_actor_client
            .create_voice_actor(
                &admin(),
                VoiceActorCreate {
                    name: "Carla".into(),
                    avatar_url: String::new(),
                    style_tags: vec!["varejo".into()],
                    online: true,
                    delivery_time: "24h".into(),
                    bio: String::new(),
                },
            )
            .await?;

        let mut orders = system.order_client.subscribe_user_orders(&customer).await?;
        assert!(orders.current().is_empty());

        let mut draft = system.new_draft();
        draft.set_voice(voice_id);
        draft.set_recording_type(RecordingType::Produced);
        draft.set_mode(ScriptMode::Vignettes);
        draft.set_vignette(0, vec!["oferta"; 70].join(" "));
        let estimate = draft.set_vignette(1, vec!["promo"; 70].join(" "));
        assert_eq!(estimate.estimated_seconds, 60);
        assert_eq!(estimate.credits, 2);

        let order_id = system.order_client.submit_order(&customer, &draft.to_form()).await?;
        let snapshot = orders.changed().await?;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, order_id);
        assert_eq!(snapshot[0].credits, 2);

        // Customers cannot start production themselves.
        assert!(system
            .order_client
            .advance_status(&customer, order_id.clone(), OrderStatus::InProduction)
            .await
            .is_err());

        for status in [OrderStatus::InProduction, OrderStatus::Completed] {
            system.order_client.advance_status(&admin(), order_id.clone(), status).await?;
        }
        system
            .order_client
            .attach_final_audio(&admin(), order_id.clone(), "https://cdn.example/final.wav".into())
            .await?;
        let delivered = system
            .order_client
            .advance_status(&customer, order_id.clone(), OrderStatus::Delivered)
            .await?;
        assert_eq!(delivered, OrderStatus::Delivered);

        orders.unsubscribe().await?;
        system.shutdown().await?;
        Ok(())
    }
}
