mod actor_framework;
mod app_system;
mod auth;
mod clients;
mod config;
mod domain;
mod genai;
mod order_actor;
mod order_form;
mod payment;
mod pending;
mod playback;
mod user_actor;
mod voice_actor;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, warn, Instrument};
use crate::app_system::{setup_tracing, AppError, MarketplaceSystem};
use crate::auth::{AuthGuard, Route, Session};
use crate::config::AppConfig;
use crate::domain::{
    BillingInfo, OrderStatus, RecordingType, UserCreate, UserPatch, VoiceActorCreate, VoiceActorDemoCreate,
    VoiceActorPatch,
};
use crate::order_form::ScriptMode;
use crate::playback::PlaybackCoordinator;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_tracing();

    let config = AppConfig::load()?;
    info!("Starting voice-over marketplace");

    let system = MarketplaceSystem::new(&config);
    let mut guard = AuthGuard::new(system.session.clone(), Route::NewOrder);
    info!(outcome = ?guard.on_auth_change(), "Guard before sign-in");

    // Signup
    let span = tracing::info_span!("signup");
    let user_id = async {
        info!("Creating customer account");
        system
            .user_client
            .create_user(UserCreate {
                name: "Ana Souza".to_string(),
                email: "ana@example.com".to_string(),
                phone: Some("+55 11 99999-0000".to_string()),
            })
            .await
    }
    .instrument(span)
    .await?;
    let customer = Session::customer(user_id.clone(), "ana@example.com");
    system
        .user_client
        .update_user(
            user_id.clone(),
            UserPatch {
                name: Some("Ana Paula Souza".to_string()),
                ..UserPatch::default()
            },
        )
        .await?;
    let users = system.user_client.list_users().await?;
    info!(users = users.len(), "Accounts registered");
    let admin = Session::admin("admin_1", "ops@example.com");

    // Catalogue
    let voice_actor_id = system
        .voice_actor_client
        .create_voice_actor(
            &admin,
            VoiceActorCreate {
                name: "Carla Mendes".to_string(),
                avatar_url: "https://cdn.example/carla.png".to_string(),
                style_tags: vec!["varejo".to_string(), "institucional".to_string()],
                online: true,
                delivery_time: "24h".to_string(),
                bio: "Locutora comercial".to_string(),
            },
        )
        .await?;
    let demo_id = system
        .voice_actor_client
        .add_demo(
            &admin,
            VoiceActorDemoCreate {
                voice_actor_id: voice_actor_id.clone(),
                title: "Varejo".to_string(),
                description: "Spot de promoção".to_string(),
                audio_url: "https://cdn.example/carla-varejo.mp3".to_string(),
            },
        )
        .await?;
    system
        .voice_actor_client
        .update_voice_actor(
            &admin,
            voice_actor_id.clone(),
            VoiceActorPatch {
                delivery_time: Some("12h".to_string()),
                ..VoiceActorPatch::default()
            },
        )
        .await?;
    let catalogue = system.voice_actor_client.subscribe_voice_actors().await?;
    let everyone = system.voice_actor_client.list_voice_actors().await?;
    let retail_online = system.voice_actor_client.browse(Some("varejo".to_string()), true).await?;
    info!(
        live = catalogue.current().len(),
        total = everyone.len(),
        retail_online = retail_online.len(),
        "Catalogue loaded"
    );
    catalogue.unsubscribe().await.map_err(crate::voice_actor::VoiceActorError::from)?;

    let demos = system.voice_actor_client.list_demos(voice_actor_id.clone()).await?;
    info!(demos = demos.len(), "Demos for the selected voice");
    let mut playback = PlaybackCoordinator::new();
    info!(event = ?playback.play(demo_id.as_str()), "Previewing demo");
    playback.stop(&demo_id);

    system.session.sign_in(customer.clone());
    info!(outcome = ?guard.on_auth_change(), "Guard after sign-in");

    // Order form
    let mut draft = system.new_draft();
    draft.set_recording_type(RecordingType::Produced);
    draft.set_style_tags(vec!["varejo".to_string()]);
    draft.set_voice(voice_actor_id.clone());

    let brief = "Liquidação de inverno, tudo com 50% de desconto";
    let script = match system.genai() {
        Ok(genai) => match genai.suggest_script(brief, &["varejo".to_string()]).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Script suggestion failed, using the brief");
                brief.to_string()
            }
        },
        Err(_) => brief.to_string(),
    };
    draft.set_mode(ScriptMode::Standard);
    let estimate = draft.set_main_text(script.clone());
    info!(
        words = estimate.word_count,
        seconds = estimate.estimated_seconds,
        credits = estimate.credits,
        "Estimate ready"
    );

    if let Ok(genai) = system.genai() {
        match genai.generate_speech(&script, None).await {
            Ok(uri) => info!(uri_len = uri.len(), "Preview narration ready"),
            Err(e) => warn!(error = %e, "Preview narration failed"),
        }
    }

    let span = tracing::info_span!("order_processing");
    let order_id = async {
        info!("Submitting order");
        system.order_client.submit_order(&customer, &draft.to_form()).await
    }
    .instrument(span)
    .await?;

    if config.payment.api_key.is_some() {
        let billing = BillingInfo {
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            tax_id: "12345678909".to_string(),
        };
        match system.order_client.start_pix_payment(&customer, order_id.clone(), billing).await {
            Ok(charge) => info!(charge_id = %charge.id, "Show the PIX QR code to the payer"),
            Err(e) => error!(error = %e, "Payment could not be started"),
        }
    }

    // Fulfilment
    let queue = system.order_client.subscribe_all_orders(&admin).await?;
    info!(queued = queue.current().len(), "Admin order queue");
    queue.unsubscribe().await.map_err(crate::order_actor::OrderError::from)?;
    for status in [OrderStatus::InProduction, OrderStatus::Completed] {
        system.order_client.advance_status(&admin, order_id.clone(), status).await?;
    }
    system
        .order_client
        .attach_final_audio(&admin, order_id.clone(), "https://cdn.example/final.wav".to_string())
        .await?;
    system
        .order_client
        .advance_status(&customer, order_id.clone(), OrderStatus::Delivered)
        .await?;

    info!(outcome = ?guard.navigate(Route::Admin), "Customer opened the admin panel");
    system.session.sign_out();
    info!(outcome = ?guard.on_auth_change(), "Guard after sign-out");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
