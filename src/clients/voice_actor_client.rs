use tracing::{debug, error, info, instrument};
use crate::actor_framework::{ResourceClient, SnapshotFilter, Subscription};
use crate::auth::Session;
use crate::domain::{VoiceActor, VoiceActorCreate, VoiceActorDemo, VoiceActorDemoCreate, VoiceActorPatch};
use crate::voice_actor::VoiceActorError;

/// Client for the voice actor catalogue and its demo recordings.
///
/// Anyone can browse; only administrators can write.
#[derive(Clone)]
pub struct VoiceActorClient {
    inner: ResourceClient<VoiceActor>,
    demos: ResourceClient<VoiceActorDemo>,
}

impl_client_methods!(VoiceActorClient, VoiceActor, VoiceActorError, voice_actor);

fn require_admin(session: &Session) -> Result<(), VoiceActorError> {
    if session.is_admin {
        Ok(())
    } else {
        error!(user_id = %session.user_id, "Non-admin attempted a catalogue write");
        Err(VoiceActorError::Forbidden)
    }
}

impl VoiceActorClient {
    pub fn new(inner: ResourceClient<VoiceActor>, demos: ResourceClient<VoiceActorDemo>) -> Self {
        Self { inner, demos }
    }

    #[instrument(skip(self, session, params), fields(name = %params.name))]
    pub async fn create_voice_actor(&self, session: &Session, params: VoiceActorCreate) -> Result<String, VoiceActorError> {
        require_admin(session)?;
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(voice_actor_id = %id, "Voice actor created");
        Ok(id)
    }

    #[instrument(skip(self, session, patch))]
    pub async fn update_voice_actor(&self, session: &Session, id: String, patch: VoiceActorPatch) -> Result<VoiceActor, VoiceActorError> {
        require_admin(session)?;
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    /// Catalogue view, optionally narrowed to one style and to voices currently online.
    #[instrument(skip(self))]
    pub async fn browse(&self, style: Option<String>, online_only: bool) -> Result<Vec<VoiceActor>, VoiceActorError> {
        debug!("Sending request");
        let filter = SnapshotFilter::new(move |actor: &VoiceActor| {
            (!online_only || actor.online) && style.as_deref().map_or(true, |s| actor.has_style(s))
        });
        Ok(self.inner.list(filter).await?)
    }

    /// Live catalogue. The caller owns the returned handle and must unsubscribe.
    #[instrument(skip(self))]
    pub async fn subscribe_voice_actors(&self) -> Result<Subscription<VoiceActor>, VoiceActorError> {
        debug!("Sending request");
        Ok(self.inner.subscribe(SnapshotFilter::all()).await?)
    }

    #[instrument(skip(self, session, params), fields(voice_actor_id = %params.voice_actor_id))]
    pub async fn add_demo(&self, session: &Session, params: VoiceActorDemoCreate) -> Result<String, VoiceActorError> {
        require_admin(session)?;
        match self.inner.get(params.voice_actor_id.clone()).await? {
            Some(actor) => debug!(voice_actor = %actor.name, "Voice actor exists"),
            None => {
                error!("Voice actor not found");
                return Err(VoiceActorError::NotFound(params.voice_actor_id));
            }
        }
        let id = self.demos.create(params).await?;
        info!(demo_id = %id, "Demo added");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn list_demos(&self, voice_actor_id: String) -> Result<Vec<VoiceActorDemo>, VoiceActorError> {
        debug!("Sending request");
        let filter = SnapshotFilter::new(move |demo: &VoiceActorDemo| demo.voice_actor_id == voice_actor_id);
        Ok(self.demos.list(filter).await?)
    }
}
