use crate::actor_framework::Entity;
use crate::domain::{VoiceActor, VoiceActorCreate, VoiceActorDemo, VoiceActorDemoCreate, VoiceActorPatch};

impl Entity for VoiceActor {
    type Id = String;
    type CreateParams = VoiceActorCreate;
    type Patch = VoiceActorPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: VoiceActorCreate) -> Result<Self, String> {
        if params.name.trim().is_empty() {
            return Err("Name required".to_string());
        }
        Ok(Self {
            id,
            name: params.name,
            avatar_url: params.avatar_url,
            style_tags: params.style_tags,
            online: params.online,
            delivery_time: params.delivery_time,
            bio: params.bio,
        })
    }

    /// Applies an admin edit to the profile.
    fn on_update(&mut self, patch: VoiceActorPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err("Name required".to_string());
            }
            self.name = name;
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = avatar_url;
        }
        if let Some(style_tags) = patch.style_tags {
            self.style_tags = style_tags;
        }
        if let Some(online) = patch.online {
            self.online = online;
        }
        if let Some(delivery_time) = patch.delivery_time {
            self.delivery_time = delivery_time;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

// Demos are immutable once published.
impl Entity for VoiceActorDemo {
    type Id = String;
    type CreateParams = VoiceActorDemoCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: VoiceActorDemoCreate) -> Result<Self, String> {
        if params.audio_url.is_empty() {
            return Err("Demo audio required".to_string());
        }
        Ok(Self {
            id,
            voice_actor_id: params.voice_actor_id,
            title: params.title,
            description: params.description,
            audio_url: params.audio_url,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Err("Demos are read-only".to_string())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
