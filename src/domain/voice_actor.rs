use serde::{Deserialize, Serialize};

/// A marketplace voice, human or synthetic, that fulfils recording orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceActor {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub style_tags: Vec<String>,
    pub online: bool,
    /// Free text such as "24h".
    pub delivery_time: String,
    pub bio: String,
}

#[derive(Debug, Clone)]
pub struct VoiceActorCreate {
    pub name: String,
    pub avatar_url: String,
    pub style_tags: Vec<String>,
    pub online: bool,
    pub delivery_time: String,
    pub bio: String,
}

#[derive(Debug, Clone, Default)]
pub struct VoiceActorPatch {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub style_tags: Option<Vec<String>>,
    pub online: Option<bool>,
    pub delivery_time: Option<String>,
    pub bio: Option<String>,
}

impl VoiceActor {
    pub fn new(name: impl Into<String>, style_tags: &[&str]) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            avatar_url: String::new(),
            style_tags: style_tags.iter().map(|t| t.to_string()).collect(),
            online: true,
            delivery_time: "24h".to_string(),
            bio: String::new(),
        }
    }

    pub fn has_style(&self, tag: &str) -> bool {
        self.style_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// A sample recording attached to a voice actor's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceActorDemo {
    pub id: String,
    pub voice_actor_id: String,
    pub title: String,
    pub description: String,
    pub audio_url: String,
}

#[derive(Debug, Clone)]
pub struct VoiceActorDemoCreate {
    pub voice_actor_id: String,
    pub title: String,
    pub description: String,
    pub audio_url: String,
}
