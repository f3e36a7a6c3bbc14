use crate::domain::RecordingType;
use super::estimator::{Estimate, Estimator};
use super::form::{OrderForm, ScriptBody, ScriptMode, MAX_VIGNETTES};

/// In-progress order form. Holds every field for both styles so switching
/// modes never loses typed text; only the active style feeds the estimate.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    estimator: Estimator,
    mode: ScriptMode,
    main_text: String,
    vignettes: [String; MAX_VIGNETTES],
    recording_type: RecordingType,
    style_tags: Vec<String>,
    voice_actor_id: String,
    estimate: Estimate,
}

impl OrderDraft {
    pub fn new(estimator: Estimator) -> Self {
        Self {
            estimator,
            mode: ScriptMode::Standard,
            main_text: String::new(),
            vignettes: Default::default(),
            recording_type: RecordingType::Raw,
            style_tags: Vec::new(),
            voice_actor_id: String::new(),
            estimate: Estimate::default(),
        }
    }

    pub fn estimate(&self) -> Estimate {
        self.estimate
    }

    pub fn mode(&self) -> ScriptMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ScriptMode) -> Estimate {
        self.mode = mode;
        self.recompute()
    }

    pub fn set_main_text(&mut self, text: impl Into<String>) -> Estimate {
        self.main_text = text.into();
        self.recompute()
    }

    /// Out-of-range slots are ignored.
    pub fn set_vignette(&mut self, index: usize, text: impl Into<String>) -> Estimate {
        if let Some(slot) = self.vignettes.get_mut(index) {
            *slot = text.into();
        }
        self.recompute()
    }

    pub fn set_recording_type(&mut self, recording_type: RecordingType) {
        self.recording_type = recording_type;
    }

    pub fn set_style_tags(&mut self, tags: Vec<String>) {
        self.style_tags = tags;
    }

    pub fn set_voice(&mut self, voice_actor_id: impl Into<String>) {
        self.voice_actor_id = voice_actor_id.into();
    }

    fn script_body(&self) -> ScriptBody {
        match self.mode {
            ScriptMode::Standard => ScriptBody::Standard {
                text: self.main_text.clone(),
            },
            ScriptMode::Vignettes => ScriptBody::Vignettes {
                segments: self.vignettes.to_vec(),
            },
        }
    }

    fn recompute(&mut self) -> Estimate {
        self.estimate = self.estimator.estimate(&self.script_body().active_text());
        self.estimate
    }

    /// Snapshot of the active style, ready for validation and submission.
    pub fn to_form(&self) -> OrderForm {
        OrderForm {
            recording_type: self.recording_type,
            style_tags: self.style_tags.clone(),
            voice_actor_id: self.voice_actor_id.clone(),
            script: self.script_body(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_follows_main_text() {
        let mut draft = OrderDraft::new(Estimator::default());
        let estimate = draft.set_main_text("uma duas três quatro");
        assert_eq!(estimate.word_count, 4);
        assert_eq!(estimate.estimated_seconds, 2);
        assert_eq!(estimate.credits, 1);

        let cleared = draft.set_main_text("");
        assert_eq!(cleared, Estimate::default());
    }

    #[test]
    fn test_vignette_mode_ignores_main_text() {
        let mut draft = OrderDraft::new(Estimator::default());
        draft.set_main_text(vec!["longo"; 500].join(" "));
        draft.set_vignette(0, "primeira chamada");
        draft.set_vignette(2, "terceira");

        let estimate = draft.set_mode(ScriptMode::Vignettes);
        assert_eq!(estimate.word_count, 3);

        // Switching back restores the main text estimate.
        let estimate = draft.set_mode(ScriptMode::Standard);
        assert_eq!(estimate.word_count, 500);
    }

    #[test]
    fn test_out_of_range_vignette_is_ignored() {
        let mut draft = OrderDraft::new(Estimator::default());
        draft.set_mode(ScriptMode::Vignettes);
        let estimate = draft.set_vignette(7, "fora");
        assert_eq!(estimate.word_count, 0);
    }

    #[test]
    fn test_to_form_uses_active_style() {
        let mut draft = OrderDraft::new(Estimator::default());
        draft.set_voice("voice_actor_2");
        draft.set_main_text("texto");
        draft.set_mode(ScriptMode::Vignettes);
        draft.set_vignette(1, "vinheta");

        let form = draft.to_form();
        assert_eq!(form.voice_actor_id, "voice_actor_2");
        match form.script {
            ScriptBody::Vignettes { segments } => assert_eq!(segments[1], "vinheta"),
            other => panic!("Unexpected script body: {:?}", other),
        }
    }
}
