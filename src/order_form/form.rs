use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::{BillingInfo, OrderCreate, RecordingType};
use super::estimator::{Estimate, Estimator};

pub const MAX_VIGNETTES: usize = 4;
/// Joins vignettes into the stored script.
pub const VIGNETTE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptMode {
    Standard,
    Vignettes,
}

/// Script schema, one variant per recording style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScriptBody {
    /// One continuous script.
    Standard { text: String },
    /// Up to [`MAX_VIGNETTES`] short independent segments.
    Vignettes { segments: Vec<String> },
}

impl ScriptBody {
    pub fn mode(&self) -> ScriptMode {
        match self {
            ScriptBody::Standard { .. } => ScriptMode::Standard,
            ScriptBody::Vignettes { .. } => ScriptMode::Vignettes,
        }
    }

    /// The text that gets narrated, and therefore estimated.
    pub fn active_text(&self) -> String {
        match self {
            ScriptBody::Standard { text } => text.trim().to_string(),
            ScriptBody::Vignettes { segments } => segments
                .iter()
                .take(MAX_VIGNETTES)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(VIGNETTE_SEPARATOR),
        }
    }

    fn validate(&self, errors: &mut Vec<FieldError>) {
        match self {
            ScriptBody::Standard { text } => {
                if text.trim().is_empty() {
                    errors.push(FieldError::new("script", "Script is required"));
                }
            }
            ScriptBody::Vignettes { segments } => {
                if segments.len() > MAX_VIGNETTES {
                    errors.push(FieldError::new(
                        "vignettes",
                        format!("At most {} vignettes are allowed", MAX_VIGNETTES),
                    ));
                }
                if segments.iter().all(|s| s.trim().is_empty()) {
                    errors.push(FieldError::new("vignettes[0]", "Fill in at least one vignette"));
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Inline validation errors, one entry per offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid order form: {}", describe(.fields))]
pub struct FormErrors {
    pub fields: Vec<FieldError>,
}

impl FormErrors {
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// What the customer submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    pub recording_type: RecordingType,
    pub style_tags: Vec<String>,
    pub voice_actor_id: String,
    pub script: ScriptBody,
}

/// A form that passed validation, with its estimate frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub recording_type: RecordingType,
    pub style_tags: Vec<String>,
    pub voice_actor_id: String,
    pub script: String,
    pub estimate: Estimate,
}

impl OrderForm {
    pub fn validate(&self, estimator: &Estimator) -> Result<ValidatedOrder, FormErrors> {
        let mut errors = Vec::new();
        if self.voice_actor_id.trim().is_empty() {
            errors.push(FieldError::new("voice_actor_id", "Choose a voice"));
        }
        self.script.validate(&mut errors);
        if !errors.is_empty() {
            return Err(FormErrors { fields: errors });
        }

        let script = self.script.active_text();
        Ok(ValidatedOrder {
            recording_type: self.recording_type,
            style_tags: self
                .style_tags
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            voice_actor_id: self.voice_actor_id.trim().to_string(),
            estimate: estimator.estimate(&script),
            script,
        })
    }
}

impl ValidatedOrder {
    /// Creation params for `user_id`. The cost always comes from the frozen estimate.
    pub fn into_create(self, user_id: impl Into<String>) -> OrderCreate {
        OrderCreate {
            user_id: user_id.into(),
            recording_type: self.recording_type,
            style_tags: self.style_tags,
            script: self.script,
            voice_actor_id: self.voice_actor_id,
            estimated_seconds: self.estimate.estimated_seconds,
            credits: self.estimate.credits,
        }
    }
}

/// Checkout form check, run before anything is sent to the payment provider.
pub fn validate_billing(billing: &BillingInfo) -> Result<(), FormErrors> {
    let mut errors = Vec::new();
    if billing.name.trim().is_empty() {
        errors.push(FieldError::new("billing.name", "Name is required"));
    }
    if billing.email.trim().is_empty() {
        errors.push(FieldError::new("billing.email", "Email is required"));
    }
    if billing.tax_id.trim().is_empty() {
        errors.push(FieldError::new("billing.tax_id", "CPF/CNPJ is required"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormErrors { fields: errors })
    }
}
