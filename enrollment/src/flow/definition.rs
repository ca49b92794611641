//! Static flow configuration. A flow is pure data consumed by the engine;
//! the institution and teacher onboarding variants are two values of the
//! same shape, not two code paths.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Expected shape of a form field, declared per step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    Selection,
    Flag,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSlot {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

impl DocumentSlot {
    pub fn required(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            required: true,
        }
    }

    pub fn optional(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            required: false,
        }
    }
}

/// One ordered stage of the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepDefinition {
    /// 1-indexed position; ids must be contiguous within a flow.
    pub id: usize,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_fields: Vec<FieldSpec>,
    #[serde(default)]
    pub document_slots: Vec<DocumentSlot>,
    /// Forward navigation off this step requires contact verification.
    #[serde(default)]
    pub verification_gate: bool,
}

/// Field keys read when a verification code is requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactFields {
    pub phone_key: String,
    pub email_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowDefinition {
    pub id: String,
    pub title: String,
    pub steps: Vec<StepDefinition>,
    pub contact: ContactFields,
    /// Consent flag keys that must all be `true` before submission.
    pub required_consents: Vec<String>,
    /// Navigation target after a successful submission.
    pub submit_destination: String,
    /// Navigation target when the wizard is abandoned.
    pub exit_destination: String,
}

impl FlowDefinition {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, id: usize) -> Option<&StepDefinition> {
        self.steps.get(id.checked_sub(1)?)
    }

    /// Structural checks applied at load time.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            bail!("flow '{}' has no steps", self.id);
        }
        for (idx, step) in self.steps.iter().enumerate() {
            if step.id != idx + 1 {
                bail!(
                    "flow '{}': step ids must be contiguous from 1, found {} at position {}",
                    self.id,
                    step.id,
                    idx + 1
                );
            }
        }
        if self.contact.phone_key.is_empty() || self.contact.email_key.is_empty() {
            bail!("flow '{}': contact field keys must be non-empty", self.id);
        }
        for consent in &self.required_consents {
            if consent.is_empty() {
                bail!("flow '{}': empty consent key", self.id);
            }
        }
        Ok(())
    }
}
