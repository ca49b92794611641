use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Value stored for a single form field.
///
/// The per-step schema declares which kind a field is expected to hold, but
/// storage is permissive: whatever the caller sets is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    Selection(BTreeSet<String>),
    Flag(bool),
}

impl FieldValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn flag(value: bool) -> Self {
        Self::Flag(value)
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Selection(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value counts as "filled in" for its declared kind.
    pub fn is_populated(&self) -> bool {
        match self {
            Self::Scalar(s) => !s.trim().is_empty(),
            Self::Selection(s) => !s.is_empty(),
            Self::Flag(b) => *b,
        }
    }
}

/// Opaque descriptor of a user-selected file. Content is never inspected;
/// the engine tracks the descriptor only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactRef {
    pub id: Uuid,
    pub name: String,
    pub size_bytes: u64,
    pub mime_hint: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ArtifactRef {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_hint: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size_bytes,
            mime_hint: mime_hint.into(),
            uploaded_at: Utc::now(),
        }
    }
}

/// Contact-verification progress for the gated step.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verification {
    pub otp_requested: bool,
    pub otp_verified: bool,
}

/// Presentation status of one step, derived from the current position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Mutable wizard state, owned exclusively by the engine and mutated only
/// through its operations. Created fresh at mount, discarded on abandon or
/// successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    /// 1-indexed; always within `[1, total_steps]`.
    pub current_step: usize,
    /// Flat mapping keyed by namespaced field keys (`identity.email`, ...).
    pub fields: BTreeMap<String, FieldValue>,
    /// One artifact per document slot; overwrite-only, no delete.
    pub uploads: BTreeMap<String, ArtifactRef>,
    pub verification: Verification,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: 1,
            fields: BTreeMap::new(),
            uploads: BTreeMap::new(),
            verification: Verification::default(),
        }
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_scalar)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.fields
            .get(key)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    pub fn selection(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.fields.get(key).and_then(FieldValue::as_selection)
    }

    pub fn has_populated(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(FieldValue::is_populated)
    }
}
