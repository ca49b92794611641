use crate::errors::WizardError;
use crate::flow::{FieldKind, FlowDefinition, StepDefinition};
use crate::ports::{
    NavigationDispatcher, NoopNavigator, NoopNotifier, NotificationKind, NotificationSink,
};
use crate::state::{ArtifactRef, FieldValue, StepStatus, WizardState};
use crate::verify::{CodeVerifier, FixedCodeVerifier};
use std::collections::BTreeSet;

/// Drives one onboarding run: sequences the flow's steps, enforces the
/// verification gate, collects field and document state, and decides
/// submission eligibility. Single-threaded and synchronous; every operation
/// completes before the next user interaction is processed.
pub struct WizardEngine {
    flow: FlowDefinition,
    state: WizardState,
    verifier: Box<dyn CodeVerifier>,
    notifier: Box<dyn NotificationSink>,
    navigator: Box<dyn NavigationDispatcher>,
}

impl WizardEngine {
    pub fn new(flow: FlowDefinition) -> anyhow::Result<Self> {
        Self::with_ports(
            flow,
            Box::new(FixedCodeVerifier::default()),
            Box::new(NoopNotifier),
            Box::new(NoopNavigator),
        )
    }

    /// Fails on a structurally invalid flow (no steps, non-contiguous ids);
    /// a constructed engine always keeps `current_step` within `[1, total]`.
    pub fn with_ports(
        flow: FlowDefinition,
        verifier: Box<dyn CodeVerifier>,
        notifier: Box<dyn NotificationSink>,
        navigator: Box<dyn NavigationDispatcher>,
    ) -> anyhow::Result<Self> {
        flow.validate()?;
        Ok(Self {
            flow,
            state: WizardState::new(),
            verifier,
            notifier,
            navigator,
        })
    }

    /// Presentation reads this; mutation goes through the operations below.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn flow(&self) -> &FlowDefinition {
        &self.flow
    }

    pub fn current_step(&self) -> &StepDefinition {
        // current_step is clamped to [1, total] by every transition.
        &self.flow.steps[self.state.current_step - 1]
    }

    /// Stores a field value. Keys outside the per-step schema are kept too;
    /// the schema is advisory.
    pub fn set_field(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        tracing::debug!(%key, "field updated");
        self.state.fields.insert(key, value);
    }

    /// Adds or removes one member of a multi-select group. Idempotent in
    /// both directions; a non-selection value at the key is replaced by a
    /// fresh set.
    pub fn toggle_set_member(&mut self, key: impl Into<String>, member: &str, included: bool) {
        let key = key.into();
        let entry = self
            .state
            .fields
            .entry(key.clone())
            .or_insert_with(|| FieldValue::Selection(BTreeSet::new()));
        if !matches!(entry, FieldValue::Selection(_)) {
            *entry = FieldValue::Selection(BTreeSet::new());
        }
        if let FieldValue::Selection(set) = entry {
            if included {
                set.insert(member.to_string());
            } else {
                set.remove(member);
            }
        }
        tracing::debug!(%key, %member, included, "selection toggled");
    }

    /// Records the picked file's descriptor against a document slot,
    /// replacing any previous artifact there.
    pub fn attach_document(&mut self, slot_key: impl Into<String>, artifact: ArtifactRef) {
        let slot_key = slot_key.into();
        tracing::info!(%slot_key, name = %artifact.name, "document attached");
        self.notifier.notify(
            NotificationKind::Success,
            &format!("Uploaded {}", artifact.name),
        );
        self.state.uploads.insert(slot_key, artifact);
    }

    /// Asks the verifier to issue a code to the flow's contact fields. Both
    /// must already hold non-empty values.
    pub fn request_verification_code(&mut self) -> Result<(), WizardError> {
        let phone = self
            .state
            .scalar(&self.flow.contact.phone_key)
            .unwrap_or("")
            .trim()
            .to_string();
        let email = self
            .state
            .scalar(&self.flow.contact.email_key)
            .unwrap_or("")
            .trim()
            .to_string();
        if phone.is_empty() || email.is_empty() {
            tracing::warn!("verification requested without complete contact details");
            return Err(WizardError::MissingContactInfo(
                "phone and email are required".into(),
            ));
        }

        self.verifier.issue(&phone, &email);
        self.state.verification.otp_requested = true;
        tracing::info!(%phone, %email, "verification code requested");
        self.notifier.notify(
            NotificationKind::Success,
            &format!("Verification code sent to {phone}"),
        );
        Ok(())
    }

    /// Checks the entered code against the injected verifier.
    pub fn submit_verification_code(&mut self, code: &str) -> Result<(), WizardError> {
        if !self.state.verification.otp_requested {
            return Err(WizardError::NoCodeRequested);
        }
        if !self.verifier.accepts(code) {
            tracing::warn!("verification code rejected");
            return Err(WizardError::InvalidCode);
        }
        self.state.verification.otp_verified = true;
        tracing::info!("contact verified");
        Ok(())
    }

    /// Moves forward one step, clamped at the last step. Fails without
    /// mutating state when the current step's gate is unsatisfied.
    pub fn advance(&mut self) -> Result<(), WizardError> {
        let step = self.current_step();
        if step.verification_gate && !self.state.verification.otp_verified {
            tracing::warn!(step = step.id, "advance blocked by verification gate");
            return Err(WizardError::GateNotSatisfied(step.id));
        }
        let next = (self.state.current_step + 1).min(self.flow.total_steps());
        if next != self.state.current_step {
            self.state.current_step = next;
            tracing::info!(step = next, "advanced");
        }
        Ok(())
    }

    /// Moves back one step, clamped at the first. The step being left is not
    /// re-validated.
    pub fn retreat(&mut self) {
        if self.state.current_step > 1 {
            self.state.current_step -= 1;
            tracing::info!(step = self.state.current_step, "went back");
        }
    }

    /// True iff the wizard sits on the final step with every required
    /// consent granted.
    pub fn can_submit(&self) -> bool {
        self.state.current_step == self.flow.total_steps() && self.missing_consents().is_empty()
    }

    /// Required consent keys not currently set to `true`.
    pub fn missing_consents(&self) -> Vec<String> {
        self.flow
            .required_consents
            .iter()
            .filter(|key| !self.state.flag(key))
            .cloned()
            .collect()
    }

    /// Final submission. On success the caller is expected to drop the
    /// engine; state is not persisted anywhere.
    pub fn submit(&mut self) -> Result<(), WizardError> {
        if !self.can_submit() {
            let missing = self.missing_consents();
            tracing::warn!(?missing, "submission rejected");
            self.notifier.notify(
                NotificationKind::Error,
                "Please complete all required consents before submitting",
            );
            return Err(WizardError::ConsentIncomplete(missing));
        }
        tracing::info!(flow = %self.flow.id, "submitted");
        self.notifier
            .notify(NotificationKind::Success, "Registration submitted");
        self.navigator.navigate(&self.flow.submit_destination);
        Ok(())
    }

    /// Leaves the wizard without submitting; collected state is discarded by
    /// dropping the engine.
    pub fn abandon(&mut self) {
        tracing::info!(flow = %self.flow.id, "abandoned");
        self.navigator.navigate(&self.flow.exit_destination);
    }
}

// Derived read model for the step indicator; computed, never stored.
impl WizardEngine {
    pub fn step_status(&self, step_id: usize) -> StepStatus {
        if step_id < self.state.current_step {
            StepStatus::Completed
        } else if step_id == self.state.current_step {
            StepStatus::Current
        } else {
            StepStatus::Pending
        }
    }

    pub fn step_statuses(&self) -> Vec<(usize, StepStatus)> {
        self.flow
            .steps
            .iter()
            .map(|s| (s.id, self.step_status(s.id)))
            .collect()
    }

    pub fn progress_percent(&self) -> u8 {
        let total = self.flow.total_steps();
        ((self.state.current_step * 100) / total) as u8
    }

    /// Advisory completeness of one step: every required field populated for
    /// its declared kind and every required document slot filled. Used by
    /// presentation; never gates `advance()`.
    pub fn is_step_complete(&self, step_id: usize) -> bool {
        let Some(step) = self.flow.step(step_id) else {
            return false;
        };
        let fields_ok = step.required_fields.iter().all(|spec| {
            match (self.state.fields.get(&spec.key), spec.kind) {
                (Some(FieldValue::Scalar(s)), FieldKind::Scalar) => !s.trim().is_empty(),
                (Some(FieldValue::Selection(s)), FieldKind::Selection) => !s.is_empty(),
                (Some(FieldValue::Flag(b)), FieldKind::Flag) => *b,
                _ => false,
            }
        });
        let docs_ok = step
            .document_slots
            .iter()
            .filter(|slot| slot.required)
            .all(|slot| self.state.uploads.contains_key(&slot.key));
        fields_ok && docs_ok
    }
}
