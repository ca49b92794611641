pub mod engine;
pub mod errors;
pub mod flow;
pub mod ports;
pub mod state;
pub mod verify;

#[cfg(test)]
mod tests;

pub use engine::WizardEngine;
pub use errors::WizardError;
pub use flow::{
    ContactFields, DocumentSlot, FieldKind, FieldSpec, FlowDefinition, StepDefinition,
};
pub use ports::{NavigationDispatcher, NotificationKind, NotificationSink};
pub use state::{ArtifactRef, FieldValue, StepStatus, Verification, WizardState};
pub use verify::{CodeVerifier, FixedCodeVerifier};
