//! Collaborator contracts at the engine boundary. The engine talks to the
//! outside world only through these, so presentation layers and tests can
//! substitute their own implementations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Receives user-facing toasts for side-effect actions (code sent, document
/// attached, submission outcome).
pub trait NotificationSink {
    fn notify(&mut self, kind: NotificationKind, message: &str);
}

/// Receives a destination identifier when the wizard finishes or is
/// abandoned.
pub trait NavigationDispatcher {
    fn navigate(&mut self, destination_id: &str);
}

/// Default sink that drops notifications.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl NotificationSink for NoopNotifier {
    fn notify(&mut self, _kind: NotificationKind, _message: &str) {}
}

/// Default dispatcher that ignores navigation requests.
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl NavigationDispatcher for NoopNavigator {
    fn navigate(&mut self, _destination_id: &str) {}
}
