//! Verification-code strategy. The original product accepted one hardcoded
//! demo code; here acceptance is behind a trait so a real issuance/check can
//! be swapped in without touching the engine.

/// Issues and checks contact-verification codes.
pub trait CodeVerifier {
    /// Called when the user requests a code. Real implementations would
    /// deliver one to the given contact points.
    fn issue(&mut self, phone: &str, email: &str);

    fn accepts(&self, code: &str) -> bool;
}

/// Demo verifier accepting a single fixed code.
#[derive(Debug, Clone)]
pub struct FixedCodeVerifier {
    accepted: String,
}

impl FixedCodeVerifier {
    pub fn new(accepted: impl Into<String>) -> Self {
        Self {
            accepted: accepted.into(),
        }
    }
}

impl Default for FixedCodeVerifier {
    fn default() -> Self {
        Self::new("123456")
    }
}

impl CodeVerifier for FixedCodeVerifier {
    fn issue(&mut self, phone: &str, email: &str) {
        tracing::debug!(%phone, %email, "verification code issued");
    }

    fn accepts(&self, code: &str) -> bool {
        code == self.accepted
    }
}
