//! Shared-secret gate in front of the admin panel
//!
//! This is a placeholder lock for a single-operator tool, not a security
//! boundary: the secret is embedded and compared verbatim.

const ADMIN_SECRET: &str = "0000";

#[derive(Debug, Default)]
pub struct AccessGate {
    unlocked: bool,
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact comparison against the embedded secret
    pub fn check_secret(candidate: &str) -> bool {
        candidate == ADMIN_SECRET
    }

    /// Unlock the admin panel if `candidate` matches
    pub fn login(&mut self, candidate: &str) -> bool {
        if Self::check_secret(candidate) {
            self.unlocked = true;
            tracing::info!("Admin unlocked");
        } else {
            tracing::info!("Admin login rejected");
        }
        self.unlocked
    }

    pub fn logout(&mut self) {
        self.unlocked = false;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}
