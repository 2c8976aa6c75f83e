//! Admin access gate.
//!
//! # Responsibility
//! - Check admin login attempts against the injected shared password.
//! - Emit audit log events without ever logging password material.
//!
//! # Invariants
//! - The password arrives as configuration at startup; it is never
//!   hardcoded and never persisted by the core.
//! - The gate keeps no session state; the surrounding UI owns sessions.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Startup configuration for the admin gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Shared admin password. A placeholder boundary, not real auth; the
    /// site intentionally runs on a single reviewer credential.
    pub password: String,
}

/// Configuration failures for the admin gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminConfigError {
    /// Configured password is blank after trim.
    BlankPassword,
}

impl Display for AdminConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankPassword => write!(f, "admin password must not be blank"),
        }
    }
}

impl Error for AdminConfigError {}

/// Password gate in front of the admin moderation surface.
#[derive(Debug)]
pub struct AdminGate {
    password: String,
    failed_attempts: u32,
}

impl AdminGate {
    /// Creates the gate from injected configuration.
    ///
    /// # Errors
    /// - [`AdminConfigError::BlankPassword`] when the configured password
    ///   is blank.
    pub fn new(config: AdminConfig) -> Result<Self, AdminConfigError> {
        if config.password.trim().is_empty() {
            return Err(AdminConfigError::BlankPassword);
        }
        Ok(Self {
            password: config.password,
            failed_attempts: 0,
        })
    }

    /// Checks one login attempt.
    ///
    /// Logs an `admin_login` event with the running failure count; the
    /// candidate value itself never reaches the log.
    pub fn verify(&mut self, candidate: &str) -> bool {
        if candidate == self.password {
            self.failed_attempts = 0;
            info!("event=admin_login module=service status=ok");
            return true;
        }

        self.failed_attempts = self.failed_attempts.saturating_add(1);
        warn!(
            "event=admin_login module=service status=denied failed_attempts={}",
            self.failed_attempts
        );
        false
    }

    /// Consecutive failed attempts since the last success.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::{AdminConfig, AdminConfigError, AdminGate};

    fn gate(password: &str) -> AdminGate {
        AdminGate::new(AdminConfig {
            password: password.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn blank_password_is_rejected_at_startup() {
        let err = AdminGate::new(AdminConfig {
            password: "   ".to_string(),
        })
        .unwrap_err();
        assert_eq!(err, AdminConfigError::BlankPassword);
    }

    #[test]
    fn verify_accepts_exact_match_only() {
        let mut gate = gate("family2024");
        assert!(gate.verify("family2024"));
        assert!(!gate.verify("family2024 "));
        assert!(!gate.verify("FAMILY2024"));
    }

    #[test]
    fn failure_count_resets_on_success() {
        let mut gate = gate("family2024");
        assert!(!gate.verify("nope"));
        assert!(!gate.verify("still nope"));
        assert_eq!(gate.failed_attempts(), 2);

        assert!(gate.verify("family2024"));
        assert_eq!(gate.failed_attempts(), 0);
    }
}
