//! # Estate Security
//!
//! Authentication and access-control core for the Estate real-estate
//! portfolio manager: session token issuance, brute-force throttling,
//! role/policy-based authorization, and security event auditing.
//!
//! The crate is operated in-process. The boundary layer constructs one
//! [`SecurityManager`] at startup and calls its `login` /
//! `verify_token` / `refresh_token` / `check_permission` facades; user
//! storage stays behind the [`CredentialLookup`] seam.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use estate_security::{
//!     CredentialRecord, SecurityConfig, SecurityManager, StaticDirectory,
//! };
//! use estate_security::utils::{crypto, sink};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SecurityConfig::from_env()?;
//!
//!     let directory = StaticDirectory::new().with_record(CredentialRecord {
//!         subject_id: "1".to_string(),
//!         email: "admin@example.com".to_string(),
//!         password_hash: crypto::hash_password("admin123")?,
//!         roles: vec!["admin".to_string()],
//!     });
//!
//!     let security =
//!         SecurityManager::new(config, Arc::new(directory), sink::tracing_sink())?;
//!
//!     let result = security.login("admin@example.com", "admin123", "10.0.0.1").await;
//!     assert!(result.success);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod audit;
pub mod auth;
pub mod config;
pub mod utils;

// Re-export main types
pub use audit::{
    AuthAction, LogCategory, LogFilters, SecurityAuditLog, SecurityLogEntry, SecurityMetrics,
    Severity,
};
pub use auth::{
    AuthResult, Claims, CredentialLookup, CredentialRecord, LoginThrottle, PermissionOutcome,
    Policy, PolicyAction, PolicyStore, RefreshOutcome, Role, SecurityManager, StaticDirectory,
    TokenService, TokenSubject, TokenVerification,
};
pub use config::{AuditConfig, AuthConfig, SecurityConfig};
pub use utils::error::{Result, SecurityError};
