//! Authentication and authorization system
//!
//! This module composes the token service, login throttle, policy
//! store, and audit log into the two operations the UI boundary calls:
//! `authenticate` and `authorize`, plus the thin result-object facades
//! the boundary serializes.

pub mod directory;
pub mod jwt;
pub mod rbac;
pub mod throttle;


pub use directory::{CredentialLookup, CredentialRecord, StaticDirectory};
pub use jwt::{Claims, TokenService, TokenSubject};
pub use rbac::{Policy, PolicyAction, PolicyStore, Role};
pub use throttle::LoginThrottle;

use crate::audit::{AuthAction, SecurityAuditLog};
use crate::config::SecurityConfig;
use crate::utils::crypto;
use crate::utils::error::{Result, SecurityError};
use crate::utils::sink::CriticalSink;
use crate::utils::validation::{self, InputKind};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// User-safe message returned while an origin is locked out
const LOCKOUT_MESSAGE: &str = "Too many failed login attempts. Please try again later.";

/// User-safe message for any credential mismatch; deliberately does not
/// reveal whether the account exists
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Fallback message when authentication fails for an internal reason
const AUTH_FAILED_MESSAGE: &str = "Authentication failed";

/// Outcome of a login attempt
#[derive(Debug, Clone, Serialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of a token verification
#[derive(Debug, Clone, Serialize)]
pub struct TokenVerification {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Claims>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a token refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a permission check
#[derive(Debug, Clone, Serialize)]
pub struct PermissionOutcome {
    pub has_permission: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Security orchestrator
///
/// One instance per process, constructed at startup and handed to the
/// boundary layer. Holds no ambient global state so tests can build
/// isolated instances.
pub struct SecurityManager {
    config: Arc<SecurityConfig>,
    tokens: Arc<TokenService>,
    throttle: Arc<LoginThrottle>,
    policies: Arc<PolicyStore>,
    audit: Arc<SecurityAuditLog>,
    directory: Arc<dyn CredentialLookup>,
}

impl SecurityManager {
    /// Create a new security manager
    pub fn new(
        config: SecurityConfig,
        directory: Arc<dyn CredentialLookup>,
        sink: Arc<dyn CriticalSink>,
    ) -> Result<Self> {
        config.validate()?;
        info!("Initializing security manager");

        let tokens = Arc::new(TokenService::new(&config.auth));
        let throttle = Arc::new(LoginThrottle::new(&config.auth, sink.clone()));
        let policies = Arc::new(PolicyStore::with_defaults());
        let audit = Arc::new(SecurityAuditLog::new(&config.audit, sink)?);

        Ok(Self {
            config: Arc::new(config),
            tokens,
            throttle,
            policies,
            audit,
            directory,
        })
    }

    /// Authenticate a login attempt
    ///
    /// Consults the throttle before any credential work; a locked-out
    /// origin is refused without touching the directory. Unknown
    /// accounts and wrong passwords produce the same result so callers
    /// cannot probe which emails exist. `Err` is reserved for internal
    /// failures (hashing primitive, token signing, directory errors).
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        origin: &str,
    ) -> Result<AuthResult> {
        if !self.throttle.is_allowed(origin).await {
            self.audit
                .log_auth_event(
                    email,
                    origin,
                    AuthAction::Login,
                    false,
                    Some(json!({ "reason": "Too many failed attempts" })),
                )
                .await;
            return Ok(AuthResult {
                success: false,
                token: None,
                message: Some(LOCKOUT_MESSAGE.to_string()),
            });
        }

        let record = match self.directory.find_by_email(email).await {
            Ok(record) => record,
            Err(e) => {
                self.audit
                    .log_auth_event(
                        email,
                        origin,
                        AuthAction::Login,
                        false,
                        Some(json!({ "error": e.to_string() })),
                    )
                    .await;
                return Err(e);
            }
        };

        let verified_record = match record {
            // Unknown accounts take the same failure path as a wrong
            // password
            None => None,
            Some(record) => {
                let password = password.to_string();
                let hash = record.password_hash.clone();
                let outcome =
                    tokio::task::spawn_blocking(move || crypto::verify_password(&password, &hash))
                        .await
                        .map_err(|e| {
                            SecurityError::internal(format!("Verification task failed: {}", e))
                        });

                match outcome {
                    Ok(Ok(true)) => Some(record),
                    Ok(Ok(false)) => None,
                    Ok(Err(e)) | Err(e) => {
                        self.audit
                            .log_auth_event(
                                email,
                                origin,
                                AuthAction::Login,
                                false,
                                Some(json!({ "error": e.to_string() })),
                            )
                            .await;
                        return Err(e);
                    }
                }
            }
        };

        let Some(record) = verified_record else {
            self.throttle.record_attempt(origin, false).await;
            self.audit
                .log_auth_event(
                    email,
                    origin,
                    AuthAction::Login,
                    false,
                    Some(json!({ "reason": "Invalid credentials" })),
                )
                .await;
            return Ok(AuthResult {
                success: false,
                token: None,
                message: Some(INVALID_CREDENTIALS_MESSAGE.to_string()),
            });
        };

        let subject = TokenSubject {
            subject_id: record.subject_id.clone(),
            email: record.email.clone(),
            roles: record.roles.clone(),
        };
        let token = match self.tokens.issue(&subject).await {
            Ok(token) => token,
            Err(e) => {
                self.audit
                    .log_auth_event(
                        &record.subject_id,
                        origin,
                        AuthAction::Login,
                        false,
                        Some(json!({ "error": e.to_string() })),
                    )
                    .await;
                return Err(e);
            }
        };

        self.throttle.record_attempt(origin, true).await;
        self.audit
            .log_auth_event(&record.subject_id, origin, AuthAction::Login, true, None)
            .await;

        info!("Login succeeded for subject {}", record.subject_id);
        Ok(AuthResult {
            success: true,
            token: Some(token),
            message: None,
        })
    }

    /// Check whether a token grants an action on a resource
    ///
    /// Never fails: a bad token degrades to a denial. The decision is
    /// audited either way; the origin is unknown at this point.
    pub async fn authorize(&self, token: &str, resource: &str, action: PolicyAction) -> bool {
        self.check_permission(token, resource, action)
            .await
            .has_permission
    }

    /// `authorize` with the boundary's result shape
    pub async fn check_permission(
        &self,
        token: &str,
        resource: &str,
        action: PolicyAction,
    ) -> PermissionOutcome {
        match self.tokens.verify(token).await {
            Ok(claims) => {
                let granted = self.policies.has_permission(&claims.roles, resource, action);
                self.audit
                    .log_access_event(
                        &claims.sub,
                        "unknown",
                        resource,
                        &action.to_string(),
                        granted,
                        None,
                    )
                    .await;

                PermissionOutcome {
                    has_permission: granted,
                    error: None,
                }
            }
            Err(e) => {
                self.audit
                    .log_access_event(
                        "unknown",
                        "unknown",
                        resource,
                        &action.to_string(),
                        false,
                        Some(json!({ "error": e.to_string() })),
                    )
                    .await;

                PermissionOutcome {
                    has_permission: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// `authenticate` with boundary error absorption
    ///
    /// Internal failures surface as a generic unsuccessful result; the
    /// detail is already in the audit log.
    pub async fn login(&self, email: &str, password: &str, origin: &str) -> AuthResult {
        match self.authenticate(email, password, origin).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Authentication failed internally: {}", e);
                AuthResult {
                    success: false,
                    token: None,
                    message: Some(AUTH_FAILED_MESSAGE.to_string()),
                }
            }
        }
    }

    /// Verify a token for the boundary
    pub async fn verify_token(&self, token: &str) -> TokenVerification {
        match self.tokens.verify(token).await {
            Ok(claims) => TokenVerification {
                valid: true,
                claims: Some(claims),
                error: None,
            },
            Err(e) => TokenVerification {
                valid: false,
                claims: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Refresh a still-valid token for the boundary
    ///
    /// Equivalent to verify-then-issue with only the identity claims
    /// carried over; the outcome is audited as a token_refresh event.
    pub async fn refresh_token(&self, old_token: &str) -> RefreshOutcome {
        let claims = match self.tokens.verify(old_token).await {
            Ok(claims) => claims,
            Err(e) => {
                let error = SecurityError::token_refresh(e.to_string());
                self.audit
                    .log_auth_event(
                        "unknown",
                        "unknown",
                        AuthAction::TokenRefresh,
                        false,
                        Some(json!({ "error": error.to_string() })),
                    )
                    .await;
                return RefreshOutcome {
                    success: false,
                    token: None,
                    error: Some(error.to_string()),
                };
            }
        };

        match self.tokens.issue(&claims.subject()).await {
            Ok(token) => {
                self.audit
                    .log_auth_event(&claims.sub, "unknown", AuthAction::TokenRefresh, true, None)
                    .await;
                RefreshOutcome {
                    success: true,
                    token: Some(token),
                    error: None,
                }
            }
            Err(e) => {
                self.audit
                    .log_auth_event(
                        &claims.sub,
                        "unknown",
                        AuthAction::TokenRefresh,
                        false,
                        Some(json!({ "error": e.to_string() })),
                    )
                    .await;
                RefreshOutcome {
                    success: false,
                    token: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Check a boundary input string against the deny-list for its kind
    pub fn validate_input(&self, input: &str, kind: InputKind) -> bool {
        validation::validate_input(input, kind)
    }

    /// Periodic housekeeping: prune attempt histories and expired log
    /// files. Intended for idle or teardown, not per-request.
    pub async fn cleanup(&self) {
        debug!("Running security cleanup");
        self.throttle.cleanup(Duration::from_secs(24 * 60 * 60)).await;
        self.audit.cleanup_old_logs(self.config.audit.days_to_keep).await;
    }

    /// Token service
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Login throttle
    pub fn throttle(&self) -> &LoginThrottle {
        &self.throttle
    }

    /// Policy store
    pub fn policies(&self) -> &PolicyStore {
        &self.policies
    }

    /// Audit log
    pub fn audit(&self) -> &SecurityAuditLog {
        &self.audit
    }
}
