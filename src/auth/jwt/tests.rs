//! Token service tests

#[cfg(test)]
mod tests {
    use crate::auth::jwt::types::{TokenService, TokenSubject};
    use crate::config::AuthConfig;
    use crate::utils::error::SecurityError;
    use std::time::Duration;

    fn test_config(lifetime: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "test_secret_key_for_testing_only_0123456789".to_string(),
            jwt_expiration: lifetime,
            ..AuthConfig::default()
        }
    }

    fn test_subject() -> TokenSubject {
        TokenSubject {
            subject_id: "1".to_string(),
            email: "admin@example.com".to_string(),
            roles: vec!["admin".to_string()],
        }
    }

    #[tokio::test]
    async fn test_issue_and_verify_round_trip() {
        let service = TokenService::new(&test_config(3600));
        let subject = test_subject();

        let token = service.issue(&subject).await.unwrap();
        let claims = service.verify(&token).await.unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.roles, vec!["admin"]);
        assert_eq!(claims.exp, claims.iat + 3600);
        assert!(!claims.jti.is_empty());
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage() {
        let service = TokenService::new(&test_config(3600));

        let result = service.verify("not.a.token").await;
        assert!(matches!(result, Err(SecurityError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_foreign_signature() {
        let service = TokenService::new(&test_config(3600));
        let other = TokenService::new(&AuthConfig {
            jwt_secret: "a_completely_different_secret_0123456789abcdef".to_string(),
            ..test_config(3600)
        });

        let token = other.issue(&test_subject()).await.unwrap();
        assert!(service.verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_verify_rejects_expired_token() {
        let service = TokenService::new(&test_config(1));

        let token = service.issue(&test_subject()).await.unwrap();
        // Claim timestamps are whole seconds; sleep past the expiry
        // second entirely
        tokio::time::sleep(Duration::from_millis(2100)).await;

        let result = service.verify(&token).await;
        assert!(matches!(result, Err(SecurityError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_refresh_creates_new_token_with_same_identity() {
        let service = TokenService::new(&test_config(3600));
        let subject = test_subject();

        let token = service.issue(&subject).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;

        let refreshed = service.refresh(&token).await.unwrap();
        assert_ne!(token, refreshed);

        let old_claims = service.verify(&token).await.unwrap();
        let new_claims = service.verify(&refreshed).await.unwrap();

        assert_eq!(old_claims.sub, new_claims.sub);
        assert_eq!(old_claims.email, new_claims.email);
        assert_eq!(old_claims.roles, new_claims.roles);
        assert_ne!(old_claims.jti, new_claims.jti);

        // Refresh does not extend the source token: the new expiry is
        // strictly later, the old one is untouched
        assert!(new_claims.exp > old_claims.exp);
    }

    #[tokio::test]
    async fn test_refresh_rejects_expired_token() {
        let service = TokenService::new(&test_config(1));

        let token = service.issue(&test_subject()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2100)).await;

        let result = service.refresh(&token).await;
        assert!(matches!(result, Err(SecurityError::TokenRefresh(_))));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage() {
        let service = TokenService::new(&test_config(3600));

        let result = service.refresh("garbage").await;
        assert!(matches!(result, Err(SecurityError::TokenRefresh(_))));
    }
}
