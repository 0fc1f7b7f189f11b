#[cfg(test)]
mod tests {
    use chrono::Utc;
    use std::fs;
    use taskdeck::api::{AuthProvider, AuthSession, SupabaseAuth, User};
    use taskdeck::libs::config::SupabaseConfig;
    use taskdeck::libs::session_cache::SessionCache;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct AuthTestContext {
        temp_dir: TempDir,
        config: SupabaseConfig,
    }

    impl AuthTestContext {
        fn cache(&self) -> SessionCache {
            SessionCache::at(self.temp_dir.path().join(".session"))
        }

        fn auth(&self) -> SupabaseAuth {
            SupabaseAuth::with_cache(&self.config, self.cache())
        }
    }

    impl AsyncTestContext for AuthTestContext {
        async fn setup() -> Self {
            AuthTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                // Nothing listens here; tests must not reach the network
                config: SupabaseConfig {
                    url: "http://127.0.0.1:9".to_string(),
                    anon_key: "anon-key".to_string(),
                },
            }
        }
    }

    fn session(expires_at: i64) -> AuthSession {
        AuthSession {
            access_token: "access-token".to_string(),
            refresh_token: "refresh-token".to_string(),
            expires_at: Some(expires_at),
            expires_in: Some(3600),
            user: User {
                id: "u1".to_string(),
                email: Some("foo@bar.com".to_string()),
            },
        }
    }

    #[test_context(AuthTestContext)]
    #[tokio::test]
    async fn test_starts_signed_out(ctx: &mut AuthTestContext) {
        let auth = ctx.auth();
        assert_eq!(auth.restore().await.unwrap(), None);
        assert_eq!(auth.current_user(), None);
        assert_eq!(auth.access_token(), None);
        assert_eq!(*auth.subscribe().borrow(), None);
    }

    #[test_context(AuthTestContext)]
    #[tokio::test]
    async fn test_restore_valid_session_publishes_user(ctx: &mut AuthTestContext) {
        ctx.cache().save(&session(Utc::now().timestamp() + 3600)).unwrap();

        let auth = ctx.auth();
        let mut receiver = auth.subscribe();
        let user = auth.restore().await.unwrap().unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(auth.current_user(), Some(user.clone()));
        assert_eq!(auth.access_token().as_deref(), Some("access-token"));
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), Some(user));
    }

    #[test_context(AuthTestContext)]
    #[tokio::test]
    async fn test_expired_session_that_cannot_refresh_is_dropped(ctx: &mut AuthTestContext) {
        ctx.cache().save(&session(Utc::now().timestamp() - 60)).unwrap();

        let auth = ctx.auth();
        assert!(auth.restore().await.is_err());
        assert_eq!(auth.current_user(), None);
        assert!(!ctx.cache().path().exists());
    }

    #[test_context(AuthTestContext)]
    #[tokio::test]
    async fn test_unreadable_cache_is_discarded(ctx: &mut AuthTestContext) {
        fs::write(ctx.cache().path(), "not a session").unwrap();

        let auth = ctx.auth();
        assert_eq!(auth.restore().await.unwrap(), None);
        assert!(!ctx.cache().path().exists());
    }

    #[test_context(AuthTestContext)]
    #[tokio::test]
    async fn test_cache_that_cannot_be_removed_still_restores_signed_out(ctx: &mut AuthTestContext) {
        // a directory can neither be read as a session nor removed as a file
        fs::create_dir(ctx.cache().path()).unwrap();

        let auth = ctx.auth();
        assert_eq!(auth.restore().await.unwrap(), None);
        assert_eq!(auth.current_user(), None);
        assert!(ctx.cache().path().is_dir());
    }

    #[test_context(AuthTestContext)]
    #[tokio::test]
    async fn test_sign_out_without_session_is_local(ctx: &mut AuthTestContext) {
        let auth = ctx.auth();
        auth.sign_out().await.unwrap();
        assert_eq!(auth.current_user(), None);
    }
}
