//! Integration tests for the auth service and identity resolver using
//! in-memory SurrealDB and a stub identity verifier.

use saahaz_auth::token::{hash_session_token, issue_bearer_token};
use saahaz_auth::{
    AuthConfig, AuthService, Credentials, ExternalIdentity, IdentityResolver, IdentityVerifier,
    RegisterInput,
};
use saahaz_core::error::{SaahazError, SaahazResult};
use saahaz_core::models::identity::AuthMethod;
use saahaz_core::models::session::CreateSession;
use saahaz_core::models::user::{Role, UpdateUser};
use saahaz_core::repository::SessionRepository;
use saahaz_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

type Users = SurrealUserRepository<Db>;
type Sessions = SurrealSessionRepository<Db>;

/// Verifier that accepts exactly one session id.
#[derive(Clone)]
struct StubVerifier {
    accepted: &'static str,
    identity: ExternalIdentity,
}

impl IdentityVerifier for StubVerifier {
    async fn verify(&self, session_id: &str) -> SaahazResult<ExternalIdentity> {
        if session_id == self.accepted {
            Ok(self.identity.clone())
        } else {
            Err(SaahazError::ExternalVerification("provider returned 401".into()))
        }
    }
}

fn google_identity() -> ExternalIdentity {
    ExternalIdentity {
        id: "g-123".into(),
        email: "zara@gmail.test".into(),
        name: "Zara".into(),
        picture: Some("https://img.test/z.png".into()),
        session_token: "provider-session-token".into(),
    }
}

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret".into(),
        ..Default::default()
    }
}

struct Harness {
    db: Surreal<Db>,
    service: AuthService<Users, Sessions, StubVerifier>,
    resolver: IdentityResolver<Users, Sessions>,
}

async fn setup() -> Harness {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    saahaz_db::run_migrations(&db).await.unwrap();

    let service = AuthService::new(
        SurrealUserRepository::new(db.clone()),
        SurrealSessionRepository::new(db.clone()),
        StubVerifier {
            accepted: "good-session-id",
            identity: google_identity(),
        },
        test_config(),
    );
    let resolver = IdentityResolver::new(
        SurrealUserRepository::new(db.clone()),
        SurrealSessionRepository::new(db.clone()),
        test_config(),
    );
    Harness {
        db,
        service,
        resolver,
    }
}

fn register_input(email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        email: email.into(),
        password: password.into(),
        name: "Hina".into(),
        address: Some("7 Canal View".into()),
        phone: None,
    }
}

fn bearer(token: String) -> Credentials {
    Credentials {
        session_token: None,
        bearer_token: Some(token),
    }
}

async fn session_rows(db: &Surreal<Db>, raw: &str) -> usize {
    let mut result = db
        .query("SELECT VALUE meta::id(id) FROM session WHERE token_hash = $token_hash")
        .bind(("token_hash", hash_session_token(raw)))
        .await
        .unwrap();
    let ids: Vec<String> = result.take(0).unwrap();
    ids.len()
}

fn cookie(token: &str) -> Credentials {
    Credentials {
        session_token: Some(token.into()),
        bearer_token: None,
    }
}

// -----------------------------------------------------------------------
// Registration & login
// -----------------------------------------------------------------------

#[tokio::test]
async fn register_then_login() {
    let h = setup().await;

    let registered = h
        .service
        .register(register_input("hina@shop.test", "correct-horse"))
        .await
        .unwrap();
    assert_eq!(registered.token_type, "bearer");
    assert_eq!(registered.user.role, Role::Customer);

    let login = h
        .service
        .login("hina@shop.test", "correct-horse")
        .await
        .unwrap();
    assert_eq!(login.user.id, registered.user.id);
    assert!(!login.user.is_admin);
}

#[tokio::test]
async fn login_accepts_the_email_as_registered() {
    let h = setup().await;
    let registered = h
        .service
        .register(register_input("  spaced@shop.test ", "spaced-pass"))
        .await
        .unwrap();
    assert_eq!(registered.user.email, "spaced@shop.test");

    for email in ["  spaced@shop.test ", "spaced@shop.test"] {
        let login = h.service.login(email, "spaced-pass").await.unwrap();
        assert_eq!(login.user.id, registered.user.id);
    }
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let h = setup().await;
    let first = h
        .service
        .register(register_input("dup@shop.test", "password-one"))
        .await
        .unwrap();

    let err = h
        .service
        .register(register_input("dup@shop.test", "password-two"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, SaahazError::DuplicateEmail { .. }),
        "expected DuplicateEmail, got: {err:?}"
    );

    // The original password still works; the second one never landed.
    let login = h.service.login("dup@shop.test", "password-one").await.unwrap();
    assert_eq!(login.user.id, first.user.id);
    assert!(h.service.login("dup@shop.test", "password-two").await.is_err());
}

#[tokio::test]
async fn registration_validates_shape() {
    let h = setup().await;

    let err = h
        .service
        .register(register_input("no-at-sign", "long-enough"))
        .await
        .unwrap_err();
    assert!(matches!(err, SaahazError::Validation { .. }), "got: {err:?}");

    let err = h
        .service
        .register(register_input("short@shop.test", "short"))
        .await
        .unwrap_err();
    assert!(matches!(err, SaahazError::Validation { .. }), "got: {err:?}");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let h = setup().await;
    h.service
        .register(register_input("real@shop.test", "the-password"))
        .await
        .unwrap();

    for (email, password) in [
        ("real@shop.test", "not-the-password"),
        ("ghost@shop.test", "the-password"),
    ] {
        let err = h.service.login(email, password).await.unwrap_err();
        assert!(
            matches!(err, SaahazError::InvalidCredentials),
            "expected InvalidCredentials, got: {err:?}"
        );
    }
}

// -----------------------------------------------------------------------
// Identity resolution
// -----------------------------------------------------------------------

#[tokio::test]
async fn bearer_token_resolves_to_its_user() {
    let h = setup().await;
    let out = h
        .service
        .register(register_input("b@shop.test", "bearer-pass"))
        .await
        .unwrap();

    let identity = h.resolver.resolve(&bearer(out.access_token)).await.unwrap();
    assert_eq!(identity.user_id(), out.user.id);
    assert_eq!(identity.method, AuthMethod::Bearer);
}

#[tokio::test]
async fn subject_only_bearer_token_resolves() {
    #[derive(serde::Serialize)]
    struct SubjectOnly {
        sub: String,
    }

    let h = setup().await;
    let out = h
        .service
        .register(register_input("legacy@shop.test", "legacy-pass"))
        .await
        .unwrap();

    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &SubjectOnly {
            sub: out.user.id.to_string(),
        },
        &jsonwebtoken::EncodingKey::from_secret(test_config().jwt_secret.as_bytes()),
    )
    .unwrap();

    let identity = h.resolver.resolve(&bearer(token)).await.unwrap();
    assert_eq!(identity.user_id(), out.user.id);
    assert_eq!(identity.method, AuthMethod::Bearer);
}

#[tokio::test]
async fn no_credentials_is_unauthenticated() {
    let h = setup().await;
    let err = h.resolver.resolve(&Credentials::default()).await.unwrap_err();
    assert!(matches!(err, SaahazError::Unauthenticated), "got: {err:?}");
}

#[tokio::test]
async fn tampered_token_is_invalid() {
    let h = setup().await;
    let err = h
        .resolver
        .resolve(&bearer("eyJhbGciOiJIUzI1NiJ9.e30.bogus".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, SaahazError::InvalidToken(_)), "got: {err:?}");
}

#[tokio::test]
async fn token_for_deleted_user_is_user_not_found() {
    let h = setup().await;
    let token = issue_bearer_token(uuid::Uuid::new_v4(), &test_config()).unwrap();
    let err = h.resolver.resolve(&bearer(token)).await.unwrap_err();
    assert!(matches!(err, SaahazError::UserNotFound), "got: {err:?}");
}

#[tokio::test]
async fn expired_session_falls_through_to_bearer() {
    let h = setup().await;
    let out = h
        .service
        .register(register_input("e@shop.test", "expired-pass"))
        .await
        .unwrap();

    let sessions = SurrealSessionRepository::new(h.db.clone());
    sessions
        .create(CreateSession {
            user_id: out.user.id,
            token_hash: hash_session_token("old-cookie"),
            expires_at: chrono::Utc::now() - chrono::Duration::seconds(5),
        })
        .await
        .unwrap();

    let err = h.resolver.resolve(&cookie("old-cookie")).await.unwrap_err();
    assert!(matches!(err, SaahazError::Unauthenticated), "got: {err:?}");

    let both = Credentials {
        session_token: Some("old-cookie".into()),
        bearer_token: Some(out.access_token),
    };
    let identity = h.resolver.resolve(&both).await.unwrap();
    assert_eq!(identity.method, AuthMethod::Bearer);
}

// -----------------------------------------------------------------------
// External sessions
// -----------------------------------------------------------------------

#[tokio::test]
async fn external_session_creates_user_and_session() {
    let h = setup().await;

    let out = h
        .service
        .exchange_external_session("good-session-id")
        .await
        .unwrap();
    assert_eq!(out.user.email, "zara@gmail.test");
    assert_eq!(out.session_token, "provider-session-token");
    assert_eq!(out.expires_in, 604_800);

    let identity = h
        .resolver
        .resolve(&cookie("provider-session-token"))
        .await
        .unwrap();
    assert_eq!(identity.user_id(), out.user.id);
    assert_eq!(identity.method, AuthMethod::Session);

    // Password login is impossible for an externally created account.
    let err = h.service.login("zara@gmail.test", "").await.unwrap_err();
    assert!(matches!(err, SaahazError::InvalidCredentials), "got: {err:?}");
}

#[tokio::test]
async fn repeated_exchange_reuses_the_user_but_not_the_session() {
    let h = setup().await;
    let first = h
        .service
        .exchange_external_session("good-session-id")
        .await
        .unwrap();
    let second = h
        .service
        .exchange_external_session("good-session-id")
        .await
        .unwrap();
    assert_eq!(first.user.id, second.user.id);
    assert_eq!(session_rows(&h.db, "provider-session-token").await, 2);

    h.service
        .logout(Some("provider-session-token"))
        .await
        .unwrap();
    assert_eq!(session_rows(&h.db, "provider-session-token").await, 0);
}

#[tokio::test]
async fn rejected_session_id_is_upstream_failure() {
    let h = setup().await;

    let err = h
        .service
        .exchange_external_session("forged")
        .await
        .unwrap_err();
    assert!(
        matches!(err, SaahazError::ExternalVerification(_)),
        "got: {err:?}"
    );

    let err = h.service.exchange_external_session("").await.unwrap_err();
    assert!(matches!(err, SaahazError::Validation { .. }), "got: {err:?}");
}

#[tokio::test]
async fn logout_removes_session_and_tolerates_unknown_tokens() {
    let h = setup().await;
    h.service
        .exchange_external_session("good-session-id")
        .await
        .unwrap();

    h.service
        .logout(Some("provider-session-token"))
        .await
        .unwrap();
    let err = h
        .resolver
        .resolve(&cookie("provider-session-token"))
        .await
        .unwrap_err();
    assert!(matches!(err, SaahazError::Unauthenticated), "got: {err:?}");

    h.service.logout(Some("never-issued")).await.unwrap();
    h.service.logout(None).await.unwrap();
}

// -----------------------------------------------------------------------
// Profile & roles
// -----------------------------------------------------------------------

#[tokio::test]
async fn profile_update_cannot_touch_role() {
    let h = setup().await;
    let out = h
        .service
        .register(register_input("p@shop.test", "profile-pass"))
        .await
        .unwrap();
    let identity = h.resolver.resolve(&bearer(out.access_token)).await.unwrap();

    let updated = h
        .service
        .update_profile(
            &identity,
            UpdateUser {
                phone: Some("0333-7654321".into()),
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone.as_deref(), Some("0333-7654321"));
    assert_eq!(updated.role, Role::Customer);
}

#[tokio::test]
async fn only_admins_grant_roles() {
    let h = setup().await;
    let alice = h
        .service
        .register(register_input("alice@shop.test", "alice-pass"))
        .await
        .unwrap();
    let bob = h
        .service
        .register(register_input("bob@shop.test", "bob-pass-1"))
        .await
        .unwrap();

    let alice_id = h
        .resolver
        .resolve(&bearer(alice.access_token.clone()))
        .await
        .unwrap();
    let err = h
        .service
        .set_role(&alice_id, bob.user.id, Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, SaahazError::Forbidden { .. }), "got: {err:?}");

    h.service.promote_by_email("alice@shop.test").await.unwrap();
    let alice_admin = h.resolver.resolve(&bearer(alice.access_token)).await.unwrap();
    assert!(alice_admin.is_admin());

    let bob_profile = h
        .service
        .set_role(&alice_admin, bob.user.id, Role::Admin)
        .await
        .unwrap();
    assert!(bob_profile.is_admin);
}
