use std::sync::Arc;

use uuid::Uuid;

use cadastro_api::domain::repository::UserRepository;
use cadastro_api::domain::types::{LockoutState, User, UserClaim};
use cadastro_api::error::ApiError;
use cadastro_api::usecase::account::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use cadastro_auth_types::token::validate_access_token;

use crate::helpers::{
    MockUserRepo, TEST_PASSWORD, test_identity_settings, test_jwt_settings, test_user,
};

fn register_usecase(users: MockUserRepo) -> RegisterUseCase<MockUserRepo> {
    RegisterUseCase {
        users,
        settings: test_identity_settings(5),
        jwt: Arc::new(test_jwt_settings()),
    }
}

fn login_usecase(users: MockUserRepo, max_failed_attempts: u32) -> LoginUseCase<MockUserRepo> {
    LoginUseCase {
        users,
        settings: test_identity_settings(max_failed_attempts),
        jwt: Arc::new(test_jwt_settings()),
    }
}

fn login(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

/// Reports no existing user but loses the insert, as when a concurrent
/// registration of the same email commits first.
struct RacingRegistrationRepo;

impl UserRepository for RacingRegistrationRepo {
    async fn find_by_normalized_email(&self, _email: &str) -> Result<Option<User>, ApiError> {
        Ok(None)
    }

    async fn create(&self, _user: &User) -> Result<bool, ApiError> {
        Ok(false)
    }

    async fn claims(&self, _user_id: Uuid) -> Result<Vec<UserClaim>, ApiError> {
        panic!("claims must not be loaded for a failed registration");
    }

    async fn increment_failed_attempts(&self, _user_id: Uuid) -> Result<u32, ApiError> {
        unreachable!()
    }

    async fn save_lockout(&self, _user_id: Uuid, _lockout: &LockoutState) -> Result<(), ApiError> {
        unreachable!()
    }
}

/// Always returns the user as first read, so every attempt sees the
/// counter from before the others; writes go to the shared store.
struct StaleReadRepo {
    store: MockUserRepo,
    snapshot: User,
}

impl UserRepository for StaleReadRepo {
    async fn find_by_normalized_email(&self, _email: &str) -> Result<Option<User>, ApiError> {
        Ok(Some(self.snapshot.clone()))
    }

    async fn create(&self, user: &User) -> Result<bool, ApiError> {
        self.store.create(user).await
    }

    async fn claims(&self, user_id: Uuid) -> Result<Vec<UserClaim>, ApiError> {
        self.store.claims(user_id).await
    }

    async fn increment_failed_attempts(&self, user_id: Uuid) -> Result<u32, ApiError> {
        self.store.increment_failed_attempts(user_id).await
    }

    async fn save_lockout(&self, user_id: Uuid, lockout: &LockoutState) -> Result<(), ApiError> {
        self.store.save_lockout(user_id, lockout).await
    }
}

// ── RegisterUseCase ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_confirmed_user_and_issue_token() {
    let users = MockUserRepo::default();
    let token = register_usecase(users.clone())
        .execute(RegisterInput {
            email: "  Maria@Example.com ".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    let stored = users.user("maria@example.com").unwrap();
    assert_eq!(stored.email, "Maria@Example.com");
    assert!(stored.email_confirmed);
    assert!(stored.lockout_enabled);
    assert_ne!(stored.password_hash, TEST_PASSWORD);

    assert!(!token.access_token.is_empty());
    assert_eq!(token.user_token.id, stored.id);
    let info = validate_access_token(&token.access_token, &test_jwt_settings()).unwrap();
    assert_eq!(info.user_id, stored.id);
}

#[tokio::test]
async fn should_reject_duplicate_email_without_issuing_token() {
    let users = MockUserRepo::new(vec![test_user("maria@example.com")]);
    let result = register_usecase(users.clone())
        .execute(RegisterInput {
            email: "MARIA@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await;

    let Err(ApiError::RegistrationFailed(errors)) = result else {
        panic!("expected RegistrationFailed, got {result:?}");
    };
    assert_eq!(errors, vec!["email 'MARIA@example.com' is already taken"]);
    assert_eq!(users.user_count(), 1);
}

#[tokio::test]
async fn should_reject_registration_that_loses_insert_race() {
    let usecase = RegisterUseCase {
        users: RacingRegistrationRepo,
        settings: test_identity_settings(5),
        jwt: Arc::new(test_jwt_settings()),
    };
    let result = usecase
        .execute(RegisterInput {
            email: "maria@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await;

    let Err(ApiError::RegistrationFailed(errors)) = result else {
        panic!("expected RegistrationFailed, got {result:?}");
    };
    assert_eq!(errors, vec!["email 'maria@example.com' is already taken"]);
}

#[tokio::test]
async fn should_report_every_broken_password_rule() {
    let users = MockUserRepo::default();
    let result = register_usecase(users.clone())
        .execute(RegisterInput {
            email: "maria@example.com".to_owned(),
            password: "abc".to_owned(),
        })
        .await;

    let Err(ApiError::RegistrationFailed(errors)) = result else {
        panic!("expected RegistrationFailed, got {result:?}");
    };
    assert!(errors.contains(&"password must be at least 6 characters".to_owned()));
    assert!(errors.contains(&"password must contain a digit".to_owned()));
    assert_eq!(users.user_count(), 0);
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_correct_credentials() {
    let user = test_user("joao@example.com");
    let token = login_usecase(MockUserRepo::new(vec![user.clone()]), 5)
        .execute(login("JOAO@example.com", TEST_PASSWORD))
        .await
        .unwrap();

    assert!(!token.access_token.is_empty());
    assert_eq!(token.expires_in, 7200);
    assert_eq!(token.user_token.email, user.email);
}

#[tokio::test]
async fn should_reject_unknown_email() {
    let result = login_usecase(MockUserRepo::default(), 5)
        .execute(login("nobody@example.com", TEST_PASSWORD))
        .await;
    assert!(
        matches!(result, Err(ApiError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_count_failed_attempt_on_wrong_password() {
    let user = test_user("joao@example.com");
    let users = MockUserRepo::new(vec![user]);
    let result = login_usecase(users.clone(), 5)
        .execute(login("joao@example.com", "Wrong@123"))
        .await;

    assert!(matches!(result, Err(ApiError::InvalidCredentials)));
    let stored = users.user("joao@example.com").unwrap();
    assert_eq!(stored.lockout.access_failed_count, 1);
    assert!(stored.lockout.lockout_end.is_none());
}

#[tokio::test]
async fn should_lock_account_after_threshold_even_with_correct_password() {
    let users = MockUserRepo::new(vec![test_user("joao@example.com")]);
    let usecase = login_usecase(users.clone(), 3);

    for attempt in 1..=2 {
        let result = usecase.execute(login("joao@example.com", "Wrong@123")).await;
        assert!(
            matches!(result, Err(ApiError::InvalidCredentials)),
            "attempt {attempt}: expected InvalidCredentials, got {result:?}"
        );
    }
    let third = usecase.execute(login("joao@example.com", "Wrong@123")).await;
    assert!(matches!(third, Err(ApiError::AccountLocked)));

    let correct = usecase.execute(login("joao@example.com", TEST_PASSWORD)).await;
    assert!(
        matches!(correct, Err(ApiError::AccountLocked)),
        "expected AccountLocked, got {correct:?}"
    );
    assert!(users.user("joao@example.com").unwrap().lockout.lockout_end.is_some());
}

#[tokio::test]
async fn should_reset_failed_attempts_on_success() {
    let users = MockUserRepo::new(vec![test_user("joao@example.com")]);
    let usecase = login_usecase(users.clone(), 3);

    let _ = usecase.execute(login("joao@example.com", "Wrong@123")).await;
    assert_eq!(
        users.user("joao@example.com").unwrap().lockout.access_failed_count,
        1
    );

    usecase
        .execute(login("joao@example.com", TEST_PASSWORD))
        .await
        .unwrap();
    assert_eq!(
        users.user("joao@example.com").unwrap().lockout.access_failed_count,
        0
    );
}

#[tokio::test]
async fn should_count_every_failed_attempt_when_reads_overlap() {
    let user = test_user("joao@example.com");
    let store = MockUserRepo::new(vec![user.clone()]);
    let usecase = LoginUseCase {
        users: StaleReadRepo {
            store: store.clone(),
            snapshot: user,
        },
        settings: test_identity_settings(3),
        jwt: Arc::new(test_jwt_settings()),
    };

    let mut results = Vec::new();
    for _ in 0..3 {
        results.push(usecase.execute(login("joao@example.com", "Wrong@123")).await);
    }

    assert!(matches!(results[0], Err(ApiError::InvalidCredentials)));
    assert!(matches!(results[1], Err(ApiError::InvalidCredentials)));
    assert!(
        matches!(results[2], Err(ApiError::AccountLocked)),
        "expected AccountLocked, got {:?}",
        results[2]
    );
    assert!(store.user("joao@example.com").unwrap().lockout.lockout_end.is_some());
}
