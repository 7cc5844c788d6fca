use std::sync::{Arc, Mutex};

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use gigmarket_auth_types::token::{validate_access_token, validate_refresh_token};
use gigmarket_domain::id::AccountId;
use gigmarket_domain::role::Role;
use gigmarket_marketplace::domain::repository::CredentialHasher;
use gigmarket_marketplace::domain::types::RevokedToken;
use gigmarket_marketplace::error::MarketplaceError;
use gigmarket_marketplace::usecase::session::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshSessionUseCase,
};
use gigmarket_testing::auth::{MockAuth, TEST_JWT_SECRET};

use crate::helpers::{MemoryStore, PASSWORD, PlainHasher, seed_account, session_settings};

fn login_usecase(store: &MemoryStore) -> LoginUseCase<MemoryStore, MemoryStore, PlainHasher> {
    LoginUseCase {
        accounts: store.clone(),
        profiles: store.clone(),
        hasher: PlainHasher,
        settings: session_settings(),
    }
}

fn refresh_usecase(store: &MemoryStore) -> RefreshSessionUseCase<MemoryStore, MemoryStore> {
    RefreshSessionUseCase {
        accounts: store.clone(),
        revoked: store.clone(),
        settings: session_settings(),
    }
}

fn logout_usecase(store: &MemoryStore) -> LogoutUseCase<MemoryStore> {
    LogoutUseCase {
        revoked: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

/// Records every hash it is asked to verify against.
#[derive(Clone, Default)]
struct RecordingHasher {
    checked: Arc<Mutex<Vec<String>>>,
}

impl CredentialHasher for RecordingHasher {
    async fn hash(&self, password: &str) -> Result<String, MarketplaceError> {
        PlainHasher.hash(password).await
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        self.checked.lock().unwrap().push(hash.to_owned());
        PlainHasher.verify(password, hash).await
    }

    fn decoy_hash(&self) -> &str {
        "decoy"
    }
}

fn credentials(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_pair_for_active_account() {
    let store = MemoryStore::new();
    let (account, profile) = seed_account(&store, "alice", Role::Client, true);

    let out = login_usecase(&store)
        .execute(credentials("alice", PASSWORD))
        .await
        .unwrap();

    assert_eq!(out.account_id, account.id);
    assert_eq!(out.profile_id, profile.id);
    let access = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(access.account_id, account.id);
    let refresh = validate_refresh_token(&out.refresh_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(refresh.account_id, account.id);
    assert_ne!(access.token_id, refresh.token_id);
}

#[tokio::test]
async fn should_record_last_login() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, true);

    login_usecase(&store)
        .execute(credentials("alice", PASSWORD))
        .await
        .unwrap();

    assert!(store.account(account.id).unwrap().last_login.is_some());
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let store = MemoryStore::new();
    seed_account(&store, "alice", Role::Client, true);

    let result = login_usecase(&store)
        .execute(credentials("alice", "wrong"))
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_username_like_wrong_password() {
    let store = MemoryStore::new();

    let result = login_usecase(&store)
        .execute(credentials("nobody", PASSWORD))
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_refuse_inactive_account_even_with_correct_password() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, false);

    let result = login_usecase(&store)
        .execute(credentials("alice", PASSWORD))
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    assert!(store.account(account.id).unwrap().last_login.is_none());
}

#[tokio::test]
async fn should_report_missing_profile() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, true);
    store.remove_profile_of(account.id);

    let result = login_usecase(&store)
        .execute(credentials("alice", PASSWORD))
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::ProfileMissing)),
        "expected ProfileMissing, got {result:?}"
    );
}

#[tokio::test]
async fn should_require_username() {
    let store = MemoryStore::new();

    let result = login_usecase(&store).execute(credentials(" ", PASSWORD)).await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidField("username"))),
        "expected InvalidField(username), got {result:?}"
    );
}

// ── Refresh ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mint_access_token_from_refresh_token() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, true);
    let refresh = MockAuth::new(account.id).refresh_token();

    let out = refresh_usecase(&store)
        .execute(Some(&refresh.token))
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.account_id, account.id);
}

#[tokio::test]
async fn should_require_refresh_token_for_refresh() {
    let store = MemoryStore::new();

    let result = refresh_usecase(&store).execute(None).await;

    assert!(
        matches!(result, Err(MarketplaceError::RefreshTokenRequired)),
        "expected RefreshTokenRequired, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_access_token_presented_for_refresh() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, true);
    let access = MockAuth::new(account.id).access_token();

    let result = refresh_usecase(&store).execute(Some(&access.token)).await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_refresh_for_unknown_account() {
    let store = MemoryStore::new();
    let refresh = MockAuth::new(AccountId::new()).refresh_token();

    let result = refresh_usecase(&store).execute(Some(&refresh.token)).await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_pay_hashing_cost_for_unknown_username() {
    let store = MemoryStore::new();
    seed_account(&store, "alice", Role::Client, true);
    let hasher = RecordingHasher::default();
    let usecase = LoginUseCase {
        accounts: store.clone(),
        profiles: store.clone(),
        hasher: hasher.clone(),
        settings: session_settings(),
    };

    let unknown = usecase.execute(credentials("mallory", PASSWORD)).await;
    let wrong = usecase.execute(credentials("alice", "wrong-pass")).await;

    assert!(
        matches!(unknown, Err(MarketplaceError::InvalidCredentials)),
        "expected InvalidCredentials, got {unknown:?}"
    );
    assert!(
        matches!(wrong, Err(MarketplaceError::InvalidCredentials)),
        "expected InvalidCredentials, got {wrong:?}"
    );
    let checked = hasher.checked.lock().unwrap().clone();
    assert_eq!(checked, vec!["decoy".to_owned(), format!("plain${PASSWORD}")]);
}

// ── Logout ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_revoke_own_refresh_token() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, true);
    let refresh = MockAuth::new(account.id).refresh_token();

    logout_usecase(&store)
        .execute(account.id, Some(&refresh.token))
        .await
        .unwrap();

    let revoked = store.revoked.lock().unwrap().clone();
    assert_eq!(revoked.len(), 1);
    assert_eq!(revoked[0].jti, refresh.token_id);
    assert_eq!(revoked[0].account_id, account.id);
}

#[tokio::test]
async fn should_reject_refresh_after_logout() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, true);
    let refresh = MockAuth::new(account.id).refresh_token();

    logout_usecase(&store)
        .execute(account.id, Some(&refresh.token))
        .await
        .unwrap();
    let result = refresh_usecase(&store).execute(Some(&refresh.token)).await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_second_logout_with_same_token() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, true);
    let refresh = MockAuth::new(account.id).refresh_token();
    let usecase = logout_usecase(&store);

    usecase
        .execute(account.id, Some(&refresh.token))
        .await
        .unwrap();
    let result = usecase.execute(account.id, Some(&refresh.token)).await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_require_refresh_token_for_logout() {
    let store = MemoryStore::new();

    let result = logout_usecase(&store).execute(AccountId::new(), Some("")).await;

    assert!(
        matches!(result, Err(MarketplaceError::RefreshTokenRequired)),
        "expected RefreshTokenRequired, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_token_on_logout() {
    let store = MemoryStore::new();

    let result = logout_usecase(&store)
        .execute(AccountId::new(), Some("not-a-jwt"))
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
    assert!(store.revoked.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_revoke_another_accounts_token() {
    let store = MemoryStore::new();
    let (alice, _) = seed_account(&store, "alice", Role::Client, true);
    let (bob, _) = seed_account(&store, "bob", Role::Client, true);
    let bobs_refresh = MockAuth::new(bob.id).refresh_token();

    let result = logout_usecase(&store)
        .execute(alice.id, Some(&bobs_refresh.token))
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
    assert!(store.revoked.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_purge_expired_revocations_on_logout() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "alice", Role::Client, true);
    let now = Utc::now();
    let entry = |expires_in: TimeDelta| RevokedToken {
        jti: Uuid::new_v4(),
        account_id: account.id,
        expires_at: now + expires_in,
        revoked_at: now - TimeDelta::days(2),
    };
    let long_expired = entry(TimeDelta::days(-1));
    let within_leeway = entry(TimeDelta::seconds(-10));
    let still_valid = entry(TimeDelta::hours(1));
    store.revoked.lock().unwrap().extend([
        long_expired.clone(),
        within_leeway.clone(),
        still_valid.clone(),
    ]);
    let refresh = MockAuth::new(account.id).refresh_token();

    logout_usecase(&store)
        .execute(account.id, Some(&refresh.token))
        .await
        .unwrap();

    let kept: Vec<Uuid> = store.revoked.lock().unwrap().iter().map(|t| t.jti).collect();
    assert!(!kept.contains(&long_expired.jti));
    assert!(kept.contains(&within_leeway.jti));
    assert!(kept.contains(&still_valid.jti));
    assert!(kept.contains(&refresh.token_id));
}
