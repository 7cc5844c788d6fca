use gigmarket_domain::role::Role;
use gigmarket_marketplace::domain::policy::{Policy, authorize};
use gigmarket_marketplace::error::MarketplaceError;

use crate::helpers::{MemoryStore, identity_of, seed_account};

const CLIENT_ONLY: Policy = Policy::RequireRole(Role::Client);

#[tokio::test]
async fn should_admit_client_and_return_profile() {
    let store = MemoryStore::new();
    let (account, profile) = seed_account(&store, "carol", Role::Client, true);

    let result = authorize(&store, Some(&identity_of(account.id)), CLIENT_ONLY).await;

    assert_eq!(result.unwrap(), profile);
}

#[tokio::test]
async fn should_refuse_anonymous_caller() {
    let store = MemoryStore::new();

    let result = authorize(&store, None, CLIENT_ONLY).await;

    assert!(
        matches!(result, Err(MarketplaceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_refuse_freelancer_on_client_route() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "fred", Role::Freelancer, true);

    let result = authorize(&store, Some(&identity_of(account.id)), CLIENT_ONLY).await;

    assert!(
        matches!(result, Err(MarketplaceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_refuse_admin_on_client_route() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "root", Role::Admin, true);

    let result = authorize(&store, Some(&identity_of(account.id)), CLIENT_ONLY).await;

    assert!(
        matches!(result, Err(MarketplaceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_admit_admin_on_admin_route() {
    let store = MemoryStore::new();
    let (account, profile) = seed_account(&store, "root", Role::Admin, true);

    let result = authorize(
        &store,
        Some(&identity_of(account.id)),
        Policy::RequireRole(Role::Admin),
    )
    .await;

    assert_eq!(result.unwrap(), profile);
}

#[tokio::test]
async fn should_report_authenticated_account_without_profile() {
    let store = MemoryStore::new();
    let (account, _) = seed_account(&store, "ghost", Role::Client, true);
    store.remove_profile_of(account.id);

    let result = authorize(&store, Some(&identity_of(account.id)), CLIENT_ONLY).await;

    assert!(
        matches!(result, Err(MarketplaceError::ProfileMissing)),
        "expected ProfileMissing, got {result:?}"
    );
}
