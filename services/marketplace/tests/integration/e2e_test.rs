use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};

use gigmarket_auth_types::identity::authenticate;
use gigmarket_domain::role::Role;
use gigmarket_marketplace::domain::policy::{Policy, authorize};
use gigmarket_marketplace::error::MarketplaceError;
use gigmarket_marketplace::usecase::job_post::{
    CreateJobPostInput, CreateJobPostUseCase, ListJobPostsUseCase,
};
use gigmarket_marketplace::usecase::registration::ActivateAccountUseCase;
use gigmarket_marketplace::usecase::session::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshSessionUseCase,
};
use gigmarket_testing::auth::TEST_JWT_SECRET;

use crate::helpers::{
    MemoryStore, PASSWORD, PlainHasher, RecordingNotifier, activation_tokens, confirmation_parts,
    register_input, register_usecase, session_settings,
};

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

fn login(store: &MemoryStore) -> LoginUseCase<MemoryStore, MemoryStore, PlainHasher> {
    LoginUseCase {
        accounts: store.clone(),
        profiles: store.clone(),
        hasher: PlainHasher,
        settings: session_settings(),
    }
}

fn credentials() -> LoginInput {
    LoginInput {
        username: "carol".to_owned(),
        password: PASSWORD.to_owned(),
    }
}

#[tokio::test]
async fn should_run_client_lifecycle_from_registration_to_logout() {
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::new();

    // Register: account exists but cannot log in yet.
    let registered = register_usecase(&store, &notifier)
        .execute(register_input("carol", "carol@example.com"))
        .await
        .unwrap();
    let early = login(&store).execute(credentials()).await;
    assert!(
        matches!(early, Err(MarketplaceError::InvalidCredentials)),
        "expected InvalidCredentials, got {early:?}"
    );

    // Activate through the emailed link.
    let (uid, token) = confirmation_parts(&notifier.last());
    let activated = ActivateAccountUseCase {
        accounts: store.clone(),
        tokens: activation_tokens(),
    }
    .execute(&uid, &token)
    .await
    .unwrap();
    assert!(activated);

    // Login.
    let session = login(&store).execute(credentials()).await.unwrap();
    assert_eq!(session.profile_id, registered.profile_id);

    // Post a job through the client gate.
    let identity = authenticate(&bearer(&session.access_token), TEST_JWT_SECRET);
    let caller = authorize(
        &store,
        identity.as_ref(),
        Policy::RequireRole(Role::Client),
    )
    .await
    .unwrap();
    let post = CreateJobPostUseCase {
        repo: store.clone(),
    }
    .execute(CreateJobPostInput {
        author: caller.id,
        title: "Landing page".to_owned(),
        description: "Single page, responsive".to_owned(),
        status: None,
    })
    .await
    .unwrap();

    let mine = ListJobPostsUseCase {
        repo: store.clone(),
    }
    .execute(Some(registered.profile_id))
    .await
    .unwrap();
    assert_eq!(mine, vec![post]);

    // Logout revokes the refresh token.
    let identity = identity.unwrap();
    LogoutUseCase {
        revoked: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
    .execute(identity.account_id, Some(&session.refresh_token))
    .await
    .unwrap();

    let refreshed = RefreshSessionUseCase {
        accounts: store.clone(),
        revoked: store.clone(),
        settings: session_settings(),
    }
    .execute(Some(&session.refresh_token))
    .await;
    assert!(
        matches!(refreshed, Err(MarketplaceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {refreshed:?}"
    );
}

#[tokio::test]
async fn should_keep_freelancer_out_of_job_creation() {
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::new();
    let mut input = register_input("carol", "carol@example.com");
    input.role = Some(Role::Freelancer);
    register_usecase(&store, &notifier).execute(input).await.unwrap();
    let (uid, token) = confirmation_parts(&notifier.last());
    ActivateAccountUseCase {
        accounts: store.clone(),
        tokens: activation_tokens(),
    }
    .execute(&uid, &token)
    .await
    .unwrap();

    let session = login(&store).execute(credentials()).await.unwrap();
    let identity = authenticate(&bearer(&session.access_token), TEST_JWT_SECRET);
    let result = authorize(
        &store,
        identity.as_ref(),
        Policy::RequireRole(Role::Client),
    )
    .await;

    assert!(
        matches!(result, Err(MarketplaceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(store.job_post_count(), 0);
}
