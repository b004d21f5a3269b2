// auth-provider/tests/mock_service.rs
// End-to-end tests against the in-memory auth service

use auth_provider::{
    ApiCallResult, AuthApi, AuthClient, ClientConfig, ClientError, CreateUserRequest, Permission,
    Role, UpdateUserRequest, UsersQuery,
};
use auth_provider_mock::AppState;
use auth_provider_mock::state::{roles, tokens, users};
use std::sync::Arc;

async fn start() -> (AuthClient, Arc<AppState>) {
    let state = Arc::new(AppState::seeded());
    let (addr, _handle) = auth_provider_mock::spawn(state.clone()).await.unwrap();
    let client = ClientConfig::new(format!("http://{addr}")).build_client().unwrap();
    (client, state)
}

fn new_user(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        password: "s3cret-pass".to_string(),
        name: "Bob Builder".to_string(),
        role_ids: vec![roles::VIEWER.to_string()],
    }
}

#[tokio::test]
async fn test_authorize_granted() {
    let (client, _) = start().await;

    let verified = client.authorize(tokens::ADMIN, "users.write").await.unwrap();
    assert!(verified.data().valid);
    assert_eq!(verified.data().user.id, users::ADMIN);
    assert_eq!(verified.data().token, tokens::ADMIN);
    assert_eq!(verified.api_call().status_code, 200);
}

#[tokio::test]
async fn test_authorize_decisions() {
    let (client, _) = start().await;

    assert!(matches!(
        client.authorize(tokens::REVOKED, "users.read").await,
        Err(ClientError::InvalidToken)
    ));
    // Legacy user holds an inactive role before an admin role
    assert!(matches!(
        client.authorize(tokens::LEGACY, "users.read").await,
        Err(ClientError::RoleInactive)
    ));
    assert!(matches!(
        client.authorize(tokens::VIEWER, "users.write").await,
        Err(ClientError::PermissionInactive)
    ));
    assert!(matches!(
        client.authorize(tokens::VIEWER, "roles.read").await,
        Err(ClientError::RoleForbidden)
    ));
    assert!(client.authorize(tokens::VIEWER, "users.read").await.is_ok());
}

#[tokio::test]
async fn test_unknown_token_is_api_error() {
    let (client, _) = start().await;

    match client.authorize("not-a-token", "users.read").await {
        Err(ClientError::Api { code, api_call, .. }) => {
            assert_eq!(code, "INVALID_TOKEN");
            assert_eq!(api_call.status_code, 401);
            assert!(api_call.response_body.contains("UNAUTHORIZED"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_current_user_and_roles() {
    let (client, state) = start().await;

    let me = client.get_current_user(tokens::VIEWER).await.unwrap();
    assert_eq!(me.data().id, users::VIEWER);
    assert_eq!(me.data().username, "viewer");

    state
        .add_role(Role {
            id: "r-auditor".to_string(),
            name: "Auditor".to_string(),
            is_active: true,
            permissions: vec![Permission {
                slug: "audit.read".to_string(),
                is_active: true,
                ..Default::default()
            }],
            ..Default::default()
        })
        .await;

    let listed = client.get_roles(tokens::ADMIN).await.unwrap().into_data();
    let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, [roles::ADMIN, roles::VIEWER, roles::LEGACY, "r-auditor"]);
}

#[tokio::test]
async fn test_user_crud_round_trip() {
    let (client, _) = start().await;
    let request = new_user("bob@example.com");

    let created = client.create_user(tokens::ADMIN, &request).await.unwrap();
    assert_eq!(created.message(), "User created");
    assert_eq!(created.api_call().status_code, 201);
    let user = created.into_data();
    assert_eq!(user.email, request.email);
    assert_eq!(user.name, request.name);
    assert!(user.is_active);
    assert!(user.created_at.is_some());

    let fetched = client.get_user(tokens::ADMIN, &user.id).await.unwrap();
    assert_eq!(fetched.data().email, request.email);

    let update = UpdateUserRequest {
        email: "robert@example.com".to_string(),
        password: "an0ther-pass".to_string(),
        name: "Robert Builder".to_string(),
        role_ids: vec![roles::ADMIN.to_string()],
        is_active: false,
    };
    let updated = client
        .update_user(tokens::ADMIN, &user.id, &update)
        .await
        .unwrap()
        .into_data();
    assert_eq!(updated.email, update.email);
    assert_eq!(updated.name, update.name);
    assert!(!updated.is_active);
    assert_eq!(updated.roles[0].id, roles::ADMIN);

    let deleted = client.delete_user(tokens::ADMIN, &user.id).await.unwrap();
    assert_eq!(deleted.message(), "User deleted");
    assert_eq!(deleted.data()["id"], user.id.as_str());

    match client.get_user(tokens::ADMIN, &user.id).await {
        Err(ClientError::Api { code, .. }) => assert_eq!(code, "NOT_FOUND"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_user_rejected_by_service() {
    let (client, _) = start().await;

    let mut request = new_user("bob@example.com");
    request.password = "short".to_string();
    match client.create_user(tokens::ADMIN, &request).await {
        Err(ClientError::Api { code, message, .. }) => {
            assert_eq!(code, "VALIDATION_ERROR");
            assert!(message.contains("password"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let request = new_user("admin@example.com");
    assert!(matches!(
        client.create_user(tokens::ADMIN, &request).await,
        Err(ClientError::Api { ref code, .. }) if code == "EMAIL_EXISTS"
    ));
}

#[tokio::test]
async fn test_viewer_cannot_create_user() {
    let (client, _) = start().await;

    match client.create_user(tokens::VIEWER, &new_user("carol@example.com")).await {
        Err(ClientError::Api { code, api_call, .. }) => {
            assert_eq!(code, "PERMISSION_DENIED");
            assert_eq!(api_call.status_code, 403);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_users() {
    let (client, _) = start().await;

    let page = client
        .get_users(tokens::ADMIN, &UsersQuery::new(1, 2))
        .await
        .unwrap()
        .into_data();
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.users[0].id, users::ADMIN);
    assert_eq!(page.users[0].roles[0].id, roles::ADMIN);
}

#[tokio::test]
async fn test_revoking_mid_session() {
    let (client, state) = start().await;

    assert!(client.authorize(tokens::ADMIN, "roles.read").await.is_ok());
    assert!(state.revoke_token(tokens::ADMIN).await);
    assert!(matches!(
        client.authorize(tokens::ADMIN, "roles.read").await,
        Err(ClientError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let (client, _) = start().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let token = if i % 2 == 0 { tokens::ADMIN } else { tokens::VIEWER };
            client.authorize(token, "users.read").await.map(|v| v.data().user.id.clone())
        }));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        let user_id = handle.await.unwrap().unwrap();
        let expected = if i % 2 == 0 { users::ADMIN } else { users::VIEWER };
        assert_eq!(user_id, expected);
    }
}
