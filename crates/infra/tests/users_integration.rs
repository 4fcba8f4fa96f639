//! Integration tests for the user and user-group resource wrappers

use fuusor_domain::{AuthenticationType, FuusorError, Language, User, UserGroup};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;

use support::{client_for, json_body, mount_token, requests_to};

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn get_all_users() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/User/Get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "userName": "first@example.com",
                "authenticationType": "google",
                "language": "en-US"
            },
            { "userName": "second@example.com" }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let users = client.users().get_all().await.unwrap();

    assert_eq!(
        users,
        vec![
            User::new("first@example.com")
                .with_authentication_type(AuthenticationType::Google)
                .with_language(Language::English),
            User::new("second@example.com"),
        ]
    );
}

#[tokio::test]
async fn create_fills_defaults_and_returns_no_link() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/User/Create"))
        .and(body_json(json!({
            "userName": "new@example.com",
            "authenticationType": "microsoft",
            "language": "fi-FI"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("ignored")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.users().create(User::new("new@example.com")).await.unwrap();

    assert_eq!(outcome.activation_link(), None);
}

#[tokio::test]
async fn create_activation_link_user_returns_link() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/User/Create"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!("https://app.fuusor.fi/activate/abc")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = User::new("link@example.com")
        .with_authentication_type(AuthenticationType::ActivationLink)
        .with_valid_until("2022-02-28");
    let outcome = client.users().create(user).await.unwrap();

    assert_eq!(outcome.activation_link(), Some("https://app.fuusor.fi/activate/abc"));

    let sent = json_body(&requests_to(&server, "/api/v1/User/Create").await[0]);
    assert_eq!(sent["authenticationType"], "activationlink");
    assert_eq!(sent["validUntil"], "2022-02-28");
}

#[tokio::test]
async fn create_rejects_bad_input_without_sending() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;

    let client = client_for(&server);
    let users = client.users();

    let err = users.create(User::new("")).await.unwrap_err();
    assert_eq!(err, FuusorError::Validation("Missing user_name".to_string()));

    let err = users.create(User::new("not-an-email")).await.unwrap_err();
    assert_eq!(err, FuusorError::Validation("Invalid user_name not-an-email".to_string()));

    let err = users
        .create(User::new("ok@example.com").with_valid_until("28.02.2022"))
        .await
        .unwrap_err();
    assert!(matches!(err, FuusorError::Validation(ref msg) if msg.contains("valid_until")));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_sends_user_name_as_query() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/User/Delete"))
        .and(query_param("userName", "gone@example.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.users().delete("gone@example.com").await.unwrap();

    let err = client.users().delete("gone").await.unwrap_err();
    assert!(matches!(err, FuusorError::Validation(_)));
}

#[tokio::test]
async fn delete_unknown_user_is_http_error() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/User/Delete"))
        .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.users().delete("who@example.com").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

// ============================================================================
// User groups
// ============================================================================

#[tokio::test]
async fn get_all_groups() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/UserGroup/Get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "sales", "name": "Sales", "users": ["a@example.com"] },
            { "id": "board", "name": "Board", "description": "Read only" }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let groups: Vec<UserGroup> = client.user_groups().get_all().await.unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].users.as_deref(), Some(&["a@example.com".to_string()][..]));
    assert_eq!(groups[1].description.as_deref(), Some("Read only"));
}

#[tokio::test]
async fn add_and_remove_users() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;
    let body = json!({ "id": "sales", "users": ["a@example.com", "b@example.com"] });
    Mock::given(method("POST"))
        .and(path("/api/v1/UserGroup/AddUsers"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/UserGroup/RemoveUsers"))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let groups = client.user_groups();

    groups.add_users("sales", ["a@example.com", "b@example.com"]).await.unwrap();
    groups
        .remove_users("sales", vec!["a@example.com".to_string(), "b@example.com".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn group_membership_checks_input_first() {
    let server = MockServer::start().await;
    mount_token(&server, "u", 3600).await;

    let client = client_for(&server);
    let groups = client.user_groups();

    let err = groups.add_users("", ["a@example.com"]).await.unwrap_err();
    assert_eq!(err, FuusorError::Validation("Missing id".to_string()));

    let err = groups.remove_users("sales", ["a@example.com", "broken"]).await.unwrap_err();
    assert_eq!(err, FuusorError::Validation("Invalid user broken".to_string()));

    assert!(server.received_requests().await.unwrap().is_empty());
}
