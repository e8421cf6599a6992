mod common;

use board_game_reviews::{models::User, MultipleUsersWrapper, UserWrapper};
use common::{message, spawn_app};
use reqwest::StatusCode;

#[tokio::test]
async fn lists_usernames() {
    let app = spawn_app().await;
    let response = app.get("/api/users").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 4);
    for user in users {
        let fields = user.as_object().unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields["username"].is_string());
    }

    let body: MultipleUsersWrapper = serde_json::from_value(body).unwrap();
    assert!(body.users.iter().any(|u| u.username == "mallionaire"));
}

#[tokio::test]
async fn gets_user_by_username() {
    let app = spawn_app().await;
    let response = app.get("/api/users/bainesface").await;
    assert_eq!(response.status(), StatusCode::OK);
    let UserWrapper { user } = response.json::<UserWrapper<User>>().await.unwrap();
    assert_eq!(
        user,
        User {
            username: "bainesface".to_owned(),
            name: "sarah".to_owned(),
            avatar_url: "https://avatars2.githubusercontent.com/u/24394918?s=400&v=4".to_owned(),
        }
    );
}

#[tokio::test]
async fn unknown_username_is_not_found() {
    let app = spawn_app().await;
    for path in ["/api/users/puffin", "/api/users/67676767", "/api/users/%7Bmsg%3A%22hello%22%7D"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
        assert_eq!(message(response).await, "Username not found");
    }
}

#[tokio::test]
async fn users_reject_other_methods() {
    let app = spawn_app().await;
    assert_eq!(
        app.delete("/api/users").await.status(),
        StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(
        app.delete("/api/users/mallionaire").await.status(),
        StatusCode::METHOD_NOT_ALLOWED
    );
}
