use board_client::HttpClient;
use board_core::{BoardApi, BoardError, ComposeDraft, Genre, LoginForm, Session};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(server.uri()).expect("client must build")
}

fn post_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("title {id}"),
        "content": format!("content {id}"),
        "created_at": "2026-01-01T09:00:00",
        "updated_at": null,
        "views": 0,
        "author": {"id": 1, "nickname": "alice", "email": "alice@example.com"},
        "genre": {"id": 1, "name": "자유"}
    })
}

#[tokio::test]
async fn login_returns_server_user_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "alice@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "nickname": "alice",
            "email": "alice@example.com",
            "created_at": "2026-01-01T00:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = LoginForm::new(" alice@example.com ", "pw")
        .validate()
        .expect("form must validate");
    let session = client_for(&server)
        .login(&credentials)
        .await
        .expect("login must succeed");

    assert_eq!(session.id, 1);
    assert_eq!(session.nickname, "alice");
    assert_eq!(session.email.as_deref(), Some("alice@example.com"));
    assert_eq!(
        session.extra.get("created_at"),
        Some(&json!("2026-01-01T00:00:00"))
    );
}

#[tokio::test]
async fn login_rejection_surfaces_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "이메일 또는 비밀번호가 일치하지 않습니다."})),
        )
        .mount(&server)
        .await;

    let credentials = LoginForm::new("alice@example.com", "wrong")
        .validate()
        .expect("form must validate");
    let err = client_for(&server)
        .login(&credentials)
        .await
        .expect_err("login must fail");

    assert_eq!(
        err,
        BoardError::Auth("이메일 또는 비밀번호가 일치하지 않습니다.".to_string())
    );
}

#[tokio::test]
async fn login_rejection_without_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let credentials = LoginForm::new("alice@example.com", "pw")
        .validate()
        .expect("form must validate");
    let err = client_for(&server)
        .login(&credentials)
        .await
        .expect_err("login must fail");

    match err {
        BoardError::Auth(message) => assert!(!message.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn list_posts_sends_skip_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"posts": [post_json(11), post_json(12)], "total": 12})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_posts(10, 5)
        .await
        .expect("list_posts must succeed");

    let ids: Vec<i64> = page.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![11, 12]);
    assert_eq!(page.posts[0].author_name(), "alice");
}

#[tokio::test]
async fn list_posts_accepts_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": [], "total": 0})))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_posts(0, 10)
        .await
        .expect("empty page is not an error");
    assert!(page.posts.is_empty());
}

#[tokio::test]
async fn list_posts_server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_posts(0, 10)
        .await
        .expect_err("must fail");
    assert!(err.is_network());
}

#[tokio::test]
async fn list_posts_unreadable_body_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_posts(0, 10)
        .await
        .expect_err("must fail");
    assert!(err.is_network());
}

#[tokio::test]
async fn list_genres_returns_genres() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "genres": [{"id": 1, "name": "자유"}, {"id": 2, "name": "질문"}],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let genres = client_for(&server)
        .list_genres()
        .await
        .expect("list_genres must succeed");
    assert_eq!(
        genres.genres,
        vec![
            Genre {
                id: 1,
                name: "자유".to_string()
            },
            Genre {
                id: 2,
                name: "질문".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn create_post_sends_backend_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({
            "title": "제목",
            "content": "내용",
            "user_id": 1,
            "genre_id": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(42)))
        .expect(1)
        .mount(&server)
        .await;

    let genres = vec![Genre {
        id: 2,
        name: "질문".to_string(),
    }];
    let new_post = ComposeDraft::new(" 제목 ", " 내용 ", Some(2))
        .validate(Some(&Session::new(1, "alice")), &genres)
        .expect("draft must validate");

    let created = client_for(&server)
        .create_post(&new_post)
        .await
        .expect("create_post must succeed");
    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn create_post_rejection_is_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["body", "title"], "msg": "ensure this value has at most 200 characters"}]
        })))
        .mount(&server)
        .await;

    let genres = vec![Genre {
        id: 1,
        name: "자유".to_string(),
    }];
    let new_post = ComposeDraft::new("제목", "내용", Some(1))
        .validate(Some(&Session::new(1, "alice")), &genres)
        .expect("draft must validate");

    let err = client_for(&server)
        .create_post(&new_post)
        .await
        .expect_err("create_post must fail");
    assert_eq!(
        err.user_message(),
        "ensure this value has at most 200 characters"
    );
    assert!(matches!(err, BoardError::Validation { .. }));
}

#[tokio::test]
async fn create_post_server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let genres = vec![Genre {
        id: 1,
        name: "자유".to_string(),
    }];
    let new_post = ComposeDraft::new("제목", "내용", Some(1))
        .validate(Some(&Session::new(1, "alice")), &genres)
        .expect("draft must validate");

    let err = client_for(&server)
        .create_post(&new_post)
        .await
        .expect_err("create_post must fail");
    assert!(err.is_network());
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpClient::new(uri).expect("client must build");
    let err = client.list_genres().await.expect_err("must fail");
    assert!(err.is_network());
}
