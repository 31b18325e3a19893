//! What the controller puts on the wire, checked against a recording server.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use journal::controller::{self, ClientError, Field, MemoryPage, Node, Panel};
use journal::HttpJournalClient;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl Recorded {
    fn take(&self) -> Vec<(String, String)> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

async fn spawn_recorder(reply: serde_json::Value, status: StatusCode) -> (String, Recorded) {
    let recorded = Recorded::default();

    let record = move |path: &'static str| {
        let reply = reply.clone();
        move |State(recorded): State<Recorded>, body: String| {
            let reply = reply.clone();
            async move {
                recorded
                    .requests
                    .lock()
                    .unwrap()
                    .push((path.to_string(), body));
                (status, Json(reply))
            }
        }
    };

    let app = Router::new()
        .route("/add", post(record("/add")))
        .route("/edit", post(record("/edit")))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), recorded)
}

fn field_names(body: &str) -> Vec<&str> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split('=').next().unwrap_or_default())
        .collect()
}

fn sample() -> serde_json::Value {
    json!({ "id": 7, "title": "T", "text": "<b>hi</b>", "created": "2024-01-01" })
}

#[tokio::test]
async fn create_posts_exactly_title_and_text_once() {
    let (base_url, recorded) = spawn_recorder(sample(), StatusCode::OK).await;
    let client = HttpJournalClient::new(base_url);
    let mut page = MemoryPage::home();
    page.set_value(Field::Title, "a title");
    page.set_value(Field::Text, "some & text");

    controller::create_entry(&mut page, &client).await.unwrap();

    let requests = recorded.take();
    assert_eq!(requests.len(), 1);
    let (path, body) = &requests[0];
    assert_eq!(path, "/add");
    assert_eq!(field_names(body), ["title", "text"]);
    assert!(body.contains("title=a+title"), "{body}");
    assert!(body.contains("text=some+%26+text"), "{body}");
}

#[tokio::test]
async fn create_renders_server_record_after_the_form() {
    let (base_url, _recorded) = spawn_recorder(sample(), StatusCode::OK).await;
    let client = HttpJournalClient::new(base_url);
    let mut page = MemoryPage::home();

    let entry = controller::create_entry(&mut page, &client).await.unwrap();
    assert_eq!(entry.id, Some(7));

    let Some(Node::Fragment(html)) = page.next_sibling(Panel::Create) else {
        panic!("no fragment after create form");
    };
    assert!(html.contains(r#"<a href="/detail/7">"#));
    assert!(html.contains(r#"<h1 class="headingLink">T</h1>"#));
    assert!(html.contains("<small>2024-01-01</small>"));
    assert!(html.contains("<b>hi</b>"));
}

#[tokio::test]
async fn update_without_target_sends_empty_id_field() {
    let (base_url, recorded) = spawn_recorder(sample(), StatusCode::OK).await;
    let client = HttpJournalClient::new(base_url);
    let mut page = MemoryPage::detail();

    controller::update_entry(&mut page, &client, None).await.unwrap();

    let requests = recorded.take();
    assert_eq!(requests.len(), 1);
    let (path, body) = &requests[0];
    assert_eq!(path, "/edit");
    assert_eq!(field_names(body), ["id", "title", "text"]);
    assert!(body.starts_with("id=&"), "{body}");
}

#[tokio::test]
async fn short_record_renders_empty_placeholders() {
    let (base_url, _recorded) = spawn_recorder(json!({ "title": "only" }), StatusCode::OK).await;
    let client = HttpJournalClient::new(base_url);
    let mut page = MemoryPage::home();

    let entry = controller::create_entry(&mut page, &client).await.unwrap();
    assert_eq!(entry.id, None);

    let Some(Node::Fragment(html)) = page.next_sibling(Panel::Create) else {
        panic!("no fragment after create form");
    };
    assert!(html.contains(r#"<a href="/detail/">"#));
    assert!(html.contains("<small></small>"));
}

#[tokio::test]
async fn server_error_leaves_page_unchanged() {
    let (base_url, recorded) =
        spawn_recorder(json!({ "error": "nope" }), StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = HttpJournalClient::new(base_url);
    let mut page = MemoryPage::home();
    let before = page.clone();

    let err = controller::create_entry(&mut page, &client).await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }), "{err}");
    assert_eq!(recorded.take().len(), 1);
    assert_eq!(page.document(), before.document());
    assert!(page.events().is_empty());
}

#[tokio::test]
async fn non_record_body_is_a_decode_error() {
    let (base_url, _recorded) = spawn_recorder(json!("not a record"), StatusCode::OK).await;
    let client = HttpJournalClient::new(base_url);
    let mut page = MemoryPage::home();

    let err = controller::create_entry(&mut page, &client).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "{err}");
    assert_eq!(page.document().len(), 1);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = HttpJournalClient::new(format!("http://127.0.0.1:{port}"));
    let mut page = MemoryPage::detail();

    let err = controller::update_entry(&mut page, &client, Some(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err}");
    assert_eq!(page.visible_panels(), vec![Panel::Detail]);
}
