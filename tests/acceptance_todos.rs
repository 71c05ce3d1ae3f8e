use axum::Router;
use axum::body::to_bytes;
use serde_json::{Value, json};
use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::domain::repository::TodoRepository;
use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::memory_repo::MemoryTodoRepository;
use todo_api::infrastructure::sqlite_repo::SqliteTodoRepository;

async fn sqlite_app() -> Router {
    // use in-memory sqlite for tests
    let repo = SqliteTodoRepository::connect("sqlite::memory:").await.unwrap();
    repo.init().await.unwrap();
    let service = TodoServiceImpl::new(repo);
    routing::app(todos::router(todos::AppState { service }))
}

fn memory_app() -> Router {
    let service = TodoServiceImpl::new(MemoryTodoRepository::new());
    routing::app(todos::router(todos::AppState { service }))
}

#[tokio::test]
async fn acceptance_create_list_delete_sqlite() {
    let app = sqlite_app().await;

    // create
    let res = request(&app, "POST", "/todos", Some(json!({ "content": "buy milk" }))).await;
    assert_eq!(res.status(), 200);
    let body = body_json(res).await;
    assert_eq!(body.get("content").unwrap(), "buy milk");
    let id = body.get("id").unwrap().as_str().unwrap().to_string();

    // list contains the item
    let res = request(&app, "GET", "/todos", None).await;
    assert_eq!(res.status(), 200);
    let items = body_json(res).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("id").unwrap().as_str().unwrap(), id);
    assert_eq!(items[0].get("content").unwrap(), "buy milk");

    // delete
    let res = request(&app, "DELETE", &format!("/todos/{id}"), None).await;
    assert_eq!(res.status(), 200);
    let body = body_json(res).await;
    assert_eq!(body.get("message").unwrap(), "Todo successfully deleted");

    // list now empty
    let res = request(&app, "GET", "/todos", None).await;
    assert!(body_json(res).await.as_array().unwrap().is_empty());

    // delete again -> 404 with the fixed detail
    let res = request(&app, "DELETE", &format!("/todos/{id}"), None).await;
    assert_eq!(res.status(), 404);
    let body = body_json(res).await;
    assert_eq!(body.get("detail").unwrap(), "Todo not found");
}

#[tokio::test]
async fn acceptance_memory_variant_serial_ids() {
    let app = memory_app();

    let res = request(&app, "POST", "/todos", Some(json!({ "content": "first" }))).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await.get("id").unwrap().as_u64().unwrap(), 1);

    let res = request(&app, "POST", "/todos", Some(json!({ "content": "second" }))).await;
    assert_eq!(body_json(res).await.get("id").unwrap().as_u64().unwrap(), 2);

    let res = request(&app, "DELETE", "/todos/1", None).await;
    assert_eq!(res.status(), 200);

    let res = request(&app, "GET", "/todos", None).await;
    let items = body_json(res).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("id").unwrap().as_u64().unwrap(), 2);

    // an id never issued
    let res = request(&app, "DELETE", "/todos/99", None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn create_rejects_malformed_bodies() {
    let app = memory_app();

    // missing field
    let res = request(&app, "POST", "/todos", Some(json!({}))).await;
    assert_eq!(res.status(), 422);

    // wrong type
    let res = request(&app, "POST", "/todos", Some(json!({ "content": 7 }))).await;
    assert_eq!(res.status(), 422);
    assert!(body_json(res).await.get("detail").is_some());

    // nothing reached storage
    let res = request(&app, "GET", "/todos", None).await;
    assert!(body_json(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_invalid_json_syntax() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = memory_app();
    let req = Request::builder()
        .method("POST")
        .uri("/todos")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), 422);
}

#[tokio::test]
async fn delete_rejects_unparseable_id() {
    let app = memory_app();
    let res = request(&app, "DELETE", "/todos/not-an-id", None).await;
    assert_eq!(res.status(), 422);
}

#[tokio::test]
async fn cors_headers_applied_to_responses() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = memory_app();
    let req = Request::builder()
        .method("GET")
        .uri("/todos")
        .header("origin", "http://localhost")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.headers().get("access-control-allow-origin").unwrap(), "http://localhost");
    assert_eq!(res.headers().get("access-control-allow-credentials").unwrap(), "true");
}

async fn request(app: &Router, method: &str, path: &str, body: Option<serde_json::Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(res: hyper::Response<axum::body::Body>) -> Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}
