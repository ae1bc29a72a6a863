use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_proxy::{app, Entity};
use tower::ServiceExt;

const COLLECTION: &str = "/api/tessera/apps/6986868d8f619eaab253487e/entities/Endpoint";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_entities_empty() {
    let app = app();
    let resp = app.oneshot(get_request(COLLECTION)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let entities: Vec<Entity> = body_json(resp).await;
    assert!(entities.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_entity_returns_201() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", COLLECTION, r#"{"name":"alpha"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let entity: Entity = body_json(resp).await;
    assert_eq!(entity.name, "alpha");
    assert!(entity.description.is_empty());
    assert!(!entity.id.is_empty());
}

#[tokio::test]
async fn create_entity_with_description() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            COLLECTION,
            r#"{"name":"alpha","description":"first endpoint"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let entity: Entity = body_json(resp).await;
    assert_eq!(entity.description, "first endpoint");
}

#[tokio::test]
async fn create_entity_malformed_json_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", COLLECTION, r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_entity_not_found() {
    let app = app();
    let resp = app
        .oneshot(get_request(&format!("{COLLECTION}/abc123")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- update ---

#[tokio::test]
async fn update_entity_not_found() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("{COLLECTION}/abc123"),
            r#"{"description":"Nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_entity_not_found() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&format!("{COLLECTION}/abc123"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- list scoping and limit ---

#[tokio::test]
async fn list_is_scoped_to_entity_type() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", COLLECTION, r#"{"name":"alpha"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let other = "/api/tessera/apps/6986868d8f619eaab253487e/entities/Webhook";
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(other))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let entities: Vec<Entity> = body_json(resp).await;
    assert!(entities.is_empty());
}

#[tokio::test]
async fn list_honors_limit_param() {
    use tower::Service;

    let mut app = app().into_service();

    for name in ["alpha", "beta", "gamma"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                "POST",
                COLLECTION,
                &format!(r#"{{"name":"{name}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("{COLLECTION}?limit=2")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let entities: Vec<Entity> = body_json(resp).await;
    assert_eq!(entities.len(), 2);
}

// --- full entity lifecycle ---

#[tokio::test]
async fn entity_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", COLLECTION, r#"{"name":"alpha"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Entity = body_json(resp).await;
    assert_eq!(created.name, "alpha");
    let id = created.id;

    // list — should contain the one entity
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(COLLECTION))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let entities: Vec<Entity> = body_json(resp).await;
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].id, id);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("{COLLECTION}/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Entity = body_json(resp).await;
    assert_eq!(fetched.name, "alpha");

    // update — partial: only description
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("{COLLECTION}/{id}"),
            r#"{"description":"Updated via proxy"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Entity = body_json(resp).await;
    assert_eq!(updated.name, "alpha"); // unchanged
    assert_eq!(updated.description, "Updated via proxy");

    // update — partial: only name
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("{COLLECTION}/{id}"),
            r#"{"name":"beta"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Entity = body_json(resp).await;
    assert_eq!(updated.name, "beta");
    assert_eq!(updated.description, "Updated via proxy"); // unchanged

    // delete — returns the removed entity
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("{COLLECTION}/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let removed: Entity = body_json(resp).await;
    assert_eq!(removed.id, id);

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("{COLLECTION}/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(COLLECTION))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let entities: Vec<Entity> = body_json(resp).await;
    assert!(entities.is_empty());
}
