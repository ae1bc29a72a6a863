//! In-memory stand-in for the Tessera proxy and the upstream API behind it.
//!
//! Serves the proxy route shape (`/api/tessera/apps/{app_id}/entities/...`)
//! over an in-memory entity store. The real proxy's one job — injecting the
//! upstream API key — is invisible to clients, so nothing here simulates it;
//! what clients can observe is the JSON passthrough, and that is what this
//! crate reproduces for integration tests and local demo runs.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct CreateEntity {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateEntity {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// Entities keyed by (entity type, id); the app id is accepted but not
/// checked, like a passthrough proxy.
pub type Db = Arc<RwLock<HashMap<(String, String), Entity>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/api/tessera/apps/{app_id}/entities/{entity_type}",
            get(list_entities).post(create_entity),
        )
        .route(
            "/api/tessera/apps/{app_id}/entities/{entity_type}/{id}",
            get(get_entity).put(update_entity).delete(delete_entity),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_entities(
    State(db): State<Db>,
    Path((_app_id, entity_type)): Path<(String, String)>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Entity>> {
    let entities = db.read().await;
    let mut matching: Vec<Entity> = entities
        .iter()
        .filter(|((kind, _), _)| *kind == entity_type)
        .map(|(_, entity)| entity.clone())
        .collect();
    // Id-sorted so `limit` truncation is deterministic.
    matching.sort_by(|a, b| a.id.cmp(&b.id));
    if let Some(limit) = params.limit {
        matching.truncate(limit);
    }
    Json(matching)
}

async fn create_entity(
    State(db): State<Db>,
    Path((_app_id, entity_type)): Path<(String, String)>,
    Json(input): Json<CreateEntity>,
) -> (StatusCode, Json<Entity>) {
    let entity = Entity {
        // Simple hex form, close enough to the upstream's object ids.
        id: Uuid::new_v4().simple().to_string(),
        name: input.name,
        description: input.description,
    };
    db.write()
        .await
        .insert((entity_type, entity.id.clone()), entity.clone());
    (StatusCode::CREATED, Json(entity))
}

async fn get_entity(
    State(db): State<Db>,
    Path((_app_id, entity_type, id)): Path<(String, String, String)>,
) -> Result<Json<Entity>, StatusCode> {
    let entities = db.read().await;
    entities
        .get(&(entity_type, id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_entity(
    State(db): State<Db>,
    Path((_app_id, entity_type, id)): Path<(String, String, String)>,
    Json(input): Json<UpdateEntity>,
) -> Result<Json<Entity>, StatusCode> {
    let mut entities = db.write().await;
    let entity = entities
        .get_mut(&(entity_type, id))
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        entity.name = name;
    }
    if let Some(description) = input.description {
        entity.description = description;
    }
    Ok(Json(entity.clone()))
}

async fn delete_entity(
    State(db): State<Db>,
    Path((_app_id, entity_type, id)): Path<(String, String, String)>,
) -> Result<Json<Entity>, StatusCode> {
    let mut entities = db.write().await;
    // Returns the removed entity; clients always JSON-decode response bodies.
    entities
        .remove(&(entity_type, id))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
