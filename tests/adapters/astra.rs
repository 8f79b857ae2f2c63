//! AstraDocumentStore against an imitation of the Document API v2.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use github_profiles::{
    AstraConfig, AstraDocumentStore, Document, DocumentStore, DocumentsExt, ProfileInput,
    ProfileError, ProfileService, StoreError,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::common::{StaticLookup, LONDON};
use crate::start_mock;

const TOKEN: &str = "AstraCS:test";

#[derive(Default)]
struct FakeAstra {
    next_id: u64,
    collections: HashMap<String, BTreeMap<String, Value>>,
}

type Shared = Arc<Mutex<FakeAstra>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-cassandra-token")
        .and_then(|v| v.to_str().ok())
        == Some(TOKEN)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "description": "bad token" }))).into_response()
}

async fn create_doc(
    State(state): State<Shared>,
    Path((_ns, col)): Path<(String, String)>,
    headers: HeaderMap,
    Json(doc): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.next_id += 1;
    let id = format!("doc-{:03}", state.next_id);
    state.collections.entry(col).or_default().insert(id.clone(), doc);
    (StatusCode::CREATED, Json(json!({ "documentId": id }))).into_response()
}

async fn list_docs(
    State(state): State<Shared>,
    Path((_ns, col)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    let Some(docs) = state.collections.get(&col) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let size: usize = params.get("page-size").and_then(|s| s.parse().ok()).unwrap_or(3);
    let start: usize = params.get("page-state").and_then(|s| s.parse().ok()).unwrap_or(0);

    let page: serde_json::Map<String, Value> = docs
        .iter()
        .skip(start)
        .take(size)
        .map(|(id, doc)| (id.clone(), doc.clone()))
        .collect();
    let next = start + size;

    let mut body = json!({ "data": page });
    if next < docs.len() {
        body["pageState"] = json!(next.to_string());
    }
    Json(body).into_response()
}

async fn get_doc(
    State(state): State<Shared>,
    Path((_ns, col, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    match state.collections.get(&col).and_then(|docs| docs.get(&id)) {
        Some(doc) => Json(json!({ "documentId": id, "data": doc })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn replace_doc(
    State(state): State<Shared>,
    Path((_ns, col, id)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(doc): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    match state.collections.get_mut(&col).and_then(|docs| docs.get_mut(&id)) {
        Some(slot) => {
            *slot = doc;
            Json(json!({ "documentId": id })).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_doc(
    State(state): State<Shared>,
    Path((_ns, col, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    match state.collections.get_mut(&col).and_then(|docs| docs.remove(&id)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn start_astra() -> String {
    let app = Router::new()
        .route(
            "/api/rest/v2/namespaces/:ns/collections/:col",
            get(list_docs).post(create_doc),
        )
        .route(
            "/api/rest/v2/namespaces/:ns/collections/:col/:id",
            get(get_doc).put(replace_doc).delete(delete_doc),
        )
        .with_state(Shared::default());
    start_mock(app).await
}

fn store(base_url: String, token: &str) -> AstraDocumentStore {
    AstraDocumentStore::new(AstraConfig {
        base_url,
        namespace: "profiles".into(),
        token: token.into(),
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Note {
    text: String,
}

impl Document for Note {
    const COLLECTION: &'static str = "notes";
}

fn note(text: &str) -> Note {
    Note { text: text.into() }
}

#[tokio::test]
async fn crud_round_trip() {
    let store = store(start_astra().await, TOKEN);
    let notes = store.documents::<Note>();

    let id = notes.create(&note("first")).await.unwrap().unwrap();
    assert_eq!(notes.get(&id.document_id).await.unwrap(), Some(note("first")));

    let ack = notes.replace(&id.document_id, &note("second")).await.unwrap();
    assert_eq!(ack, Some(id.clone()));
    assert_eq!(notes.get(&id.document_id).await.unwrap(), Some(note("second")));

    assert!(notes.delete(&id.document_id).await.unwrap().deleted);
    assert_eq!(notes.get(&id.document_id).await.unwrap(), None);
}

#[tokio::test]
async fn misses_are_explicit() {
    let store = store(start_astra().await, TOKEN);

    assert_eq!(store.get::<Note>("missing").await.unwrap(), None);
    assert_eq!(store.replace("missing", &note("x")).await.unwrap(), None);
    assert!(!store.delete::<Note>("missing").await.unwrap().deleted);
}

#[tokio::test]
async fn find_follows_page_state() {
    let store = store(start_astra().await, TOKEN);

    for i in 0..45 {
        store.create(&note(&format!("n{i}"))).await.unwrap();
    }

    let found = store.find::<Note>().await.unwrap();
    assert_eq!(found.len(), 45);
    assert!(found.iter().any(|stored| stored.data == note("n44")));
}

#[tokio::test]
async fn find_on_empty_collection() {
    let store = store(start_astra().await, TOKEN);
    assert!(store.find::<Note>().await.unwrap().is_empty());
}

#[tokio::test]
async fn bad_token_is_a_status_error() {
    let store = store(start_astra().await, "wrong");

    let err = store.create(&note("x")).await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 401, .. }));
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    let store = store("http://127.0.0.1:1".into(), TOKEN);

    let err = store.get::<Note>("x").await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}

#[tokio::test]
async fn profile_service_over_astra() {
    let store = store(start_astra().await, TOKEN);
    let service = ProfileService::new(store, StaticLookup::new().with("London", LONDON));

    let id = service
        .create(ProfileInput {
            username: Some("ada".into()),
            location: Some("London".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let stored = service.find_one(&id.document_id).await.unwrap();
    assert_eq!(stored.data.username.as_deref(), Some("ada"));
    assert_eq!(stored.data.location, Some(LONDON));
    assert_eq!(service.find_all().await.len(), 1);

    assert!(service.remove(&id.document_id).await.unwrap().is_some());
    assert!(service.find_all().await.is_empty());
}

#[tokio::test]
async fn ids_with_reserved_characters_never_reach_another_document() {
    let store = store(start_astra().await, TOKEN);
    let service = ProfileService::new(store, StaticLookup::new());

    let id = service
        .create(ProfileInput {
            username: Some("ada".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let real = id.document_id.clone();

    for lookalike in [
        format!("{real}?x=1"),
        format!("{real}#frag"),
        format!("{real}/.."),
        format!("x/../{real}"),
        "..".to_string(),
    ] {
        let err = service.find_one(&lookalike).await.unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(_)), "find_one {lookalike}: {err}");

        let err = service
            .update(
                &lookalike,
                ProfileInput {
                    username: Some("mallory".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(_)), "update {lookalike}: {err}");

        let err = service.remove(&lookalike).await.unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(_)), "remove {lookalike}: {err}");
    }

    let stored = service.find_one(&real).await.unwrap();
    assert_eq!(stored.data.username.as_deref(), Some("ada"));
    assert_eq!(service.find_all().await.len(), 1);
}
