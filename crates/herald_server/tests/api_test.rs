//! Handler-level tests for the dashboard API: the same store operations
//! the bot uses, driven through the HTTP adapter's extractors and error
//! mapping.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use herald_core::AccessPolicy;
use herald_server::routes;
use herald_server::{AppState, CreateMacroRequest, GuildQuery, TemperatureToggleRequest};
use herald_store::GuildStore;
use std::sync::Arc;

const GUILD_ID: u64 = 123456789012345678;

fn state(dir: &std::path::Path) -> AppState {
    let policy = AccessPolicy {
        admin_roles: vec!["admin".to_string()],
        admin_permissions: vec!["administrator".to_string()],
    };
    AppState {
        store: Arc::new(GuildStore::new(dir, policy).unwrap()),
    }
}

fn query() -> Query<GuildQuery> {
    Query(GuildQuery {
        guild_name: "Test Guild".to_string(),
    })
}

fn member_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-herald-user-id", "42".parse().unwrap());
    headers.insert("x-herald-user-name", "maker".parse().unwrap());
    headers.insert("x-herald-roles", "member".parse().unwrap());
    headers
}

fn admin_headers() -> HeaderMap {
    let mut headers = member_headers();
    headers.insert("x-herald-roles", "Admin".parse().unwrap());
    headers
}

fn create_body(name: &str, message: &str) -> Json<CreateMacroRequest> {
    Json(CreateMacroRequest {
        name: name.to_string(),
        message: message.to_string(),
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let Json(body) = routes::health().await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_then_list_and_fetch_case_insensitively() {
    let tmp = tempfile::tempdir().unwrap();
    let state = state(tmp.path());

    let (status, Json(created)) = routes::create_macro(
        State(state.clone()),
        Path(GUILD_ID),
        query(),
        member_headers(),
        create_body("Welcome", "hi"),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.created_by, 42);
    assert_eq!(created.created_by_name, "maker");

    let Json(listed) = routes::list_macros(State(state.clone()), Path(GUILD_ID), query())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Welcome");

    let Json(fetched) = routes::get_macro(
        State(state),
        Path((GUILD_ID, "WELCOME".to_string())),
        query(),
    )
    .await
    .unwrap();
    assert_eq!(fetched.message, "hi");
}

#[tokio::test]
async fn duplicate_create_maps_to_conflict() {
    let tmp = tempfile::tempdir().unwrap();
    let state = state(tmp.path());

    routes::create_macro(
        State(state.clone()),
        Path(GUILD_ID),
        query(),
        member_headers(),
        create_body("Welcome", "hi"),
    )
    .await
    .unwrap();

    let err = routes::create_macro(
        State(state),
        Path(GUILD_ID),
        query(),
        member_headers(),
        create_body("WELCOME", "other"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_macro_maps_to_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let state = state(tmp.path());

    let err = routes::get_macro(State(state), Path((GUILD_ID, "ghost".to_string())), query())
        .await
        .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn zero_guild_id_maps_to_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let state = state(tmp.path());

    let err = routes::list_macros(State(state), Path(0), query())
        .await
        .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_requires_admin_then_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let state = state(tmp.path());

    routes::create_macro(
        State(state.clone()),
        Path(GUILD_ID),
        query(),
        member_headers(),
        create_body("Welcome", "hi"),
    )
    .await
    .unwrap();

    let err = routes::delete_macro(
        State(state.clone()),
        Path((GUILD_ID, "welcome".to_string())),
        query(),
        member_headers(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);

    let status = routes::delete_macro(
        State(state.clone()),
        Path((GUILD_ID, "welcome".to_string())),
        query(),
        admin_headers(),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = routes::get_macro(
        State(state),
        Path((GUILD_ID, "welcome".to_string())),
        query(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn temperature_toggle_requires_admin_and_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let state = state(tmp.path());

    let err = routes::set_temperature(
        State(state.clone()),
        Path(GUILD_ID),
        query(),
        member_headers(),
        Json(TemperatureToggleRequest { enabled: false }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);

    let Json(updated) = routes::set_temperature(
        State(state.clone()),
        Path(GUILD_ID),
        query(),
        admin_headers(),
        Json(TemperatureToggleRequest { enabled: false }),
    )
    .await
    .unwrap();
    assert_eq!(updated["events"]["temperature"]["enabled"], false);

    let Json(config) = routes::get_config(State(state), Path(GUILD_ID), query())
        .await
        .unwrap();
    assert_eq!(config["events"]["temperature"]["enabled"], false);
}
