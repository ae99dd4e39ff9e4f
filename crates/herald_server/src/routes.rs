//! Route handlers.

use crate::error::ApiError;
use crate::models::{CreateMacroRequest, GuildQuery, MacroDto, TemperatureToggleRequest};
use crate::server::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use herald_core::{GuildIdentity, Requester};
use serde_json::{Value, json};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /guilds/{guild_id}/macros`: the guild's macros, sorted by name.
pub async fn list_macros(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Query(query): Query<GuildQuery>,
) -> Result<Json<Vec<MacroDto>>, ApiError> {
    let guild = GuildIdentity::new(guild_id, query.guild_name)?;
    let macros = state.store.list_macros(&guild).await?;
    Ok(Json(macros.into_iter().map(MacroDto::from).collect()))
}

/// `POST /guilds/{guild_id}/macros`: create a macro authored by the
/// requesting user.
pub async fn create_macro(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Query(query): Query<GuildQuery>,
    headers: HeaderMap,
    Json(body): Json<CreateMacroRequest>,
) -> Result<(StatusCode, Json<MacroDto>), ApiError> {
    let guild = GuildIdentity::new(guild_id, query.guild_name)?;
    let requester = requester_from_headers(&headers);
    let created = state
        .store
        .create_macro(&guild, &body.name, &body.message, &requester)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /guilds/{guild_id}/macros/{name}`: fetch one macro,
/// case-insensitively.
pub async fn get_macro(
    State(state): State<AppState>,
    Path((guild_id, name)): Path<(u64, String)>,
    Query(query): Query<GuildQuery>,
) -> Result<Json<MacroDto>, ApiError> {
    let guild = GuildIdentity::new(guild_id, query.guild_name)?;
    let found = state.store.get_macro(&guild, &name).await?;
    Ok(Json(found.into()))
}

/// `DELETE /guilds/{guild_id}/macros/{name}`: remove a macro; requires
/// admin access.
pub async fn delete_macro(
    State(state): State<AppState>,
    Path((guild_id, name)): Path<(u64, String)>,
    Query(query): Query<GuildQuery>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let guild = GuildIdentity::new(guild_id, query.guild_name)?;
    let requester = requester_from_headers(&headers);
    state.store.delete_macro(&guild, &name, &requester).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /guilds/{guild_id}/config`: the guild's configuration record,
/// defaults merged in.
pub async fn get_config(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Query(query): Query<GuildQuery>,
) -> Result<Json<Value>, ApiError> {
    let guild = GuildIdentity::new(guild_id, query.guild_name)?;
    let config = state.store.get_config(&guild).await?;
    Ok(Json(config.to_value()))
}

/// `PUT /guilds/{guild_id}/config/temperature`: toggle the temperature
/// event; requires admin access.
pub async fn set_temperature(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Query(query): Query<GuildQuery>,
    headers: HeaderMap,
    Json(body): Json<TemperatureToggleRequest>,
) -> Result<Json<Value>, ApiError> {
    let guild = GuildIdentity::new(guild_id, query.guild_name)?;
    let requester = requester_from_headers(&headers);
    state
        .store
        .checker()
        .require_admin(&requester, "set_temperature")?;
    let updated = state
        .store
        .set_temperature_enabled(&guild, body.enabled)
        .await?;
    Ok(Json(updated.to_value()))
}

/// Rebuild the acting user from the headers the auth front-end injects.
/// Absent headers yield an anonymous requester, which simply satisfies no
/// policy.
pub fn requester_from_headers(headers: &HeaderMap) -> Requester {
    let id = header_str(headers, "x-herald-user-id")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let name = header_str(headers, "x-herald-user-name")
        .unwrap_or_default()
        .to_string();
    Requester::new(
        id,
        name,
        header_list(headers, "x-herald-roles"),
        header_list(headers, "x-herald-permissions"),
    )
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn header_list(headers: &HeaderMap, name: &str) -> Vec<String> {
    header_str(headers, name)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
