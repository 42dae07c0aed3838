use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::error::ApiError;
use crate::models::{CreateUserRecord, UpdateUserRecord, UserRecord};
use crate::services::UserRecordService;

#[derive(Clone)]
pub struct UsersAppState {
    pub service: UserRecordService,
}

pub fn users_routes(service: UserRecordService) -> Router {
    let shared_state = UsersAppState { service };

    // `GET /users/:key` reads the segment as a profession, `PUT` as an id.
    Router::new()
        .route("/", get(list_users))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:key",
            get(list_users_by_profession).put(update_user),
        )
        .with_state(shared_state)
}

/// List every stored record
#[tracing::instrument(skip(state))]
pub async fn list_users(
    State(state): State<UsersAppState>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let records = state.service.list_records().await?;
    Ok(Json(records))
}

/// List records with an exact profession match, 404 when there are none
#[tracing::instrument(skip(state))]
pub async fn list_users_by_profession(
    State(state): State<UsersAppState>,
    WithRejection(Path(profesion), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let records = state.service.list_records_by_profession(&profesion).await?;

    if records.is_empty() {
        tracing::warn!(%profesion, "No personas with this profession");
        return Err(ApiError::not_found(format!(
            "No users found with profession {:?}",
            profesion
        )));
    }

    Ok(Json(records))
}

/// Create a record and return it with its assigned id
#[tracing::instrument(skip(state, input))]
pub async fn create_user(
    State(state): State<UsersAppState>,
    WithRejection(Json(input), _): WithRejection<Json<CreateUserRecord>, ApiError>,
) -> Result<(StatusCode, Json<UserRecord>), ApiError> {
    input.validate()?;

    let record = state.service.create_record(input).await?;
    tracing::info!(id = record.id, "Created persona");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Overwrite the record `id`
#[tracing::instrument(skip(state, input))]
pub async fn update_user(
    State(state): State<UsersAppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateUserRecord>, ApiError>,
) -> Result<Json<UserRecord>, ApiError> {
    input.validate()?;

    match state.service.update_record(id, input).await? {
        Some(record) => {
            tracing::info!(id, "Updated persona");
            Ok(Json(record))
        }
        None => {
            tracing::warn!(id, "Update of unknown persona");
            Err(ApiError::not_found(format!("User {} not found", id)))
        }
    }
}
