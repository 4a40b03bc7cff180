use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::dto::vehicle_dto::{
    BatchCreatedResponse, DimensionsQuery, UpdateFuelRequest, UpdateSpeedRequest, VehicleJson, WeightQuery,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::parse_path_number;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/batch", post(create_vehicles_batch))
        .route("/color/:color/year/:year", get(search_by_color_and_year))
        .route("/brand/:brand/between/:start_year/:end_year", get(search_by_brand))
        .route("/average_speed/brand/:brand", get(average_speed_by_brand))
        .route("/average_capacity/brand/:brand", get(average_capacity_by_brand))
        .route("/fuel_type/:fuel_type", get(by_fuel_type))
        .route("/transmission/:transmission", get(by_transmission))
        .route("/dimensions", get(by_dimensions))
        .route("/weight", get(by_weight))
        .route("/:id", get(get_vehicle).delete(delete_vehicle))
        .route("/:id/update_speed", put(update_speed))
        .route("/:id/update_fuel", put(update_fuel))
}

/// Igual que `json_body` para los parámetros de query
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(format!("invalid query string: {}", rejection.body_text())))
}

/// Convierte el rechazo del extractor JSON en un 400 con el formato de la API
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(format!("invalid request body: {}", rejection.body_text())))
}

async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<ApiResponse<BTreeMap<i64, VehicleJson>>>> {
    let response = state.vehicle_controller().list_all().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<VehicleJson>>> {
    let id = parse_path_number::<i64>("id", &id)?;
    let response = state.vehicle_controller().get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<VehicleJson>>)> {
    let body = json_body(payload)?;
    let response = state.vehicle_controller().create(body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn create_vehicles_batch(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<BatchCreatedResponse>>)> {
    let body = json_body(payload)?;
    let response = state.vehicle_controller().create_batch(body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn search_by_color_and_year(
    State(state): State<AppState>,
    Path((color, year)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<Vec<VehicleJson>>>> {
    let year = parse_path_number::<i32>("year", &year)?;
    let response = state.vehicle_controller().search_by_color_and_year(&color, year).await?;
    Ok(Json(response))
}

async fn search_by_brand(
    State(state): State<AppState>,
    Path((brand, start_year, end_year)): Path<(String, String, String)>,
) -> AppResult<Json<ApiResponse<Vec<VehicleJson>>>> {
    let start_year = parse_path_number::<i32>("start year", &start_year)?;
    let end_year = parse_path_number::<i32>("end year", &end_year)?;
    let response = state
        .vehicle_controller()
        .search_by_brand(&brand, start_year, end_year)
        .await?;
    Ok(Json(response))
}

async fn average_speed_by_brand(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> AppResult<Json<ApiResponse<f64>>> {
    let response = state.vehicle_controller().average_speed_by_brand(&brand).await?;
    Ok(Json(response))
}

async fn average_capacity_by_brand(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> AppResult<Json<ApiResponse<f64>>> {
    let response = state.vehicle_controller().average_capacity_by_brand(&brand).await?;
    Ok(Json(response))
}

async fn by_fuel_type(
    State(state): State<AppState>,
    Path(fuel_type): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<VehicleJson>>>> {
    let response = state.vehicle_controller().by_fuel_type(&fuel_type).await?;
    Ok(Json(response))
}

async fn by_transmission(
    State(state): State<AppState>,
    Path(transmission): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<VehicleJson>>>> {
    let response = state.vehicle_controller().by_transmission(&transmission).await?;
    Ok(Json(response))
}

async fn by_dimensions(
    State(state): State<AppState>,
    query: Result<Query<DimensionsQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<VehicleJson>>>> {
    let query = query_params(query)?;
    let response = state.vehicle_controller().by_dimensions(query).await?;
    Ok(Json(response))
}

async fn by_weight(
    State(state): State<AppState>,
    query: Result<Query<WeightQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<VehicleJson>>>> {
    let query = query_params(query)?;
    let response = state.vehicle_controller().by_weight(query).await?;
    Ok(Json(response))
}

async fn update_speed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSpeedRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<VehicleJson>>> {
    let id = parse_path_number::<i64>("id", &id)?;
    let request = json_body(payload)?;
    let response = state.vehicle_controller().update_speed(id, request.max_speed).await?;
    Ok(Json(response))
}

async fn update_fuel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFuelRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<VehicleJson>>> {
    let id = parse_path_number::<i64>("id", &id)?;
    let request = json_body(payload)?;
    let response = state.vehicle_controller().update_fuel(id, &request.fuel_type).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_path_number::<i64>("id", &id)?;
    let response = state.vehicle_controller().delete(id).await?;
    Ok(Json(response))
}
