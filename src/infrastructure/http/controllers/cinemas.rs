use crate::{
    domain::entities::*,
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

/// POST /cinemas - Create a cinema with N free seats
pub async fn create_cinema(
    State(state): State<AppState>,
    payload: Result<Json<CreateCinemaRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateCinemaResponse>)> {
    let Json(request) = payload?;
    let cinema = state.cinema_service.create_cinema(request.seats).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCinemaResponse { id: cinema.id }),
    ))
}

/// GET /cinemas/:id - Current seat map
pub async fn get_cinema(
    State(state): State<AppState>,
    Path(cinema_id): Path<String>,
) -> ApiResult<Json<CinemaResponse>> {
    let cinema = state.cinema_service.get_cinema(&cinema_id).await?;
    Ok(Json(cinema.into()))
}

/// POST /cinemas/:id/purchase - Purchase a specific seat
pub async fn purchase_seat(
    State(state): State<AppState>,
    Path(cinema_id): Path<String>,
    payload: Result<Json<PurchaseSeatRequest>, JsonRejection>,
) -> ApiResult<Json<PurchaseSeatResponse>> {
    let Json(request) = payload?;
    let seat = state
        .reservation_service
        .purchase_seat(&cinema_id, request.seat_number)
        .await?;

    Ok(Json(PurchaseSeatResponse { seat }))
}

/// POST /cinemas/:id/purchase/consecutive - Purchase the first two adjacent free seats
pub async fn purchase_consecutive(
    State(state): State<AppState>,
    Path(cinema_id): Path<String>,
) -> ApiResult<Json<ConsecutivePurchaseResponse>> {
    let seats = state
        .reservation_service
        .purchase_consecutive_pair(&cinema_id)
        .await?;

    Ok(Json(ConsecutivePurchaseResponse { seats }))
}
