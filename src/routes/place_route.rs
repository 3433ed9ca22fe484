use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{domain::place::PlacesInput, services::PlaceValidator};

#[derive(Deserialize)]
pub struct CheckPlaceQuery {
    name: String,
}

#[get("/check")]
pub async fn check_place(
    validator: web::Data<PlaceValidator>,
    query: web::Query<CheckPlaceQuery>,
) -> HttpResponse {
    let in_india = validator.is_place_in_india(&query.name).await;
    HttpResponse::Ok().json(json!({ "place": query.name.trim(), "inIndia": in_india }))
}

#[derive(Deserialize)]
pub struct ValidatePlacesBody {
    places: PlacesInput,
}

#[post("/validate")]
pub async fn validate_places(
    validator: web::Data<PlaceValidator>,
    body: web::Json<ValidatePlacesBody>,
) -> HttpResponse {
    let result = validator.validate_places(body.into_inner().places).await;
    HttpResponse::Ok().json(result)
}
