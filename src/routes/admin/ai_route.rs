use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{routes::api_error::ApiError, services::GeminiClient};

use super::auth::AdminUser;

#[derive(Deserialize)]
pub struct GenerateBody {
    prompt: String,
    model: Option<String>,
}

#[post("/generate")]
pub async fn generate(
    _admin: AdminUser,
    gemini: web::Data<Option<GeminiClient>>,
    body: web::Json<GenerateBody>,
) -> Result<HttpResponse, ApiError> {
    let client = gemini.get_ref().as_ref().ok_or(ApiError::Unavailable)?;
    let model = client.resolve_model(body.model.as_deref());

    let text = client.generate(&model, &body.prompt).await.map_err(|e| {
        log::error!("Gemini generation failed with model {}: {}", model, e);
        ApiError::internal("Failed to generate content", Some(e.to_string()))
    })?;

    Ok(HttpResponse::Ok().json(json!({ "model": model, "text": text })))
}
