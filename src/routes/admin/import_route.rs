use actix_multipart::{Multipart, MultipartError};
use actix_web::{http::header, web, HttpResponse};
use futures::TryStreamExt;
use serde_json::json;

use crate::{
    routes::api_error::ApiError,
    services::{
        import_rows, import_template, read_first_sheet, ImportKind, RecordStore,
        XLSX_CONTENT_TYPE,
    },
};

use super::auth::AdminUser;

pub async fn bulk_import(
    kind: ImportKind,
    admin: &AdminUser,
    payload: Multipart,
    store: &dyn RecordStore,
    max_upload_bytes: usize,
) -> Result<HttpResponse, ApiError> {
    let import_failed = |details: String| {
        log::error!("Bulk import error: {}", details);
        ApiError::internal(format!("Failed to import {}", kind.plural()), Some(details))
    };

    let bytes = match read_upload(payload, max_upload_bytes).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Err(ApiError::BadRequest("No file uploaded")),
        Err(UploadError::TooLarge) => return Err(ApiError::BadRequest("Uploaded file is too large")),
        Err(UploadError::Malformed(e)) => return Err(import_failed(e.to_string())),
    };

    let rows = web::block(move || read_first_sheet(bytes))
        .await
        .map_err(|e| import_failed(e.to_string()))?
        .map_err(|e| import_failed(e.to_string()))?;

    if rows.is_empty() {
        return Err(ApiError::BadRequest("Excel file is empty or invalid"));
    }

    log::info!(
        "{} importing {} {} rows",
        admin.email,
        rows.len(),
        kind.plural()
    );
    let report = import_rows(store, &kind, &rows, &admin.user_id).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": report.message(),
        "results": report,
    })))
}

enum UploadError {
    TooLarge,
    Malformed(MultipartError),
}

/// Bytes of the multipart field named `file`, if one was sent.
async fn read_upload(
    mut payload: Multipart,
    max_upload_bytes: usize,
) -> Result<Option<Vec<u8>>, UploadError> {
    while let Some(mut field) = payload.try_next().await.map_err(UploadError::Malformed)? {
        if field.name() != Some("file") {
            while field.try_next().await.map_err(UploadError::Malformed)?.is_some() {}
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(UploadError::Malformed)? {
            if bytes.len() + chunk.len() > max_upload_bytes {
                return Err(UploadError::TooLarge);
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(Some(bytes));
    }

    Ok(None)
}

pub fn template_download(kind: ImportKind) -> Result<HttpResponse, ApiError> {
    let template = import_template(&kind).map_err(|e| {
        log::error!("Template generation error: {:?}", e);
        ApiError::internal("Failed to generate template", None)
    })?;

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", template.filename),
        ))
        .body(template.bytes))
}
