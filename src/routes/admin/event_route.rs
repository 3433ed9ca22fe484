use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};

use crate::{
    configuration::ImportSettings,
    routes::api_error::ApiError,
    services::{ImportKind, RecordStore},
};

use super::{
    auth::AdminUser,
    import_route::{bulk_import, template_download},
};

#[post("/bulk-import")]
pub async fn bulk_import_events(
    admin: AdminUser,
    payload: Multipart,
    store: web::Data<dyn RecordStore>,
    settings: web::Data<ImportSettings>,
) -> Result<HttpResponse, ApiError> {
    bulk_import(
        ImportKind::Events,
        &admin,
        payload,
        store.get_ref(),
        settings.max_upload_bytes,
    )
    .await
}

#[get("/download-template")]
pub async fn download_event_template(_admin: AdminUser) -> Result<HttpResponse, ApiError> {
    template_download(ImportKind::Events)
}
