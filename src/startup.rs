use std::{net::TcpListener, sync::Arc};

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use crate::{
    configuration::ImportSettings,
    routes::{
        ai_route, auth::AdminRegistry, default_route, event_route, hotel_route, place_route,
    },
    services::{GeminiClient, PlaceValidator, RecordStore},
};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    place_validator: PlaceValidator,
    gemini_client: Option<GeminiClient>,
    admin_registry: AdminRegistry,
    import_settings: ImportSettings,
) -> Result<Server, std::io::Error> {
    let record_store: Arc<dyn RecordStore> = Arc::new(db_pool);
    let record_store = web::Data::from(record_store);
    let place_validator = web::Data::new(place_validator);
    let gemini_client = web::Data::new(gemini_client);
    let admin_registry = web::Data::new(admin_registry);
    let import_settings = web::Data::new(import_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(
                web::scope("/places")
                    .service(place_route::check_place)
                    .service(place_route::validate_places),
            )
            .service(
                web::scope("/admin")
                    .service(
                        web::scope("/events")
                            .service(event_route::bulk_import_events)
                            .service(event_route::download_event_template),
                    )
                    .service(
                        web::scope("/hotels")
                            .service(hotel_route::bulk_import_hotels)
                            .service(hotel_route::download_hotel_template),
                    )
                    .service(web::scope("/ai").service(ai_route::generate)),
            )
            .app_data(record_store.clone())
            .app_data(place_validator.clone())
            .app_data(gemini_client.clone())
            .app_data(admin_registry.clone())
            .app_data(import_settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
