use std::{net::TcpListener, sync::Arc, time::Duration};

use env_logger::Env;
use sqlx::postgres::PgPoolOptions;
use tripdesk::{
    configuration::get_configuration,
    routes::auth::AdminRegistry,
    services::{GeminiClient, PlaceValidator, WikipediaClient},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;

    let pool_options = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(15 * 60)); // 15 minutes

    let connection_pool = pool_options.connect_lazy_with(configuration.database.with_db());
    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;

    let wikipedia = WikipediaClient::new(&configuration.wikipedia.api_url)?;
    let place_validator = PlaceValidator::new(Arc::new(wikipedia));

    let gemini_client = match GeminiClient::new(&configuration.gemini) {
        Ok(client) => Some(client),
        Err(e) => {
            log::warn!("Generative AI disabled: {}", e);
            None
        }
    };

    if configuration.admin.accounts.is_empty() {
        log::warn!("No admin accounts configured; admin routes will reject every request");
    }
    let admin_registry = AdminRegistry::new(configuration.admin.accounts);

    log::info!("Listening on {}", address);
    run(
        listener,
        connection_pool,
        place_validator,
        gemini_client,
        admin_registry,
        configuration.import,
    )?
    .await?;

    Ok(())
}
