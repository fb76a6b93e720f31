use actix_web::{App, HttpServer, middleware, web};
use tokio::sync::mpsc;

use attendance_dashboard::config::AppConfig;
use attendance_dashboard::state::AppState;
use attendance_dashboard::store::{self, RecordStore};
use attendance_dashboard::{feed, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("{e}");
        std::io::Error::other(e.to_string())
    })?;
    let client = feed::client().map_err(|e| std::io::Error::other(e.to_string()))?;

    // Single writer: the ingest task owns the store, the network task hands it snapshots
    let store = RecordStore::new();
    let reader = store.reader();
    let (tx, rx) = mpsc::channel(8);
    let ingest = store::spawn_ingest(store, rx);
    let subscription = feed::subscribe(
        client,
        config.feed_endpoint(),
        config.reconnect_delay,
        tx,
    );

    let state = AppState::new(reader, config.display_zone);
    log::info!("Dates are shown in {}", config.display_zone);

    log::info!("Starting server at http://{}", config.bind_addr);

    let result = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await;

    // Release the feed before exiting
    subscription.close();
    ingest.abort();
    log::info!("Feed subscription closed");

    result
}
