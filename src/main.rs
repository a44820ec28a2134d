use actix_web::{web, App, HttpServer};
use manga_catalog_scraper::api;
use manga_catalog_scraper::catalog::Catalog;
use manga_catalog_scraper::config::Config;

const LOG_CONFIG: &str = "log4rs.yml";

fn init_logging() {
    if let Err(e) = log4rs::init_file(LOG_CONFIG, Default::default()) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::warn!("{} not loaded ({}), logging to stderr", LOG_CONFIG, e);
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let cfg = Config::load();

    log::info!("Catalog scraper starting:");
    log::info!("  Site: {}", cfg.site.base_url);
    log::info!("  Headless: {}", cfg.browser.headless);
    log::info!(
        "  Timeouts: navigation {}s, render {}s",
        cfg.browser.navigation_timeout_secs,
        cfg.browser.render_timeout_secs
    );
    log::info!("  Category cache TTL: {}s", cfg.categories.cache_ttl_secs);

    let data = web::Data::new(Catalog::from_config(&cfg));

    // Try the configured port, then the next few
    let mut last_err: Option<std::io::Error> = None;
    for port in cfg.server.port..=cfg.server.port.saturating_add(10) {
        let data_clone = data.clone();
        let addr = format!("{}:{}", cfg.server.host, port);
        match HttpServer::new(move || {
            App::new()
                .app_data(data_clone.clone())
                .configure(api::configure)
        })
        .bind(&addr)
        {
            Ok(server) => {
                log::info!("Listening on http://{}", addr);
                return server.run().await;
            }
            Err(e) => {
                log::warn!("Could not bind {}: {}", addr, e);
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| std::io::Error::other("no port available")))
}
