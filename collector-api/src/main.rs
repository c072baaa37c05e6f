use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use collector_api::routes::marketplace;
use collector_market::{AppConfig, OpenSeaGateway};

/// Proxy service between the collector front end and the marketplace API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    config_path: String,
}

/// Initializes the logging, ensuring that the `RUST_LOG` environment
/// variable is always considered first.
fn init_logging() {
    const DEFAULT_LOG_FILTER: &str = "info";

    tracing::subscriber::set_global_default(
        fmt::Subscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .or(EnvFilter::try_new(DEFAULT_LOG_FILTER))
                    .expect("Invalid RUST_LOG filters"),
            )
            .finish(),
    )
    .expect("Failed to set the global tracing subscriber");
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let args = Args::parse();
    let config = AppConfig::load_from_file(&args.config_path)
        .map_err(|error| anyhow::anyhow!("failed to load the configuration: {error}"))?;

    let gateway = OpenSeaGateway::new(&config)
        .context("failed to build the marketplace gateway")?;
    let gateway = web::Data::new(gateway);

    let port = config.port;
    tracing::info!(port, "starting collector-api");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(gateway.clone())
            .configure(marketplace::config::<OpenSeaGateway>)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
    .context("server terminated")
}
