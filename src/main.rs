use actix_web::{web, App, HttpServer};
use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::info;

use submerge::interfaces::{convert_url, SubconverterConfigBuilder};
use submerge::settings::init_settings;
use submerge::utils::http::HttpFetcher;
use submerge::web_handlers::{self, AppState};

/// Convert and merge proxy subscriptions into client configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Subscription URL to process directly instead of starting the server
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Output file path for subscription conversion (must be used with --url)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,

    /// Target format for --url
    #[arg(short, long, value_name = "TARGET", default_value = "clash")]
    target: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.url.is_some() != args.output.is_some() {
        bail!("--url and -o/--output must be used together");
    }

    let config_path = args.config.as_deref().unwrap_or("");
    let settings = init_settings(config_path)
        .with_context(|| format!("failed to load settings from '{}'", config_path))?;

    env_logger::init_from_env(Env::default().default_filter_or(settings.log_level.as_str()));
    if !config_path.is_empty() {
        info!("Loaded settings from {}", config_path);
    }

    let fetcher = HttpFetcher::new(&settings.fetch).context("failed to build HTTP client")?;

    if let (Some(url), Some(output_file)) = (args.url.as_deref(), args.output.as_deref()) {
        info!(
            "Processing subscription from URL: {} to file: {}",
            url, output_file
        );
        let config = SubconverterConfigBuilder::with_defaults(&settings.defaults)
            .target_from_str(&args.target)
            .build()?;
        let output = convert_url(&fetcher, url, &config).await?;
        tokio::fs::write(output_file, output.content)
            .await
            .with_context(|| format!("failed to write {}", output_file))?;
        info!("Successfully wrote subscription to {}", output_file);
        return Ok(());
    }

    let listen_address = args
        .address
        .unwrap_or_else(|| settings.server.listen_address.clone());
    let listen_port = args.port.unwrap_or(settings.server.listen_port);
    let app_state = web::Data::new(AppState::new(fetcher));

    info!("submerge starting on {}:{}", listen_address, listen_port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(web_handlers::config)
    })
    .bind((listen_address.as_str(), listen_port))?
    .workers(settings.server.max_concur_threads.max(1))
    .run()
    .await?;

    Ok(())
}
