use clap::Parser;
use recx_api::{ApiState, RestApi};
use recx_catalog::{CatalogHandle, CatalogSource};
use recx_core::{RankerConfig, DEFAULT_MAX_SUGGESTIONS, DEFAULT_SUGGESTIONS, DEFAULT_THRESHOLD};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Content-based product recommender
#[derive(Parser, Debug)]
#[command(name = "recx")]
#[command(about = "Find the catalog product closest to a free-text description", long_about = None)]
struct Args {
    /// Path to the catalog CSV
    #[arg(short, long, default_value = "group6.csv")]
    catalog: PathBuf,

    /// Extra word list for Vietnamese segmentation, one word per line
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// HTTP API port
    #[arg(long, default_value_t = 8501)]
    http_port: u16,

    /// Minimum similarity for a match
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f32,

    /// Suggestions shown after the primary match
    #[arg(long, default_value_t = DEFAULT_SUGGESTIONS)]
    suggestions: usize,

    /// Upper bound on the suggestion window
    #[arg(long, default_value_t = DEFAULT_MAX_SUGGESTIONS)]
    max_suggestions: usize,

    /// Run one query, print the result as JSON and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting recx v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);

    let config = RankerConfig {
        threshold: args.threshold,
        max_suggestions: args.max_suggestions,
    };
    let mut source = CatalogSource::new(&args.catalog).with_config(config);
    if let Some(dictionary) = &args.dictionary {
        source = source.with_dictionary(dictionary);
    }

    let catalog = Arc::new(CatalogHandle::open(source)?);

    if let Some(query) = args.query {
        let result = catalog.current().recommend(&query, args.suggestions);
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let state = ApiState::new(catalog).with_default_window(args.suggestions);
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("recx started successfully");
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
