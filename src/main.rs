use anyhow::Context;
use clap::Parser;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderName, Method};
use parecer_daemon::config::{ensure_documents_dir, read_config, write_config};
use parecer_daemon::guide::GuideEngine;
use parecer_daemon::server::is_origin_allowed;
use parecer_daemon::server::proto::parecer_daemon_server::ParecerDaemonServer;
use parecer_daemon::utils::CONFIG_FILE;
use parecer_daemon::ParecerDaemonService;
use std::net::SocketAddr;
use std::path::PathBuf;
use tonic::transport::Server;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:50061";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost,https://localhost,http://127.0.0.1,https://127.0.0.1";

/// Parecer Daemon - lets students look up and download the documents mapped to them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "PARECER_DAEMON_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Comma-separated list of allowed CORS origins.
    /// Use "*" to allow all origins.
    #[arg(
        long,
        env = "PARECER_CORS_ORIGINS",
        default_value = DEFAULT_CORS_ORIGINS,
        value_delimiter = ','
    )]
    cors_origins: Vec<String>,

    /// Path to the JSON config file
    #[arg(short, long, env = "PARECER_CONFIG", default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Spreadsheet mapping students to documents (overrides the config file)
    #[arg(long, env = "PARECER_SHEET")]
    sheet: Option<PathBuf>,

    /// Folder holding the local documents (overrides the config file)
    #[arg(long, env = "PARECER_DOCUMENTS_DIR")]
    documents_dir: Option<PathBuf>,

    /// Write the effective config to --config and exit
    #[arg(long)]
    init_config: bool,
}

// Include the file descriptor set for gRPC reflection
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("parecer_descriptor");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = read_config(&args.config)
        .await
        .with_context(|| format!("Failed to read config {}", args.config.display()))?
        .unwrap_or_default()
        .with_overrides(args.sheet.clone(), args.documents_dir.clone());

    if args.init_config {
        write_config(&args.config, &config)
            .await
            .with_context(|| format!("Failed to write config {}", args.config.display()))?;
        info!("Wrote config to {}", args.config.display());
        return Ok(());
    }

    ensure_documents_dir(&config)
        .await
        .with_context(|| format!("Failed to create {}", config.documents_dir.display()))?;

    if !config.sheet_path.exists() {
        warn!(
            "Spreadsheet not found: {}. Requests will fail until it is in place.",
            config.sheet_path.display()
        );
    }

    let guide = match &config.guide_path {
        Some(path) => GuideEngine::from_file(path)
            .await
            .with_context(|| format!("Failed to load guide template {}", path.display()))?,
        None => GuideEngine::new().context("Failed to build the built-in guide")?,
    };

    let addr: SocketAddr = args
        .addr
        .parse()
        .with_context(|| format!("Invalid address {}", args.addr))?;

    // Process CORS origins
    let cors_origins: Vec<String> = args
        .cors_origins
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let allow_all_origins = cors_origins.iter().any(|o| o == "*");

    info!(
        "CORS origins: {}",
        if allow_all_origins {
            "*".to_string()
        } else {
            cors_origins.join(", ")
        }
    );

    info!(
        sheet = %config.sheet_path.display(),
        documents_dir = %config.documents_dir.display(),
        "Serving student documents"
    );

    let service = ParecerDaemonService::new(config, guide);

    // Create reflection service
    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    // Configure CORS for gRPC-Web
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            if allow_all_origins {
                return true;
            }

            origin
                .to_str()
                .map(|origin_str| is_origin_allowed(origin_str, &cors_origins))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static("x-grpc-web"),
            HeaderName::from_static("x-user-agent"),
            HeaderName::from_static("grpc-timeout"),
        ])
        .expose_headers([
            HeaderName::from_static("grpc-status"),
            HeaderName::from_static("grpc-message"),
            HeaderName::from_static("grpc-status-details-bin"),
        ]);

    info!("Starting Parecer daemon on {} (gRPC + gRPC-Web)", addr);

    Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(cors)
        .layer(tonic_web::GrpcWebLayer::new())
        .add_service(reflection_service)
        .add_service(ParecerDaemonServer::new(service))
        .serve_with_shutdown(addr, async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received shutdown signal, stopping server..."),
                Err(e) => {
                    warn!("Unable to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    info!("Parecer daemon stopped");
    Ok(())
}
