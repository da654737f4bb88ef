// Main entry point - Builds the dashboard once, then serves it
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fish_dashboard::application::dashboard_service::DashboardService;
use fish_dashboard::infrastructure::config::load_dashboard_config;
use fish_dashboard::infrastructure::excel_workbook::ExcelWorkbook;
use fish_dashboard::infrastructure::html_renderer::render_page;
use fish_dashboard::presentation::app_state::AppState;
use fish_dashboard::presentation::router::router;

#[derive(Parser, Debug)]
#[command(name = "fish-dashboard")]
#[command(author, version, about = "National fish commodity dashboard")]
struct Args {
    /// Verbose logging of the startup pipeline and requests
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Build everything before accepting a request; any failure ends the process
    let mut workbook = ExcelWorkbook::open(&config.workbook.path)?;
    let dashboard = DashboardService::new(config.charts.clone())
        .build(&mut workbook)
        .with_context(|| format!("building dashboard from {}", config.workbook.path.display()))?;
    let page = render_page(&dashboard)?;
    tracing::info!("Rendered dashboard page ({} bytes)", page.len());

    let state = Arc::new(AppState::new(page));
    let app = router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.server.host, config.server.port))?;
    tracing::info!("Starting fish-dashboard on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
