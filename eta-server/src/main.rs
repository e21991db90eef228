use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use eta_server::board::{LookupOutcome, LookupService};
use eta_server::config::ServerConfig;
use eta_server::console::{render_report, run_interactive};
use eta_server::mtr::{MockMtrClient, MtrClient, ScheduleBackend};
use eta_server::stations::StationDirectory;
use eta_server::web::{AppState, create_router};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,eta_server=debug";

/// MTR next-train arrival board.
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web board (default)
    Serve,
    /// Print one station's board and exit
    Lookup {
        /// Station name or code, e.g. "Central" or "CEN"
        station: String,
    },
    /// Read station names from stdin and print a board for each
    Interactive,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?;

    let backend = match &config.mock_dir {
        Some(dir) => {
            let mock = MockMtrClient::new(dir)?;
            info!(dir = %dir.display(), lines = mock.available().len(), "using mock schedules");
            ScheduleBackend::Mock(mock)
        }
        None => ScheduleBackend::Live(MtrClient::new(config.mtr.clone())?),
    };

    let directory = StationDirectory::builtin();
    let service = LookupService::new(backend, directory, config.mtr.timeout());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, service).await?,
        Command::Lookup { station } => {
            let report = service.lookup(&station).await;
            print!("{}", render_report(&report));
            if matches!(
                report.outcome,
                LookupOutcome::Unresolved(_) | LookupOutcome::AllFailed { .. }
            ) {
                std::process::exit(1);
            }
        }
        Command::Interactive => run_interactive(Arc::new(service)).await?,
    }

    Ok(())
}

async fn serve(
    config: ServerConfig,
    service: LookupService<ScheduleBackend>,
) -> Result<(), Box<dyn Error>> {
    let stations = service.directory().len();
    let app = create_router(AppState::new(service), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, stations, "MTR Next Train board listening");
    println!("Open http://{} in your browser for the web interface.", config.bind_addr);
    println!();
    println!("Endpoints:");
    println!("  GET  /health          - Health check");
    println!("  GET  /eta?station=    - Arrival board (HTML fragment or JSON)");
    println!("  GET  /api/stations    - Station directory");

    axum::serve(listener, app).await?;
    Ok(())
}
