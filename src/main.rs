use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

use director_benefits::app::BenefitsSource;
use director_benefits::config::Config;
use director_benefits::infra::ReqwestSource;
use director_benefits::logging;
use director_benefits::observability;
use director_benefits::presentation::DirectorBoard;
use director_benefits::server::{self, AppState};

#[derive(Parser)]
#[command(name = "director_benefits")]
#[command(about = "Rank company directors by total benefits from the HMRC benefits API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset once and print the ranked table
    Show {
        /// Field shown in the dimension column
        #[arg(long)]
        dimension: Option<String>,
        /// Field to sort by (defaults to totalBenefits)
        #[arg(long)]
        sort: Option<String>,
        /// Report the load as a forced refresh
        #[arg(long)]
        refresh: bool,
        /// Print rows and status as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the dimension and sort fields offered by the current dataset
    Fields,
    /// Serve the board over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let source = ReqwestSource::new(&config.source).context("Failed to build HTTP client")?;
    let mut board = DirectorBoard::new(config.board.top_limit);

    match cli.command {
        Commands::Show {
            dimension,
            sort,
            refresh,
            json,
        } => {
            board.load_data(&source, refresh).await;

            if let Some(key) = dimension.as_deref() {
                if !board.select_dimension(key) {
                    warn!(dimension = key, "Dimension not offered by this dataset, keeping default");
                }
            }
            if let Some(key) = sort.as_deref() {
                if !board.select_sort(key) {
                    warn!(sort = key, "Sort field not offered by this dataset, keeping default");
                }
            }

            let table = board.render_table();
            if json {
                let output = serde_json::json!({
                    "status": board.status(),
                    "origin": board.origin(),
                    "table": table,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}\n", board.status().message);
                println!("{}", table.to_text());
            }
        }
        Commands::Fields => {
            board.load_data(&source, false).await;

            let controls = board.controls();
            println!("Dimensions:");
            for option in controls.dimensions() {
                println!("  {:<20} {}", option.key, option.label);
            }
            println!("Sort fields:");
            for option in controls.sort_fields() {
                println!("  {:<20} {}", option.key, option.label);
            }
        }
        Commands::Serve { port } => {
            let source: Arc<dyn BenefitsSource> = Arc::new(source);
            let mut state = AppState::new(board, source);
            match observability::init() {
                Ok(handle) => state = state.with_metrics(handle),
                Err(e) => warn!(error = %e, "Serving without /metrics"),
            }

            // First load runs in the background; the page shows the loading banner meanwhile
            let initial = state.clone();
            tokio::spawn(async move {
                server::refresh_board(&initial, false).await;
            });

            info!(port, "Starting director benefits board");
            server::start_server(state, port)
                .await
                .context("HTTP server failed")?;
        }
    }

    Ok(())
}
