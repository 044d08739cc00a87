use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::plan::{LoopArgs, RouteArgs};

mod elevation_source;
mod parsers;
mod plan;
mod summary;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a loop of a given length around a start point
    #[command(name = "loop", visible_alias = "l")]
    Loop {
        #[command(flatten)]
        args: LoopArgs,
    },
    /// Plan the shortest route between two points
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Loop { args } => plan::run_loop(args).await?,
        Commands::Route { args } => plan::run_route(args).await?,
    }

    Ok(())
}
