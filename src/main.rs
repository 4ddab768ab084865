use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use districts::{
    scenario::ScenarioLoader,
    stats::AggregatedStats,
    telemetry,
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "District resource game data service")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/puget_sound.yaml")]
    scenario: PathBuf,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the aggregated stats of every district
    Stats,
    /// Write the generated resource points as GeoJSON to stdout
    Resources,
    /// Serve boundaries, resources and stats over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level);

    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let session = scenario.build_session(cli.seed)?;

    match cli.command {
        Command::Stats => print!("{}", stats_table(&session.all_stats())),
        Command::Resources => {
            println!(
                "{}",
                serde_json::to_string_pretty(&session.resources_geojson())?
            );
        }
        Command::Serve { host, port } => {
            web::run(session, WebServerConfig { host, port }).await?;
        }
    }
    Ok(())
}

fn stats_table(rows: &[AggregatedStats]) -> String {
    let mut out = format!(
        "{:>4}  {:<32} {:>5} {:>9} {:>6} {:>7} {:>5} {:>5}\n",
        "id", "district", "jobs", "education", "natRes", "housing", "pop", "money"
    );
    for stats in rows {
        out.push_str(&format!(
            "{:>4}  {:<32} {:>5} {:>9} {:>6} {:>7} {:>5} {:>5}\n",
            stats.player.boundary_id,
            stats.player.name,
            stats.jobs(),
            stats.education(),
            stats.natural_resource(),
            stats.housing(),
            stats.player.population,
            stats.player.money,
        ));
    }
    out
}
