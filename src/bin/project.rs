use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use gaffer::config::ModelConfig;
use gaffer::data::{self, Boosters, H2hTable, LeagueCoefficients};
use gaffer::engine::{ProjectionEngine, ProjectionRecord};
use gaffer::print;
use gaffer::profile::{ProfileStore, StatsSources};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// directory holding the data files produced by the upstream fetch pipeline
    #[clap(short = 'd', long, default_value = ".")]
    data: PathBuf,

    /// fixtures file to project; defaults to fixtures.json inside the data directory
    #[clap(short = 'f', long)]
    fixtures: Option<PathBuf>,

    /// file to write the projection records to
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,

    /// number of Monte Carlo trials per fixture
    #[clap(short = 't', long)]
    trials: Option<usize>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.trials == Some(0) {
            bail!("--trials must be nonzero");
        }
        Ok(())
    }
}

/// The batch output file consumed by the rendering/notification layer.
#[derive(Debug, Serialize)]
struct SimResults {
    last_updated: String,
    matches: Vec<ProjectionRecord>,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let mut config = ModelConfig::default();
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    config.validate()?;

    let data_dir = &args.data;
    let teams = data::load_teams(data_dir.join("teams.json"));
    let coefficients = LeagueCoefficients::load(data_dir.join("league_coefficients.json"));
    let boosters = Boosters::load(data_dir.join("team_boosters.json"));
    let h2h = H2hTable::load(data_dir.join("h2h_and_odds.json"));
    let sources = StatsSources {
        manual: data::load_manual_dir(data_dir.join("team_stats")),
        current: data::load_split_dir(data_dir.join("team_stats_api/current")),
        prior: data::load_split_dir(data_dir.join("team_stats_api/prior")),
        continental: data::load_split_dir(data_dir.join("team_stats_api/europe")),
    };
    let profiles = ProfileStore::build(&teams, &sources, &config);
    info!("resolved {} team profile(s)", profiles.len());

    let fixtures_path = args
        .fixtures
        .unwrap_or_else(|| data_dir.join("fixtures.json"));
    let fixtures = data::load_fixtures(&fixtures_path)?;
    info!("{} fixture(s) sourced from {fixtures_path:?}", fixtures.len());

    let engine = ProjectionEngine::new(profiles, coefficients, boosters, h2h, config);
    let outcome = engine.project_batch(&fixtures);

    let renderer = Console::default();
    println!("{}", renderer.render(&print::tabulate_projections(&outcome.records)));
    if !outcome.failures.is_empty() {
        println!("{}", renderer.render(&print::tabulate_failures(&outcome)));
    }

    if let Some(out) = args.out {
        let results = SimResults {
            last_updated: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            matches: outcome.records,
        };
        data::write_json(&out, &results)?;
        info!("wrote {} projection record(s) to {out:?}", results.matches.len());
    }
    Ok(())
}
