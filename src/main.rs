use flocksim::{Scenario, ScenarioConfig};
use flocksim::{bench_neighbors, bench_step};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "default.yaml")]
    file_name: String,

    /// Override `engine.steps` from the scenario
    #[arg(long)]
    steps: Option<u64>,

    /// Run the benchmark suite instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_neighbors();
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    let steps = args.steps.unwrap_or(scenario.engine.steps);
    info!("running {} steps", steps);
    scenario.run(steps);

    let stats = scenario.last_tree_stats();
    info!(
        "done after {} steps: mean speed {:.6}, last tree {} nodes / {} leaves, depth {}",
        scenario.step,
        scenario.mean_speed(),
        stats.node_count,
        stats.leaf_count,
        stats.max_depth
    );

    Ok(())
}
