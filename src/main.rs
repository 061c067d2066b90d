use diskpack::{ScenarioConfig, Scenario, RunModeConfig};
use diskpack::{Driver, CsvLog, Observer, NullObserver};
use diskpack::{bench_forces, bench_verlet_curve, serialize_configuration};

use clap::Parser;
use anyhow::{Context, Result};

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Soft-disk packing simulator")]
struct Args {
    /// Scenario YAML, as given or under the crate's scenarios/ directory
    #[arg(short, default_value = "packing.yaml")]
    file_name: PathBuf,

    /// Override the scenario's random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print force and step timing curves instead of running a scenario
    #[arg(long)]
    bench: bool,
}

fn load_scenario_from_yaml(file_name: &Path) -> Result<ScenarioConfig> {
    let config_path = if file_name.exists() {
        file_name.to_path_buf()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let text = fs::read_to_string(&config_path)
        .with_context(|| format!("reading scenario {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_yaml_str(&text)?;
    Ok(scenario_cfg)
}

/// A log that cannot be opened is reported and the run goes on without one
fn open_log(cfg: &ScenarioConfig) -> Option<CsvLog> {
    let out_file = cfg.output.out_file.as_ref()?;
    let opened = CsvLog::create(out_file).and_then(|csv| match &cfg.output.metrics_file {
        Some(path) if cfg.engine.instrumented => csv.with_metrics(path),
        _ => Ok(csv),
    });
    match opened {
        Ok(csv) => Some(csv),
        Err(e) => {
            log::error!("{e}; running without a log");
            None
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.bench {
        bench_forces();
        bench_verlet_curve();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(seed) = args.seed {
        scenario_cfg.parameters.seed = seed;
    }

    let mut csv = open_log(&scenario_cfg);
    let mut null = NullObserver;
    let final_config_file = scenario_cfg.output.final_config_file.clone();
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    match scenario.engine.mode {
        RunModeConfig::Simulate => {
            if let Some(log) = csv.as_mut() {
                log.begin_simulation(&scenario.system, &scenario.parameters);
            }
            let observer: &mut dyn Observer = match csv.as_mut() {
                Some(log) => log,
                None => &mut null,
            };
            Driver::new(scenario).run(observer);
        }
        RunModeConfig::Pack => {
            if let Some(log) = csv.as_mut() {
                log.begin_packing(&scenario.system, &scenario.parameters);
            }
            let observer: &mut dyn Observer = match csv.as_mut() {
                Some(log) => log,
                None => &mut null,
            };
            let Some(outcome) = scenario.pack(observer)? else {
                println!("nothing to pack");
                return Ok(());
            };
            println!("cycles = {}, area = {:.5}", outcome.cycles, outcome.area);

            if let Some(path) = final_config_file {
                fs::write(&path, serialize_configuration(&scenario.system.disks))
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        }
    }

    Ok(())
}
