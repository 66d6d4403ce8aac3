use anyhow::Context;
use clap::Parser;
use generator::profile::ScanGenerator;
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use wifigraph::scan::{load_snapshots, ScanSnapshot, WiFiBand};
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthetic WiFi scan driver for the channel graph")]
struct Args {
    /// Run the configured number of scan ticks and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Replay recorded snapshots (JSON array) instead of generating scans.
    /// Implies an offline pass; `--serve` then continues with generated scans.
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Bands to graph, comma separated (e.g. `2.4,5`); both when omitted
    #[arg(long, value_delimiter = ',')]
    bands: Vec<WiFiBand>,
    #[arg(long, default_value_t = 10)]
    ticks: usize,
    #[arg(long, default_value_t = 12)]
    networks: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Keep the GUI bridge alive and feed it a generated scan every interval
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
}

impl Args {
    fn runs_offline(&self) -> bool {
        self.offline || self.replay.is_some()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow.as_ref() {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.ticks, args.networks, args.seed, &args.bands)
    };

    let runner = Arc::new(Mutex::new(Runner::new(workflow_config.clone())?));
    let gui_bridge = GuiBridge::new(runner.clone());
    let mut generator = ScanGenerator::new(workflow_config.generator.clone())?;

    if args.runs_offline() {
        let snapshots: Vec<ScanSnapshot> = if let Some(path) = args.replay.as_ref() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading replay {}", path.display()))?;
            load_snapshots(&contents)
                .with_context(|| format!("parsing replay {}", path.display()))?
        } else {
            (0..workflow_config.ticks)
                .map(|_| generator.next_snapshot())
                .collect::<anyhow::Result<_>>()?
        };

        let mut report = String::new();
        let mut last = None;
        for (tick, snapshot) in snapshots.iter().enumerate() {
            let model = gui_bridge.ingest(snapshot)?;
            report.push_str(&format!(
                "tick={} networks={} curves={} visible={:?}\n",
                tick,
                model.network_count,
                model.curve_count,
                model.visible_bands
            ));
            last = Some(model);
        }

        if let Some(model) = last {
            println!(
                "Offline run -> ticks {}, curves {}, notes {:?}",
                snapshots.len(),
                model.curve_count,
                model.notes
            );
            gui_bridge.publish_status("Offline workflow results ready.");
        }

        let report_path = PathBuf::from("tools/data/offline_graph.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(report.as_bytes())?;
    }
    if args.serve {
        gui_bridge.serve(gui_bind_address());
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for scan loop")?;
        let period = Duration::from_millis(args.interval_ms.max(50));
        runtime.block_on(async {
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let snapshot = generator.next_snapshot()?;
                        gui_bridge.ingest(&snapshot)?;
                    }
                    result = signal::ctrl_c() => {
                        result.context("awaiting Ctrl+C to exit")?;
                        break;
                    }
                }
            }
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_flag_parses_comma_list() {
        let args = Args::try_parse_from(["simulator", "--bands", "2.4,5GHz"]).unwrap();
        assert_eq!(args.bands, vec![WiFiBand::Ghz2, WiFiBand::Ghz5]);

        let args = Args::try_parse_from(["simulator"]).unwrap();
        assert!(args.bands.is_empty());
    }

    #[test]
    fn bands_flag_rejects_unknown_band() {
        assert!(Args::try_parse_from(["simulator", "--bands", "6"]).is_err());
    }

    #[test]
    fn replay_implies_offline_pass() {
        let args =
            Args::try_parse_from(["simulator", "--replay", "scans.json", "--serve"]).unwrap();
        assert!(args.runs_offline());
        assert!(args.serve);

        let args = Args::try_parse_from(["simulator", "--serve"]).unwrap();
        assert!(!args.runs_offline());
    }
}
