use anyhow::{anyhow, Result};
use log::{error, info};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};
use wifigraph::scan::ScanSnapshot;

use crate::generator::profile::{build_snapshot_from_config, GeneratorConfig};
use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::runner::Runner;

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that holds the latest rendered frames and serves them over HTTP.
pub struct GuiBridge {
    state: Arc<RwLock<VisualizationModel>>,
    runner: Arc<Mutex<Runner>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Mutex<Runner>>) -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
            runner,
        }
    }

    /// Feeds one snapshot through the runner and publishes the frames.
    pub fn ingest(&self, snapshot: &ScanSnapshot) -> Result<VisualizationModel> {
        ingest_snapshot(&self.runner, &self.state, snapshot)
    }

    /// Starts the HTTP endpoint on a background thread.
    pub fn serve(&self, address: SocketAddr) {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("payload")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<VisualizationModel>>| {
                let reply = match state.read() {
                    Ok(model) => {
                        warp::reply::with_status(warp::reply::json(&*model), StatusCode::OK)
                    }
                    Err(_) => warp::reply::with_status(
                        warp::reply::json(&json!({"status": "poisoned"})),
                        StatusCode::INTERNAL_SERVER_ERROR,
                    ),
                };
                reply
            });

        let post_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |snapshot: ScanSnapshot,
                 state: Arc<RwLock<VisualizationModel>>,
                 runner: Arc<Mutex<Runner>>| async move {
                    match ingest_snapshot(&runner, &state, &snapshot) {
                        Ok(model) => Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "ok",
                                "curves": model.curve_count
                            })),
                            StatusCode::OK,
                        )),
                        Err(err) => {
                            error!("ingest error: {:#}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let generator_route = warp::path("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |config: GeneratorConfig,
                 state: Arc<RwLock<VisualizationModel>>,
                 runner: Arc<Mutex<Runner>>| async move {
                    match build_snapshot_from_config(&config)
                        .and_then(|snapshot| ingest_snapshot(&runner, &state, &snapshot))
                    {
                        Ok(model) => {
                            if let Some(name) = config.scenario.as_ref() {
                                info!("[GUI] Scenario {} -> curves {}", name, model.curve_count);
                            }
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "curves": model.curve_count,
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            error!("ingest-config error: {:#}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(post_route).or(generator_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
    }

    pub fn publish_status(&self, message: &str) {
        info!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state.read().unwrap().clone()
    }
}

fn ingest_snapshot(
    runner: &Mutex<Runner>,
    state: &RwLock<VisualizationModel>,
    snapshot: &ScanSnapshot,
) -> Result<VisualizationModel> {
    let result = runner
        .lock()
        .map_err(|_| anyhow!("runner poisoned"))?
        .execute(snapshot)?;

    let mut guard = state
        .write()
        .map_err(|_| anyhow!("visualization state poisoned"))?;
    let model = VisualizationModel::from_result(guard.tick + 1, snapshot.networks.len(), &result);
    *guard = model.clone();
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_snapshot;
    use crate::workflow::config::WorkflowConfig;

    fn bridge() -> GuiBridge {
        let cfg = WorkflowConfig::from_args(1, 8, 4, &[]);
        GuiBridge::new(Arc::new(Mutex::new(Runner::new(cfg).unwrap())))
    }

    #[test]
    fn gui_bridge_ingest_updates_state() {
        let gui = bridge();
        let snapshot = build_snapshot(8, 4).unwrap();
        let model = gui.ingest(&snapshot).unwrap();
        assert_eq!(model.tick, 1);
        assert_eq!(gui.snapshot().curve_count, model.curve_count);
        assert_eq!(gui.snapshot().frames.len(), 2);

        let again = gui.ingest(&snapshot).unwrap();
        assert_eq!(again.tick, 2);
        assert_eq!(again.curve_count, model.curve_count);
    }
}
