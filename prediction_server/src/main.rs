mod pages;
mod server;

use anyhow::Result;
use log::{error, info};
use tokio::signal;
use trend_model::adapter::InferenceAdapter;
use trend_model::artifacts::ModelArtifacts;
use trend_model::logger::init_logger;

use crate::server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    // Both artifacts must load before any request is accepted.
    let artifacts = match ModelArtifacts::load() {
        Ok(artifacts) => artifacts,
        Err(e) => {
            error!("Failed to load model or scaler: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState::new(InferenceAdapter::from_artifacts(artifacts));

    tokio::select! {
        res = server::serve(state) => {
            if let Err(e) = res {
                error!("Server failed: {e:?}");
            }
        }
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal, shutting down");
        }
    }

    Ok(())
}
