use api_envelope::{
    types::{Config, Context},
    App,
};
use std::{process::ExitCode, sync::Arc};
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let ctx: Arc<Context> = Arc::new(config.into());

    match App::new(ctx).serve().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Server stopped: {}", err);
            ExitCode::FAILURE
        }
    }
}
