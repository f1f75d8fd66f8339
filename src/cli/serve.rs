use std::{net::SocketAddr, sync::Arc};

use clap::Parser;

use crate::{
    cli::config::{ConfigArgs, connect},
    prelude::*,
    server::{self, AppState},
};

#[derive(Parser)]
pub struct ServeArgs {
    #[clap(flatten)]
    config: ConfigArgs,

    #[clap(long = "bind", env = "BIND_ADDRESS", default_value = "0.0.0.0:8000")]
    address: SocketAddr,

    /// Zones are fetched sequentially, so this should cover several upstream timeouts.
    #[clap(long, env = "REQUEST_TIMEOUT", default_value = "2min")]
    request_timeout: humantime::Duration,
}

impl ServeArgs {
    pub async fn run(self) -> Result {
        let config = Arc::new(self.config.load()?);
        let state = match connect(config) {
            Ok(service) => AppState::Ready(service),
            Err(error) => {
                error!("failed to initialize the pricing service: {error:#}");
                AppState::Unavailable { reason: format!("{error:#}") }
            }
        };
        server::serve(Arc::new(state), self.address, self.request_timeout.into()).await
    }
}
