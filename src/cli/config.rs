use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use crate::{api::entsoe, config::Config, core::PricingService, prelude::*};

#[derive(Parser)]
pub struct ConfigArgs {
    /// Configuration file.
    #[clap(long = "config", env = "PRICING_CONFIG", default_value = "config.toml")]
    path: PathBuf,

    /// Transparency Platform security token, overrides the configured one.
    #[clap(long = "api-token", env = "ENTSOE_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config> {
        Ok(Config::load(&self.path, self.api_token.as_deref())?)
    }

    pub fn connect(&self) -> Result<PricingService> {
        connect(Arc::new(self.load()?))
    }
}

/// Build the service backed by the Transparency Platform.
pub fn connect(config: Arc<Config>) -> Result<PricingService> {
    let api = entsoe::Api::new(&config.api)?;
    Ok(PricingService::new(config, Box::new(api)))
}
