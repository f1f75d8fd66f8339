use clap::Parser;

use crate::{cli::config::ConfigArgs, prelude::*, tables::build_zones_table};

#[derive(Parser)]
pub struct ZonesArgs {
    #[clap(flatten)]
    config: ConfigArgs,
}

impl ZonesArgs {
    pub fn run(self) -> Result {
        let config = self.config.load()?;
        println!("{}", build_zones_table(&config.zones));
        Ok(())
    }
}
