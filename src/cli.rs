mod config;
mod fetch;
mod serve;
mod zones;

use clap::{Parser, Subcommand};

use crate::{
    cli::{fetch::FetchArgs, serve::ServeArgs, zones::ZonesArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the pricing API over HTTP.
    #[clap(name = "serve")]
    Serve(Box<ServeArgs>),

    /// Fetch the prices once, print the summary, and optionally export them.
    #[clap(name = "fetch")]
    Fetch(Box<FetchArgs>),

    /// List the configured bidding zones.
    #[clap(name = "zones")]
    Zones(ZonesArgs),
}

impl Command {
    pub async fn run(self) -> Result {
        match self {
            Self::Serve(args) => args.run().await,
            Self::Fetch(args) => args.run().await,
            Self::Zones(args) => args.run(),
        }
    }
}
