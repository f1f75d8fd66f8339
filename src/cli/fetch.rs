use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;
use itertools::Itertools;

use crate::{
    cli::config::ConfigArgs,
    core::{PriceQuery, ZoneOutcome, parse_date},
    export::{self, ExportFormat},
    prelude::*,
    tables::{build_records_table, build_summary_table},
};

#[derive(Parser)]
pub struct FetchArgs {
    #[clap(flatten)]
    config: ConfigArgs,

    /// Zone identifiers, the configured default zones when omitted.
    #[clap(long, env = "ZONES", value_delimiter = ',', num_args = 1..)]
    zones: Option<Vec<String>>,

    /// First day, `YYYY-MM-DD`.
    #[clap(long, env = "START_DATE", value_parser = parse_date)]
    start_date: Option<NaiveDate>,

    /// Last day, inclusive, today when omitted.
    #[clap(long, env = "END_DATE", value_parser = parse_date)]
    end_date: Option<NaiveDate>,

    /// Number of days before the end date, when the start date is omitted.
    #[clap(long, env = "DAYS_BACK", value_parser = clap::value_parser!(u32).range(1..=365))]
    days_back: Option<u32>,

    /// Save the per-zone tables into the directory.
    #[clap(long, env = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    #[clap(long, env = "EXPORT_FORMAT", default_value = "csv")]
    format: ExportFormat,

    /// Number of the first records to print per zone.
    #[clap(long, env = "PRINT_RECORDS", default_value = "5")]
    n_records: usize,
}

impl FetchArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let service = self.config.connect()?;
        let query = PriceQuery::builder()
            .maybe_zones(self.zones.map(|zones| {
                zones.into_iter().map(|zone| zone.trim().to_uppercase()).collect()
            }))
            .maybe_start_date(self.start_date)
            .maybe_end_date(self.end_date)
            .maybe_days_back(self.days_back)
            .build();
        let results = service.fetch_prices(&query).await?;
        ensure!(!results.is_empty(), "no zones to fetch");
        let zones = results.zones().collect_vec();
        info!(n_zones = results.len(), ?zones, range = %results.range, "fetched");

        let include_statistics = service.config().service.output.include_statistics;
        println!("{}", build_summary_table(&results, include_statistics));
        for (zone, outcome) in &results {
            match outcome {
                ZoneOutcome::Fetched(table) if !table.is_empty() => {
                    let n_records = self.n_records.min(table.len());
                    println!("{zone}: {}", table.zone_name);
                    println!("{}", build_records_table(&table.records[..n_records]));
                }
                ZoneOutcome::Fetched(_) => warn!(zone, "no data"),
                ZoneOutcome::Failed { reason } => warn!(zone, reason, "failed"),
            }
        }

        if let Some(output_dir) = &self.output_dir {
            let paths = export::save(&results, output_dir, self.format, Local::now())?;
            info!(n_files = paths.len(), "exported");
        }
        Ok(())
    }
}
