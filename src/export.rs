//! Per-zone price files.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use clap::ValueEnum;

use crate::{
    core::{PriceTable, ZoneResults},
    prelude::*,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Save every usable zone table into its own file, failed and empty zones are skipped.
///
/// Returns the written paths by zone.
#[instrument(skip_all, fields(output_dir = %output_dir.display(), format = ?format))]
pub fn save(
    results: &ZoneResults,
    output_dir: &Path,
    format: ExportFormat,
    fetched_at: DateTime<Local>,
) -> Result<BTreeMap<String, PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create `{}`", output_dir.display()))?;
    let suffix = fetched_at.format("%Y%m%d_%H%M%S");

    let mut paths = BTreeMap::new();
    for (zone, outcome) in results {
        let Some(table) = outcome.usable_table() else {
            warn!(zone, "no data to export");
            continue;
        };
        let path = output_dir.join(format!("{zone}_prices_{suffix}.{}", format.extension()));
        let result = match format {
            ExportFormat::Csv => write_csv(table, &path),
            ExportFormat::Json => write_json(table, &path),
        };
        match result {
            Ok(()) => {
                info!(zone, path = %path.display(), n_records = table.len(), "saved");
                paths.insert(zone.clone(), path);
            }
            Err(error) => {
                error!(zone, "failed to save: {error:#}");
            }
        }
    }
    Ok(paths)
}

fn write_csv(table: &PriceTable, path: &Path) -> Result {
    let mut writer = csv::Writer::from_path(path)?;
    let with_time_columns = table.records.iter().any(|record| record.time.is_some());

    let mut header = vec!["timestamp", "price_eur_mwh", "zone", "zone_name"];
    if with_time_columns {
        header.extend(["date", "hour", "day_of_week", "weekday"]);
    }
    writer.write_record(&header)?;

    for record in &table.records {
        let mut row = vec![
            record.timestamp.to_rfc3339(),
            record.price.to_string(),
            record.zone.clone(),
            record.zone_name.clone(),
        ];
        if with_time_columns {
            match &record.time {
                Some(time) => row.extend([
                    time.date.to_string(),
                    time.hour.to_string(),
                    time.day_of_week.clone(),
                    time.weekday.to_string(),
                ]),
                None => row.extend(std::iter::repeat_n(String::new(), 4)),
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(table: &PriceTable, path: &Path) -> Result {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &table.records)?;
    Ok(())
}
