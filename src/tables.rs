use std::collections::BTreeMap;

use average::Mean;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    api::entsoe::eic_code,
    config::ZoneConfig,
    core::{PriceRecord, ZoneOutcome, ZoneResults},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn price_cell(price: f64) -> Cell {
    Cell::new(format!("{price:.2}")).set_alignment(CellAlignment::Right)
}

pub fn build_summary_table(results: &ZoneResults, include_statistics: bool) -> Table {
    let mut table = new_table();
    let mut header = vec!["Zone", "Name", "Points", "Start", "End"];
    if include_statistics {
        header.extend(["Mean", "Median", "Std", "Min", "Max"]);
    }
    table.set_header(header);

    for (zone, outcome) in results {
        match outcome {
            ZoneOutcome::Fetched(fetched) => {
                let mut row = vec![
                    Cell::new(zone).add_attribute(Attribute::Bold),
                    Cell::new(&fetched.zone_name),
                    Cell::new(fetched.len()).set_alignment(CellAlignment::Right),
                ];
                match fetched.time_span() {
                    Some((start, end)) => row.extend([
                        Cell::new(start.format("%b %d %H:%M")).add_attribute(Attribute::Dim),
                        Cell::new(end.format("%b %d %H:%M")).add_attribute(Attribute::Dim),
                    ]),
                    None => row.extend([Cell::new("-"), Cell::new("-")]),
                }
                if include_statistics && let Some(statistics) = fetched.statistics() {
                    row.extend([
                        price_cell(statistics.mean),
                        price_cell(statistics.median),
                        statistics.std.map_or_else(|| Cell::new("-"), price_cell),
                        price_cell(statistics.min).fg(Color::Green),
                        price_cell(statistics.max).fg(Color::Red),
                    ]);
                }
                table.add_row(row);
            }
            ZoneOutcome::Failed { reason } => {
                table.add_row(vec![
                    Cell::new(zone).add_attribute(Attribute::Bold),
                    Cell::new(reason).fg(Color::Red),
                ]);
            }
        }
    }
    table
}

pub fn build_records_table(records: &[PriceRecord]) -> Table {
    let mean_price = {
        let estimate: Mean = records.iter().map(|record| record.price).collect();
        if estimate.is_empty() { 0.0 } else { estimate.mean() }
    };

    let mut table = new_table();
    table.set_header(vec!["Date", "Start", "Day", "EUR/MWh"]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.timestamp.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(record.timestamp.format("%H:%M")),
            Cell::new(record.timestamp.format("%a")).add_attribute(Attribute::Dim),
            price_cell(record.price).fg(if record.price >= mean_price {
                Color::Red
            } else {
                Color::Green
            }),
        ]);
    }
    table
}

pub fn build_zones_table(zones: &BTreeMap<String, ZoneConfig>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Zone", "Name", "Area", "EIC", "Timezone", "Description"]);
    for (id, zone) in zones {
        table.add_row(vec![
            Cell::new(id).add_attribute(Attribute::Bold),
            Cell::new(&zone.name),
            Cell::new(&zone.area_code),
            eic_code(&zone.area_code)
                .map_or_else(|| Cell::new("unknown").fg(Color::Red), Cell::new)
                .add_attribute(Attribute::Dim),
            Cell::new(zone.timezone.name()),
            Cell::new(&zone.description).add_attribute(Attribute::Dim),
        ]);
    }
    table
}
