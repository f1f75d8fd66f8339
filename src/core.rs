mod date_range;
mod error;
mod interval;
mod outcome;
mod record;
mod service;
mod statistics;
mod table;

pub use self::{
    date_range::{DateRange, parse_date},
    error::PricingServiceError,
    interval::Interval,
    outcome::{ZoneOutcome, ZoneResults},
    record::{PriceRecord, TimeColumns},
    service::{PriceQuery, PricingService},
    statistics::Statistics,
    table::PriceTable,
};
