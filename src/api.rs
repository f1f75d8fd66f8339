mod day_ahead;
pub mod entsoe;

pub use self::day_ahead::DayAheadPrices;
