use chrono_tz::Tz;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Bidding zone as configured by the operator.
#[must_use]
#[serde_as]
#[derive(Clone, Deserialize)]
pub struct ZoneConfig {
    /// Zone identifier, for example `SE4`. Taken from the configuration key.
    #[serde(skip)]
    pub id: String,

    /// Provider area code, for example `SE_4`, or a raw EIC code.
    #[serde(rename = "code")]
    pub area_code: String,

    /// Zone-local timezone, used to align the requested dates with the settlement periods.
    #[serde_as(as = "DisplayFromStr")]
    pub timezone: Tz,

    pub name: String,

    #[serde(default)]
    pub description: String,
}
