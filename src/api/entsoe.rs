//! [ENTSO-E Transparency Platform](https://transparency.entsoe.eu/) client.

mod area;
mod document;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use itertools::Itertools;
use reqwest::Client;

pub use self::area::eic_code;
use self::document::MarketDocument;
use crate::{api::DayAheadPrices, config::ApiConfig, core::Interval, prelude::*};

pub struct Api {
    client: Client,
    base_url: String,
    token: String,
}

impl Api {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url: config.base_url.clone(), token: config.token.clone() })
    }
}

#[async_trait]
impl DayAheadPrices for Api {
    #[instrument(skip_all, fields(area_code = area_code))]
    async fn get_prices(
        &self,
        area_code: &str,
        interval: Interval,
    ) -> Result<Vec<(DateTime<Tz>, f64)>> {
        let domain =
            eic_code(area_code).with_context(|| format!("unknown area code `{area_code}`"))?;
        info!(?interval, "fetching…");

        let period_start = format_period(interval.start.with_timezone(&Utc));
        let period_end = format_period(interval.end.with_timezone(&Utc));
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("securityToken", self.token.as_str()),
                ("documentType", "A44"),
                ("contract_MarketAgreement.type", "A01"),
                ("in_Domain", domain),
                ("out_Domain", domain),
                ("periodStart", period_start.as_str()),
                ("periodEnd", period_end.as_str()),
            ])
            .send()
            .await
            .context("failed to call the API")?;
        let status = response.status();
        let body = response.text().await.context("failed to read the response")?;

        // Rejected requests come with an acknowledgement and a client error status:
        let document: MarketDocument = quick_xml::de::from_str(&body)
            .with_context(|| format!("failed to parse the response ({status})"))?;
        if let Some(reason) = document.rejection() {
            bail!("request rejected: {reason}");
        }
        ensure!(status.is_success(), "request failed ({status})");

        let timezone = interval.timezone();
        let prices = document
            .into_prices()
            .into_iter()
            .map(|(timestamp, price)| (timestamp.with_timezone(&timezone), price))
            .collect_vec();
        info!(n_prices = prices.len(), "fetched");
        Ok(prices)
    }
}

fn format_period(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y%m%d%H%M").to_string()
}
