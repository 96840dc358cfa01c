//! Publishing figures to the hosted Plotly REST API

use super::chart::{ChartReceipt, ChartSink, Figure};
use crate::config::ChartSettings;
use crate::error::{ErrorCode, Result, SweepError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Publishes figures with `POST {endpoint}/v2/plots`
#[derive(Debug, Clone)]
pub struct PlotlySink {
    client: Client,
    endpoint: String,
    username: String,
    api_key: String,
    filename: String,
    world_readable: bool,
}

#[derive(Serialize)]
struct CreatePlotRequest<'a> {
    figure: &'a Figure,
    filename: &'a str,
    world_readable: bool,
}

#[derive(Deserialize)]
struct CreatePlotResponse {
    file: PlotFile,
}

#[derive(Deserialize)]
struct PlotFile {
    web_url: String,
}

impl PlotlySink {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            username: username.into(),
            api_key: api_key.into(),
            filename: "grouped-bar".to_string(),
            world_readable: true,
        }
    }

    /// Build from configuration; credentials must be present
    pub fn from_settings(settings: &ChartSettings) -> Result<Self> {
        let missing = || {
            SweepError::config_with_code(
                ErrorCode::CONFIG_MISSING_CREDENTIALS,
                "plotly username and api key are required",
                Some("chart".to_string()),
            )
        };
        let username = settings.username.clone().ok_or_else(missing)?;
        let api_key = settings.api_key.clone().ok_or_else(missing)?;

        let mut sink = Self::new(settings.endpoint.clone(), username, api_key);
        sink.filename = settings.filename.clone();
        sink.world_readable = settings.world_readable;
        Ok(sink)
    }

    fn plots_url(&self) -> String {
        format!("{}/v2/plots", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChartSink for PlotlySink {
    fn name(&self) -> &'static str {
        "plotly"
    }

    async fn publish(&self, figure: &Figure) -> Result<ChartReceipt> {
        let url = self.plots_url();
        info!("Publishing chart '{}' to {}", self.filename, url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.api_key))
            .header("Plotly-Client-Platform", concat!("logsweep/", env!("CARGO_PKG_VERSION")))
            .json(&CreatePlotRequest {
                figure,
                filename: &self.filename,
                world_readable: self.world_readable,
            })
            .send()
            .await
            .map_err(|e| {
                SweepError::chart_with_code(
                    ErrorCode::CHART_NETWORK,
                    format!("Failed to reach {}", url),
                )
                .with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SweepError::chart_with_code(
                ErrorCode::CHART_REJECTED,
                format!("Plot service answered {}: {}", status, body.trim()),
            ));
        }

        let created: CreatePlotResponse = response.json().await?;
        debug!("Chart available at {}", created.file.web_url);

        Ok(ChartReceipt::Url(created.file.web_url))
    }
}
