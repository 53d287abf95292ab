use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::matrix::MatrixResponse;
use super::DistanceProvider;
use crate::error::AppError;

pub const DEFAULT_USER_AGENT: &str = "trip-booking/0.1";

#[derive(Debug, Clone)]
pub struct HttpDistanceProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Distance provider backed by a Distance Matrix style HTTP API.
#[derive(Debug, Clone)]
pub struct HttpDistanceProvider {
    client: Client,
    config: HttpDistanceProviderConfig,
}

impl HttpDistanceProvider {
    pub fn new(config: HttpDistanceProviderConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppError::Internal(format!("failed to build http client: {err}")))?;

        Ok(Self { client, config })
    }

    fn matrix_url(&self) -> String {
        format!(
            "{}/maps/api/distancematrix/json",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> AppError {
        if error.is_timeout() {
            return AppError::ProviderUnavailable(format!(
                "request timed out after {}s",
                self.config.timeout.as_secs()
            ));
        }

        if let Some(status) = error.status() {
            return AppError::ProviderUnavailable(format!("http status {status}"));
        }

        AppError::ProviderUnavailable(error.to_string())
    }

    fn convert_response(response: MatrixResponse) -> Result<f64, AppError> {
        if !response.is_ok() {
            return Err(AppError::ProviderUnavailable(format!(
                "status {}: {}",
                response.status,
                response.error_message.unwrap_or_default()
            )));
        }

        let meters = response
            .first_distance_meters()
            .map_err(AppError::ProviderDataMissing)?;

        Ok(meters / 1000.0)
    }
}

#[async_trait]
impl DistanceProvider for HttpDistanceProvider {
    async fn distance_km(&self, origin: &str, destination: &str) -> Result<f64, AppError> {
        let response = self
            .client
            .get(self.matrix_url())
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let matrix: MatrixResponse = response
            .json()
            .await
            .map_err(|err| AppError::ProviderDataMissing(format!("malformed response: {err}")))?;

        let km = Self::convert_response(matrix)?;
        debug!(origin, destination, km, "distance resolved by provider");
        Ok(km)
    }
}
