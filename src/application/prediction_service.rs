// Prediction service - Trend forecasts with simulated backend latency
use crate::domain::forecast::{forecast, ForecastResult, PredictionQuery};
use std::time::Duration;

#[derive(Clone)]
pub struct PredictionService {
    latency: Duration,
}

impl PredictionService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Compute the forecast after the configured delay; never fails
    pub async fn predict(&self, query: PredictionQuery) -> ForecastResult {
        tracing::debug!("Predicting {:?} after {:?}", query, self.latency);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = forecast(&query);
        tracing::info!(
            "Forecast for {:?}/{:?}: density {}, thickness {}, accuracy {}",
            query.region,
            query.period,
            result.density_trend,
            result.thickness_trend,
            result.accuracy
        );
        result
    }
}
