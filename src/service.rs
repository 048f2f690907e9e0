// src/service.rs
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::SharpApiConfig;
use crate::core::{ApiRequest, JobOutcome, JobPoller, ServiceClient, Transport};
use crate::error::{Result, SharpApiError};
use crate::types::{RelatedJobPositionsRequest, SharpApiJob, StatusUrlResponse};

pub const RELATED_JOB_POSITIONS_ENDPOINT: &str = "/hr/related_job_positions";

/// Client for the related job positions endpoint.
///
/// Submitting returns a status URL; [`fetch_results`](Self::fetch_results)
/// polls it using the configured interval and wait budget.
pub struct HrRelatedJobPositionsService {
    config: SharpApiConfig,
    transport: Arc<dyn Transport>,
}

impl HrRelatedJobPositionsService {
    /// Create a service backed by the reqwest transport
    pub fn new(config: SharpApiConfig) -> Result<Self> {
        let transport = ServiceClient::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: SharpApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SharpApiConfig {
        &self.config
    }

    /// Submit a related job positions job and return its status URL.
    ///
    /// The result lists positions related to `job_position_name`, each
    /// weighted 1.0-10.0 by relevance.
    pub async fn related_job_positions(
        &self,
        job_position_name: &str,
        language: Option<&str>,
        max_quantity: Option<u32>,
    ) -> Result<String> {
        if job_position_name.trim().is_empty() {
            return Err(SharpApiError::InvalidInput(
                "job position name must not be empty".to_string(),
            ));
        }
        if max_quantity == Some(0) {
            return Err(SharpApiError::InvalidInput(
                "max_quantity must be a positive number".to_string(),
            ));
        }

        let request = RelatedJobPositionsRequest::new(job_position_name)
            .with_language(language.map(str::to_string))
            .with_max_quantity(max_quantity);

        let body = serde_json::to_value(&request).map_err(|e| {
            SharpApiError::InvalidInput(format!("Failed to encode request: {}", e))
        })?;

        info!("Submitting related job positions job for '{}'", job_position_name);

        let response = self
            .transport
            .send(ApiRequest::post(RELATED_JOB_POSITIONS_ENDPOINT, body))
            .await?;

        let status_url = parse_status_url(&response.json::<StatusUrlResponse>()?)?;
        debug!("Job accepted, status URL: {}", status_url);

        Ok(status_url)
    }

    /// Poll `status_url` until the job resolves or the wait budget runs out
    pub async fn fetch_results(&self, status_url: &str) -> Result<JobOutcome> {
        JobPoller::new(
            Arc::clone(&self.transport),
            self.config.polling_interval(),
            self.config.polling_wait(),
        )
        .poll_until_resolved(status_url)
        .await
    }

    /// Submit and wait. Remote failure and timeout come back as errors.
    pub async fn related_job_positions_and_wait(
        &self,
        job_position_name: &str,
        language: Option<&str>,
        max_quantity: Option<u32>,
    ) -> Result<SharpApiJob> {
        let status_url = self
            .related_job_positions(job_position_name, language, max_quantity)
            .await?;

        self.fetch_results(&status_url).await?.into_result()
    }
}

fn parse_status_url(response: &StatusUrlResponse) -> Result<String> {
    let status_url = response.status_url.trim();
    if status_url.is_empty() {
        return Err(SharpApiError::InvalidResponse(
            "Response carried an empty status_url".to_string(),
        ));
    }
    Ok(status_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_url() {
        let ok = StatusUrlResponse {
            status_url: " https://sharpapi.com/api/v1/job/status/1 ".to_string(),
            job_id: None,
        };
        assert_eq!(
            parse_status_url(&ok).unwrap(),
            "https://sharpapi.com/api/v1/job/status/1"
        );

        let empty = StatusUrlResponse {
            status_url: String::new(),
            job_id: None,
        };
        assert!(matches!(
            parse_status_url(&empty),
            Err(SharpApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_new_keeps_config() {
        let config = SharpApiConfig::new("key").unwrap();
        let service = HrRelatedJobPositionsService::new(config.clone()).unwrap();
        assert_eq!(service.config(), &config);
    }
}
