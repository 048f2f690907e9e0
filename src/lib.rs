//! Client for the SharpAPI "related job positions" endpoint.
//!
//! A job is submitted with [`HrRelatedJobPositionsService::related_job_positions`],
//! which returns a status URL. [`HrRelatedJobPositionsService::fetch_results`]
//! then polls that URL every `api_job_status_polling_interval` seconds for at
//! most `api_job_status_polling_wait` seconds.
//!
//! ```no_run
//! use hr_related_job_positions::{HrRelatedJobPositionsService, SharpApiConfig};
//!
//! # async fn example() -> hr_related_job_positions::Result<()> {
//! let service = HrRelatedJobPositionsService::new(SharpApiConfig::new("your-api-key")?)?;
//! let status_url = service
//!     .related_job_positions("Software Engineer", Some("en"), Some(5))
//!     .await?;
//! let job = service.fetch_results(&status_url).await?.into_result()?;
//! println!("{}", job.result);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod provider;
pub mod service;
pub mod types;

pub use config::{ConfigOverrides, SharpApiConfig, CONFIG_NAMESPACE};
pub use crate::core::{JobOutcome, JobPoller, PollState, ServiceClient, Transport};
pub use error::{Result, SharpApiError};
pub use provider::{ConfigRepository, HrRelatedJobPositionsProvider};
pub use service::HrRelatedJobPositionsService;
pub use types::{JobStatus, RelatedJobPositionsRequest, SharpApiJob};
