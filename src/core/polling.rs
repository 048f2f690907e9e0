// src/core/polling.rs
//! Job status polling: `submitted -> pending -> {succeeded, failed, timed_out}`

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::service_client::{ApiRequest, Transport};
use crate::error::{Result, SharpApiError};
use crate::types::response::JobStatusDocument;
use crate::types::{JobStatus, SharpApiJob};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Submitted,
    Pending,
    Succeeded,
    Failed,
    TimedOut,
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PollState::Submitted => "submitted",
            PollState::Pending => "pending",
            PollState::Succeeded => "succeeded",
            PollState::Failed => "failed",
            PollState::TimedOut => "timed_out",
        };
        f.write_str(name)
    }
}

/// Terminal result of polling a job
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Succeeded(SharpApiJob),
    Failed(SharpApiJob),
    TimedOut {
        status_url: String,
        elapsed: Duration,
        last_status: JobStatus,
    },
}

impl JobOutcome {
    pub fn state(&self) -> PollState {
        match self {
            JobOutcome::Succeeded(_) => PollState::Succeeded,
            JobOutcome::Failed(_) => PollState::Failed,
            JobOutcome::TimedOut { .. } => PollState::TimedOut,
        }
    }

    /// Collapse into the finished job, turning failure and timeout into errors
    pub fn into_result(self) -> Result<SharpApiJob> {
        match self {
            JobOutcome::Succeeded(job) => Ok(job),
            JobOutcome::Failed(job) => Err(SharpApiError::JobFailed {
                job_id: job.id,
                result: job.result,
            }),
            JobOutcome::TimedOut {
                status_url,
                elapsed,
                ..
            } => Err(SharpApiError::PollingTimeout {
                status_url,
                waited_secs: elapsed.as_secs(),
            }),
        }
    }
}

/// Shortest gap between two status checks
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Re-checks a status URL every `interval` until the job resolves or the
/// next wait would push past `max_wait`
pub struct JobPoller {
    transport: Arc<dyn Transport>,
    interval: Duration,
    max_wait: Duration,
}

impl JobPoller {
    /// `interval` is raised to [`MIN_POLL_INTERVAL`] when shorter
    pub fn new(transport: Arc<dyn Transport>, interval: Duration, max_wait: Duration) -> Self {
        Self {
            transport,
            interval: interval.max(MIN_POLL_INTERVAL),
            max_wait,
        }
    }

    pub async fn poll_until_resolved(&self, status_url: &str) -> Result<JobOutcome> {
        let started = Instant::now();
        let mut state = PollState::Submitted;
        let mut checks = 0u32;

        loop {
            checks += 1;
            let response = self.transport.send(ApiRequest::get(status_url)).await?;
            let job = SharpApiJob::from(response.json::<JobStatusDocument>()?);

            match job.status {
                JobStatus::Success => {
                    info!("Job {} succeeded after {} checks", job.id, checks);
                    return Ok(JobOutcome::Succeeded(job));
                }
                JobStatus::Failed => {
                    warn!("Job {} reported failure after {} checks", job.id, checks);
                    return Ok(JobOutcome::Failed(job));
                }
                JobStatus::Pending(_) => {
                    let elapsed = started.elapsed();
                    if elapsed.saturating_add(self.interval) > self.max_wait {
                        warn!(
                            "Job {} still {} after {:?}, giving up",
                            job.id, job.status, elapsed
                        );
                        return Ok(JobOutcome::TimedOut {
                            status_url: status_url.to_string(),
                            elapsed,
                            last_status: job.status,
                        });
                    }

                    if state != PollState::Pending {
                        debug!("Job {}: {} -> {}", job.id, state, PollState::Pending);
                        state = PollState::Pending;
                    }
                    debug!(
                        "Job {} is {}, checking again in {:?}",
                        job.id, job.status, self.interval
                    );
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
    }
}
