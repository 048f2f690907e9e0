use serde::{Deserialize, Serialize};
use std::fmt;

// ===== Submission =====

/// Reply to a job submission; `status_url` is the only field relied upon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUrlResponse {
    pub status_url: String,
    #[serde(default)]
    pub job_id: Option<String>,
}

// ===== Job status =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusDocument {
    pub data: JobStatusData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusData {
    pub id: String,
    #[serde(rename = "type", default)]
    pub data_type: Option<String>,
    pub attributes: JobAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAttributes {
    pub status: String,
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// Remote job state as reported by the status endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Success,
    Failed,
    /// `pending`, `in_progress` or any other non-terminal value
    Pending(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => JobStatus::Success,
            "failed" => JobStatus::Failed,
            other => JobStatus::Pending(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending(_))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Success => write!(f, "success"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Pending(raw) => write!(f, "{}", raw),
        }
    }
}

/// Snapshot of a remote job. `result` is passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SharpApiJob {
    pub id: String,
    pub job_type: Option<String>,
    pub status: JobStatus,
    pub result: serde_json::Value,
}

impl From<JobStatusDocument> for SharpApiJob {
    fn from(document: JobStatusDocument) -> Self {
        let data = document.data;
        Self {
            id: data.id,
            job_type: data.attributes.job_type.or(data.data_type),
            status: JobStatus::parse(&data.attributes.status),
            result: data.attributes.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_status() {
        assert_eq!(JobStatus::parse("success"), JobStatus::Success);
        assert_eq!(JobStatus::parse("FAILED"), JobStatus::Failed);
        assert_eq!(
            JobStatus::parse("in_progress"),
            JobStatus::Pending("in_progress".to_string())
        );
        assert!(!JobStatus::parse("pending").is_terminal());
    }

    #[test]
    fn test_job_from_status_document() {
        let document: JobStatusDocument = serde_json::from_value(json!({
            "data": {
                "type": "api_job_result",
                "id": "5a113c4d-38e9-43e5-80f4-ec3fdea420e9",
                "attributes": {
                    "status": "success",
                    "type": "hr_related_job_positions",
                    "result": {"job_position": "Nurse", "related_job_positions": []}
                }
            }
        }))
        .unwrap();

        let job = SharpApiJob::from(document);
        assert_eq!(job.id, "5a113c4d-38e9-43e5-80f4-ec3fdea420e9");
        assert_eq!(job.job_type.as_deref(), Some("hr_related_job_positions"));
        assert_eq!(job.status, JobStatus::Success);
        assert_eq!(job.result["job_position"], "Nurse");
    }

    #[test]
    fn test_pending_document_without_result() {
        let document: JobStatusDocument = serde_json::from_value(json!({
            "data": {"id": "1", "attributes": {"status": "pending"}}
        }))
        .unwrap();

        let job = SharpApiJob::from(document);
        assert_eq!(job.status, JobStatus::Pending("pending".to_string()));
        assert!(job.result.is_null());
    }
}
