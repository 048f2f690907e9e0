// src/core/mod.rs
//! Transport and job polling shared by the API services

pub mod polling;
pub mod service_client;

pub use polling::{JobOutcome, JobPoller, PollState};
pub use service_client::{ApiRequest, ApiResponse, Method, ServiceClient, Transport};
