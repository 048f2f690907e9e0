pub mod request;
pub mod response;

pub use request::RelatedJobPositionsRequest;
pub use response::{JobStatus, SharpApiJob, StatusUrlResponse};
