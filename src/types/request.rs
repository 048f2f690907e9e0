use serde::{Deserialize, Serialize};

/// Body of `POST /hr/related_job_positions`. Unset optionals go out as
/// `null` so the remote service applies its own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedJobPositionsRequest {
    pub content: String,
    pub language: Option<String>,
    pub max_quantity: Option<u32>,
}

impl RelatedJobPositionsRequest {
    pub fn new(job_position_name: impl Into<String>) -> Self {
        Self {
            content: job_position_name.into(),
            language: None,
            max_quantity: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_max_quantity(mut self, max_quantity: Option<u32>) -> Self {
        self.max_quantity = max_quantity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_body() {
        let request = RelatedJobPositionsRequest::new("Software Engineer")
            .with_language(Some("en".to_string()))
            .with_max_quantity(Some(5));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"content": "Software Engineer", "language": "en", "max_quantity": 5})
        );
    }

    #[test]
    fn test_unset_optionals_serialize_as_null() {
        let body = serde_json::to_value(RelatedJobPositionsRequest::new("Nurse")).unwrap();

        assert_eq!(
            body,
            json!({"content": "Nurse", "language": null, "max_quantity": null})
        );
        assert_eq!(body.as_object().map(|o| o.len()), Some(3));
    }
}
