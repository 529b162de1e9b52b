// Uniform JSON response envelope
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// `{success, data|error}` wrapper shared by every `/api` endpoint.
///
/// Optional members are omitted from the JSON when unset, so a list
/// response carries `count` while a lookup does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Set by the predictions endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    /// Set by the route-not-found fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            count: None,
            message: None,
            generated_at: None,
            path: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            count: None,
            message: None,
            generated_at: None,
            path: None,
        }
    }

    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    pub fn with_generated_at(mut self, generated_at: String) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Successful list response with `count` set to the list length.
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        let mut response = Self::ok(items);
        response.count = Some(count);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sets_count() {
        let response = ApiResponse::list(vec![1, 2, 3]);
        assert!(response.success);
        assert_eq!(response.count, Some(3));
    }

    #[test]
    fn test_failure_omits_data() {
        let json = serde_json::to_value(ApiResponse::<()>::failure("nope")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
        assert!(json.get("data").is_none());
        assert!(json.get("count").is_none());
    }
}
