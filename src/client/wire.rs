// src/client/wire.rs
// JSON wire contract of the transformation service

use serde::{Deserialize, Serialize};

use crate::types::{OperationOutcome, OperationRequest};

/// POST body for /api/transform.
#[derive(Debug, Clone, Serialize)]
pub struct WireRequest {
    pub code: String,
    pub source_language: String,
    pub target_language: Option<String>,
    pub operation: String,
}

impl WireRequest {
    pub fn from_request(request: &OperationRequest) -> Self {
        Self {
            code: request.source_code.clone(),
            source_language: request.source_language.wire_name().to_string(),
            target_language: request
                .target_language
                .map(|lang| lang.wire_name().to_string()),
            operation: request.kind.wire_name().to_string(),
        }
    }
}

/// 2xx response body. The service also echoes `original_code`; serde drops
/// unknown fields, and the optional ones default so a decline with a bare
/// `success: false` still decodes.
#[derive(Debug, Clone, Deserialize)]
pub struct WireResponse {
    pub success: bool,
    #[serde(default)]
    pub transformed_code: Option<String>,
    #[serde(default)]
    pub explanations: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl WireResponse {
    /// Normalize into the caller-facing outcome shape.
    pub fn into_outcome(self) -> OperationOutcome {
        if self.success {
            OperationOutcome::succeeded(
                self.transformed_code.unwrap_or_default(),
                self.explanations,
                self.suggestions,
            )
        } else {
            OperationOutcome::failed(
                self.error_message
                    .unwrap_or_else(|| "service declined the request".to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, OperationKind};

    #[test]
    fn convert_request_serializes_both_languages() {
        let wire = WireRequest::from_request(&OperationRequest {
            source_code: "print(1)".into(),
            source_language: Language::Python,
            target_language: Some(Language::JavaScript),
            kind: OperationKind::Convert,
        });
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["code"], "print(1)");
        assert_eq!(json["source_language"], "python");
        assert_eq!(json["target_language"], "javascript");
        assert_eq!(json["operation"], "convert");
    }

    #[test]
    fn non_convert_request_sends_null_target() {
        let wire = WireRequest::from_request(&OperationRequest {
            source_code: "print(1)".into(),
            source_language: Language::Python,
            target_language: None,
            kind: OperationKind::Explain,
        });
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json["target_language"].is_null());
        assert_eq!(json["operation"], "explain");
    }

    #[test]
    fn response_tolerates_extra_service_fields() {
        let body = r#"{
            "original_code": "print(1)",
            "transformed_code": "print(1)  # explained",
            "explanations": ["literal print"],
            "suggestions": [],
            "success": true,
            "error_message": null
        }"#;
        let response: WireResponse = serde_json::from_str(body).unwrap();
        let outcome = response.into_outcome();
        assert!(outcome.success);
        assert_eq!(outcome.transformed_code.as_deref(), Some("print(1)  # explained"));
        assert_eq!(outcome.explanations, vec!["literal print".to_string()]);
    }

    #[test]
    fn bare_decline_decodes_with_defaults() {
        let response: WireResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        let outcome = response.into_outcome();
        assert!(!outcome.success);
        assert!(outcome.error_message.is_some());
        assert!(outcome.transformed_code.is_none());
    }
}
