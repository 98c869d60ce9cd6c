//! Unit tests for error handling

use super::*;

#[cfg(test)]
mod dash_error_tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_failure_is_network_error() {
        // Nothing listens on port 1
        let client = reqwest::Client::new();
        let result = client.get("http://127.0.0.1:1/").send().await;
        let reqwest_error = result.unwrap_err();
        let dash_error = DashError::from(reqwest_error);

        match dash_error {
            DashError::Network(_) => (),
            _ => panic!("Expected Network error variant"),
        }
        assert!(dash_error.to_string().starts_with("Network request failed"));
    }

    #[test]
    fn test_bad_url_is_request_setup_error() {
        let reqwest_error = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let dash_error = DashError::from(reqwest_error);

        assert!(matches!(dash_error, DashError::RequestSetup(_)));
        assert_eq!(dash_error.kind(), ErrorKind::Validation);
        assert!(dash_error.to_string().starts_with("HTTP request setup failed"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let dash_error = DashError::from(json_error);

        match dash_error {
            DashError::Parse(_) => (),
            _ => panic!("Expected Parse error variant"),
        }
        assert_eq!(dash_error.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_http_error_display() {
        let error = DashError::Http {
            status: 503,
            body: "Service Unavailable".to_string(),
        };

        assert_eq!(error.to_string(), "HTTP 503: Service Unavailable");
        assert_eq!(error.kind(), ErrorKind::Http);
    }

    #[test]
    fn test_validation_helpers() {
        let error = DashError::validation("start date is after end date");
        assert_eq!(
            error.to_string(),
            "Validation failed: start date is after end date"
        );
        assert_eq!(error.kind(), ErrorKind::Validation);

        let error = DashError::shape("missing stats array");
        assert!(error.to_string().contains("missing stats array"));
        assert_eq!(error.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_input_errors_classify_as_validation() {
        let date = DashError::InvalidDate {
            input: "2025/01/01".to_string(),
        };
        assert!(date.to_string().contains("2025/01/01"));
        assert_eq!(date.kind(), ErrorKind::Validation);

        let config = DashError::InvalidConfig {
            var: "SPORTS_DASH_POLL_SECS".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(
            config.to_string(),
            "Invalid value 'soon' for SPORTS_DASH_POLL_SECS"
        );
        assert_eq!(config.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_error_info_keeps_http_status() {
        let error = DashError::Http {
            status: 404,
            body: "not found".to_string(),
        };
        let info = ErrorInfo::from(&error);

        assert_eq!(info.kind, ErrorKind::Http);
        assert_eq!(info.status, Some(404));
        assert_eq!(info.message, "HTTP 404: not found");
        assert_eq!(info.to_string(), "http error: HTTP 404: not found");
    }

    #[test]
    fn test_error_info_without_status() {
        let info = ErrorInfo::from(&DashError::validation("bad"));
        assert_eq!(info.status, None);
        assert_eq!(info.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_error_info_serializes_kind_lowercase() {
        let info = ErrorInfo::from(&DashError::shape("x"));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["kind"], "parse");
    }

    #[test]
    fn test_error_source_chain() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let dash_error = DashError::from(json_error);

        let error_trait: &dyn std::error::Error = &dash_error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(DashError::validation("nope"))
        }

        match test_function().unwrap_err() {
            DashError::Validation { message } => assert_eq!(message, "nope"),
            _ => panic!("Expected Validation error"),
        }
    }
}
