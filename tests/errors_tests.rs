use snaplink::errors::{Result, SnaplinkError};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_invalid_url_error() {
        let error = SnaplinkError::invalid_url("missing scheme");

        assert!(matches!(error, SnaplinkError::InvalidUrl(_)));
        assert!(error.to_string().contains("Invalid URL"));
        assert!(error.to_string().contains("missing scheme"));
    }

    #[test]
    fn test_code_conflict_error() {
        let error = SnaplinkError::code_conflict("MYLINK1 taken");

        assert!(matches!(error, SnaplinkError::CodeConflict(_)));
        assert!(error.to_string().contains("Code Conflict"));
        assert!(error.to_string().contains("MYLINK1 taken"));
    }

    #[test]
    fn test_error_codes_are_stable() {
        let errors = [
            (SnaplinkError::invalid_url(""), "E001"),
            (SnaplinkError::invalid_code_format(""), "E002"),
            (SnaplinkError::code_conflict(""), "E003"),
            (SnaplinkError::allocation_exhausted(""), "E004"),
            (SnaplinkError::not_found(""), "E005"),
            (SnaplinkError::store_unavailable(""), "E006"),
            (SnaplinkError::config(""), "E007"),
            (SnaplinkError::file_operation(""), "E008"),
        ];

        for (error, code) in errors {
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn test_only_store_and_ambient_errors_are_internal() {
        assert!(SnaplinkError::store_unavailable("x").is_internal());
        assert!(SnaplinkError::config("x").is_internal());
        assert!(!SnaplinkError::not_found("x").is_internal());
        assert!(!SnaplinkError::allocation_exhausted("x").is_internal());
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let error: SnaplinkError = io_error.into();

        assert!(matches!(error, SnaplinkError::FileOperation(_)));
        assert!(error.message().contains("file missing"));
    }

    #[test]
    fn test_db_error_conversion() {
        let db_error = sea_orm::DbErr::Custom("connection refused".to_string());
        let error: SnaplinkError = db_error.into();

        assert!(matches!(error, SnaplinkError::StoreUnavailable(_)));
        assert!(error.message().contains("connection refused"));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.toml")?)
        }

        let error = read_missing().unwrap_err();
        assert!(matches!(error, SnaplinkError::FileOperation(_)));
        assert!(error.source().is_none());
    }
}

#[cfg(test)]
mod error_format_tests {
    use super::*;

    #[test]
    fn test_format_simple() {
        let error = SnaplinkError::not_found("Code not found: abc123");
        assert_eq!(error.format_simple(), "Not Found: Code not found: abc123");
        assert_eq!(error.to_string(), error.format_simple());
    }

    #[test]
    fn test_format_colored_contains_parts() {
        let error = SnaplinkError::allocation_exhausted("5 attempts");
        let colored = error.format_colored();
        assert!(colored.contains("E004"));
        assert!(colored.contains("5 attempts"));
    }

    #[test]
    fn test_http_status_mapping() {
        use actix_web::http::StatusCode;

        assert_eq!(
            SnaplinkError::invalid_code_format("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SnaplinkError::code_conflict("x").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SnaplinkError::allocation_exhausted("x").http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            SnaplinkError::store_unavailable("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
