// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finance_analytics_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_config() {
        let err = CoreError::InvalidConfig("tax.tax_rate must be within [0, 1], got 2".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: tax.tax_rate must be within [0, 1], got 2"
        );
    }

    #[test]
    fn entropy() {
        let err = CoreError::Entropy("no OS source".into());
        assert_eq!(err.to_string(), "Entropy unavailable: no OS source");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("boom".into());
        assert_eq!(err.to_string(), "Serialization error: boom");
    }

    #[test]
    fn deserialization_empty_message() {
        let err = CoreError::Deserialization(String::new());
        assert_eq!(err.to_string(), "Deserialization error: ");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_json_error() {
        fn parse(s: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(s)?)
        }
        assert!(parse("[1, 2").is_err());
        assert!(parse("[1, 2]").is_ok());
    }

    #[test]
    fn error_is_std_error() {
        fn takes_std_error(_: &dyn std::error::Error) {}
        takes_std_error(&CoreError::Entropy("x".into()));
    }
}
