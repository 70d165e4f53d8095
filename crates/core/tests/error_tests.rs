// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finmate_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad value".into());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "CoinCap".into(),
            message: "HTTP 429".into(),
        };
        assert_eq!(err.to_string(), "API error (CoinCap): HTTP 429");
    }

    #[test]
    fn api_helper_builds_same_variant() {
        let err = CoreError::api("Yahoo Finance", "timeout");
        assert!(matches!(
            err,
            CoreError::Api { ref provider, ref message } if provider == "Yahoo Finance" && message == "timeout"
        ));
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn no_provider() {
        let err = CoreError::NoProvider("crypto".into());
        assert_eq!(err.to_string(), "No provider available for market: crypto");
    }

    #[test]
    fn quote_not_available() {
        let err = CoreError::QuoteNotAvailable {
            symbol: "ZZZZ".into(),
            market: "stock".into(),
        };
        assert_eq!(err.to_string(), "Quote not available for ZZZZ (stock)");
    }

    #[test]
    fn store() {
        let err = CoreError::Store {
            table: "transactions".into(),
            status: 500,
            message: "internal".into(),
        };
        assert_eq!(
            err.to_string(),
            "Store error on 'transactions' (HTTP 500): internal"
        );
    }

    #[test]
    fn not_authenticated() {
        let err = CoreError::NotAuthenticated("token expired".into());
        assert_eq!(err.to_string(), "Not authenticated: token expired");
    }

    #[test]
    fn validation() {
        let err = CoreError::Validation("amount must be positive".into());
        assert_eq!(err.to_string(), "Validation failed: amount must be positive");
    }
}

// ── Debug trait ─────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn debug_names_the_variant() {
        let err = CoreError::NotAuthenticated("x".into());
        assert!(format!("{err:?}").contains("NotAuthenticated"));
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("no such file")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_converts_io_error() {
        fn read_missing() -> Result<Vec<u8>, CoreError> {
            Ok(std::fs::read("/definitely/not/a/real/path/prefs.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }
}
