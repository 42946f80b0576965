// ═══════════════════════════════════════════════════════════════════
// Provider Tests — FileSource, HttpSource, source selection
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

use market_dashboard_core::errors::CoreError;
use market_dashboard_core::providers::file::FileSource;
use market_dashboard_core::providers::http::HttpSource;
use market_dashboard_core::providers::traits::DocumentSource;
use market_dashboard_core::providers::{is_remote, source_for};

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — Mock Source
// ═══════════════════════════════════════════════════════════════════

/// Serves documents from memory, keyed by location.
struct MockSource {
    documents: HashMap<String, String>,
}

#[async_trait]
impl DocumentSource for MockSource {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn fetch(&self, location: &str) -> Result<String, CoreError> {
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| CoreError::FileIO(format!("{location}: not found")))
    }
}

// ═══════════════════════════════════════════════════════════════════
// Source selection
// ═══════════════════════════════════════════════════════════════════

mod selection {
    use super::*;

    #[test]
    fn urls_are_remote() {
        assert!(is_remote("http://example.com/market_data.json"));
        assert!(is_remote("https://example.com/market_data.json?token=abc"));
        assert!(is_remote("HTTPS://EXAMPLE.COM/data.json"));
    }

    #[test]
    fn paths_are_local() {
        assert!(!is_remote("data/market_data.json"));
        assert!(!is_remote("/var/www/market_data.json"));
        assert!(!is_remote("httpdata/market_data.json"));
    }

    #[test]
    fn source_for_picks_backend() {
        assert_eq!(source_for("https://example.com/a.json", None).name(), "HTTP");
        assert_eq!(source_for("data/a.json", Some(5)).name(), "File");
    }

    #[test]
    fn http_source_builds_with_and_without_timeout() {
        assert_eq!(HttpSource::new(None).name(), "HTTP");
        assert_eq!(HttpSource::new(Some(10)).name(), "HTTP");
        assert_eq!(HttpSource::default().name(), "HTTP");
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileSource
// ═══════════════════════════════════════════════════════════════════

mod file_source {
    use super::*;

    #[test]
    fn resolve_relative_against_base() {
        let source = FileSource::with_base_dir("/srv/dashboard");
        assert_eq!(
            source.resolve("data/market_data.json"),
            PathBuf::from("/srv/dashboard/data/market_data.json")
        );
    }

    #[test]
    fn resolve_absolute_ignores_base() {
        let source = FileSource::with_base_dir("/srv/dashboard");
        assert_eq!(source.resolve("/tmp/x.json"), PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn resolve_without_base_is_unchanged() {
        assert_eq!(
            FileSource::new().resolve("data/x.json"),
            PathBuf::from("data/x.json")
        );
    }

    #[tokio::test]
    async fn fetch_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ai_report.json"), r#"{"content":"hi"}"#).unwrap();

        let source = FileSource::with_base_dir(dir.path());
        let body = source.fetch("ai_report.json").await.unwrap();
        assert_eq!(body, r#"{"content":"hi"}"#);
    }

    #[tokio::test]
    async fn fetch_missing_file_is_file_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::with_base_dir(dir.path());

        let err = source.fetch("missing.json").await.unwrap_err();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("missing.json")),
            other => panic!("expected FileIO, got {other:?}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// HttpSource (no network: only failure paths that never connect)
// ═══════════════════════════════════════════════════════════════════

mod http_source {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Port 9 on localhost is the discard service; nothing listens in CI.
        let source = HttpSource::new(Some(2));
        let err = source
            .fetch("http://127.0.0.1:9/market_data.json?token=secret")
            .await
            .unwrap_err();
        match err {
            CoreError::Network(msg) => assert!(!msg.contains("secret")),
            other => panic!("expected Network, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_url_is_network_error() {
        let err = HttpSource::new(None).fetch("http://").await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trait objects
// ═══════════════════════════════════════════════════════════════════

mod trait_objects {
    use super::*;

    #[tokio::test]
    async fn mock_source_through_dyn() {
        let mut documents = HashMap::new();
        documents.insert("a".to_string(), "{}".to_string());
        let source: Box<dyn DocumentSource> = Box::new(MockSource { documents });

        assert_eq!(source.fetch("a").await.unwrap(), "{}");
        assert!(matches!(source.fetch("b").await, Err(CoreError::FileIO(_))));
    }
}
