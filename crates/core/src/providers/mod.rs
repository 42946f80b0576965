pub mod file;
pub mod http;
pub mod traits;

use file::FileSource;
use http::HttpSource;
use traits::DocumentSource;

/// `true` for `http://` and `https://` locations.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Pick a source for `location`: HTTP for URLs, the local filesystem otherwise.
pub fn source_for(location: &str, timeout_secs: Option<u64>) -> Box<dyn DocumentSource> {
    if is_remote(location) {
        Box::new(HttpSource::new(timeout_secs))
    } else {
        Box::new(FileSource::new())
    }
}
