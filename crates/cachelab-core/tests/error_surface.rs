use cachelab_core::{CachelabError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("path", "workload/rate")
        .with_hint("check the base configuration")
}

#[test]
fn tree_error_surface() {
    let err = CachelabError::Tree(sample_info("tree-type-mismatch", "leaf in the way"));
    assert_eq!(err.info().code, "tree-type-mismatch");
    assert!(err.info().context.contains_key("path"));
    assert!(err.to_string().starts_with("tree error:"));
}

#[test]
fn settings_error_surface() {
    let err = CachelabError::Settings(sample_info("settings-parse", "bad document"));
    assert_eq!(err.info().code, "settings-parse");
    assert_eq!(err.info().hint.as_deref(), Some("check the base configuration"));
}

#[test]
fn serde_error_surface() {
    let err = CachelabError::Serde(sample_info("json-encode", "encode failed"));
    assert_eq!(err.info().code, "json-encode");
}
