use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CueError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CueError::not_found("x").to_string().contains("not found:"));
    assert!(CueError::load("x").to_string().contains("load error:"));
    assert!(CueError::media("x").to_string().contains("media error:"));
    assert!(CueError::config("x").to_string().contains("config error:"));
    assert!(
        CueError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_load_errors_are_transient() {
    assert!(CueError::load("timeout").is_transient());
    assert!(!CueError::validation("bad").is_transient());
    assert!(!CueError::media("404").is_transient());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CueError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
