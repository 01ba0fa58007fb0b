use crate::foundation::error::{CueError, CueResult};

const VERBATIM_PREFIXES: [&str; 4] = ["http://", "https://", "blob:", "data:"];

/// Resolves overlay/section media references into URLs a playback surface can load.
///
/// A reference is either an absolute URL, used verbatim, or a storage object key that is joined
/// onto the configured content-delivery base URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaResolver {
    base_url: Option<String>,
}

impl MediaResolver {
    /// Create a resolver with an optional content-delivery base URL.
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|b| b.trim().trim_end_matches('/').to_owned())
            .filter(|b| !b.is_empty());
        Self { base_url }
    }

    /// Configured base URL without trailing slashes.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Return `true` when `reference` is already an absolute URL.
    pub fn is_absolute(reference: &str) -> bool {
        let lower = reference.trim_start().to_ascii_lowercase();
        VERBATIM_PREFIXES.iter().any(|p| lower.starts_with(p))
    }

    /// Resolve a media reference.
    pub fn resolve(&self, reference: &str) -> CueResult<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(CueError::validation("media reference must be non-empty"));
        }
        if Self::is_absolute(reference) {
            return Ok(reference.to_owned());
        }

        let key = normalize_object_key(reference)?;
        let Some(base) = self.base_url.as_deref() else {
            return Err(CueError::config(format!(
                "storage key '{key}' needs a media base URL"
            )));
        };
        Ok(format!("{base}/{key}"))
    }
}

/// Normalize a storage object key: `/` separators, no empty or `.` segments, no `..`.
fn normalize_object_key(key: &str) -> CueResult<String> {
    let s = key.replace('\\', "/");
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CueError::validation("storage keys must not contain '..'"));
        }
        out.push(part);
    }
    if out.is_empty() {
        return Err(CueError::validation("storage key must contain an object name"));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/media.rs"]
mod tests;
