//! Slash-separated path helpers.
//!
//! Import paths and generated file names are always `/`-separated regardless
//! of the host platform, so these operate on strings rather than `std::path`.

/// Lexically normalise a path: collapse repeated separators, drop `.`
/// segments and resolve `..` against the preceding segment.
#[must_use]
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join non-empty elements with `/` and clean the result.
/// Returns an empty string when every element is empty.
#[must_use]
pub fn join(parts: &[&str]) -> String {
    let parts: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return String::new();
    }

    clean(&parts.join("/"))
}

/// Last element of the path, ignoring trailing separators.
#[must_use]
pub fn base(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }

    trimmed.rsplit_once('/').map_or(trimmed, |(_, last)| last)
}

/// Everything but the last element, cleaned.
#[must_use]
pub fn dir(path: &str) -> String {
    let head = path.rfind('/').map_or("", |i| &path[..=i]);

    clean(head)
}
