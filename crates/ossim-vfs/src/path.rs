//! Pure path-string manipulation. Nothing here touches the tree.
//!
//! `..` and `.` are NOT interpreted: they survive normalization as literal
//! segments and therefore fail to resolve. Callers that want parent
//! navigation (`cd ..`) map it through [`parent_of`] themselves.

use std::borrow::Cow;

/// Check whether a path is already in normal form (starts with `/`, no `//`,
/// no trailing `/` unless root).
fn is_normalized(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    if path.len() > 1 && path.ends_with('/') {
        return false;
    }
    !path.contains("//")
}

/// Canonicalize an absolute path: ensure leading `/`, collapse `//`, strip
/// the trailing `/` (except for root). Zero-alloc when already canonical.
pub fn canonicalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }
    let mut result = String::with_capacity(path.len() + 1);
    result.push('/');
    let mut prev_slash = true;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                result.push(ch);
            }
            prev_slash = true;
        } else {
            result.push(ch);
            prev_slash = false;
        }
    }
    if result.len() > 1 && result.ends_with('/') {
        result.pop();
    }
    Cow::Owned(result)
}

/// Turn `raw` into a canonical absolute path. Absolute input is used as is;
/// relative input is joined onto `cwd` with exactly one separator.
pub fn normalize(cwd: &str, raw: &str) -> String {
    if raw.starts_with('/') {
        return canonicalize(raw).into_owned();
    }
    if raw.is_empty() {
        return canonicalize(cwd).into_owned();
    }
    let cwd = canonicalize(cwd);
    let joined = if cwd == "/" {
        format!("/{raw}")
    } else {
        format!("{cwd}/{raw}")
    };
    canonicalize(&joined).into_owned()
}

/// Strip the final segment. Root (or a single segment) yields `/`.
pub fn parent_of(path: &str) -> String {
    let path = canonicalize(path);
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => path[..i].to_string(),
    }
}

/// The final segment; empty only for root.
pub fn base_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Append a child name to a canonical directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Non-empty segments of a path, root first.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
