//! Route normalization helpers.
//!
//! Every function here is total: empty input, already-normalized input and
//! backslash-separated input all produce a sensible route.

use std::sync::LazyLock;

use regex::Regex;
use rw_config::TrailingSlash;

/// Runs of characters that are not letters or digits.
static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

/// Split a raw path into clean segments.
///
/// Backslashes count as separators; empty and `.` segments are dropped.
pub fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.trim()
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ".")
}

/// True when the raw path denotes a directory (empty, or ends with a separator).
#[must_use]
pub fn is_directory_form(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.ends_with('/') || trimmed.ends_with('\\')
}

/// Assemble a route from segments and enforce the trailing-slash policy.
///
/// `directory` is only consulted by [`TrailingSlash::Preserve`]. The root
/// route is always `/`.
#[must_use]
pub fn route_from_segments<'a>(
    parts: impl IntoIterator<Item = &'a str>,
    directory: bool,
    policy: TrailingSlash,
) -> String {
    let mut route = String::new();
    for part in parts {
        route.push('/');
        route.push_str(part);
    }
    if route.is_empty() {
        return "/".to_owned();
    }
    let trailing = match policy {
        TrailingSlash::Always => true,
        TrailingSlash::Never => false,
        TrailingSlash::Preserve => directory,
    };
    if trailing {
        route.push('/');
    }
    route
}

/// Normalize a route: collapse and trim slashes, then apply the policy.
#[must_use]
pub fn normalize_route(raw: &str, policy: TrailingSlash) -> String {
    route_from_segments(segments(raw), is_directory_form(raw), policy)
}

/// Join a base path and a slug into a route.
///
/// ```
/// use rw_config::TrailingSlash;
/// use rw_routing::build_route;
///
/// assert_eq!(build_route("/blog/", "2024/hello", TrailingSlash::Always), "/blog/2024/hello/");
/// assert_eq!(build_route("blog", "", TrailingSlash::Never), "/blog");
/// assert_eq!(build_route("", "", TrailingSlash::Never), "/");
/// ```
#[must_use]
pub fn build_route(base_path: &str, slug: &str, policy: TrailingSlash) -> String {
    let directory = if segments(slug).next().is_some() {
        is_directory_form(slug)
    } else {
        is_directory_form(base_path)
    };
    route_from_segments(segments(base_path).chain(segments(slug)), directory, policy)
}

/// Strip `prefix` segments from the front of `route` when they match.
///
/// Returns the remaining segments, or `None` when the route is not under
/// the prefix. Comparison is exact unless `ignore_case` is set.
#[must_use]
pub fn strip_segments<'a>(route: &'a str, prefix: &[&str], ignore_case: bool) -> Option<Vec<&'a str>> {
    let parts: Vec<&str> = segments(route).collect();
    if parts.len() < prefix.len() {
        return None;
    }
    let matches = parts.iter().zip(prefix).all(|(a, b)| {
        if ignore_case {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    });
    matches.then(|| parts[prefix.len()..].to_vec())
}

/// Normalize a language or lookup token: trim, lowercase, `_` → `-`.
#[must_use]
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase().replace('_', "-")
}

/// Turn free text into a URL slug.
///
/// Letters and digits are kept (lowercased, Unicode included); every other
/// run of characters becomes a single `-`. Returns an empty string when
/// nothing sluggable remains.
///
/// ```
/// use rw_routing::slugify;
///
/// assert_eq!(slugify("Rust & WebAssembly"), "rust-webassembly");
/// assert_eq!(slugify("  Ünïcode  Tags "), "ünïcode-tags");
/// assert_eq!(slugify("!!!"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    NON_SLUG_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_owned()
}
