//! Profile matching and selection.

use glob::Pattern;
use rw_config::{NavigationProfileSpec, ProfileMatchSpec, RenderContextSpec};

/// Outcome of picking the active profile for a context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileSelection<'a> {
    /// Winning profile, if any matched.
    pub profile: Option<&'a NavigationProfileSpec>,
    /// Other matching profiles with the winner's priority.
    pub tied: Vec<&'a NavigationProfileSpec>,
}

/// Whether a profile's match predicate accepts the context.
///
/// Any non-empty criterion list that matches is enough. A profile with no
/// criteria never matches.
#[must_use]
pub fn profile_matches(spec: &ProfileMatchSpec, context: &RenderContextSpec) -> bool {
    if spec.is_empty() {
        return false;
    }
    let path = context.path.as_deref().map(str::trim).filter(|p| !p.is_empty());
    if let Some(path) = path
        && spec.paths.iter().any(|pattern| path_matches(pattern, path))
    {
        return true;
    }
    any_ignore_case(&spec.collections, context.collection.as_deref())
        || any_ignore_case(&spec.layouts, context.layout.as_deref())
        || any_ignore_case(&spec.projects, context.project.as_deref())
}

fn any_ignore_case(candidates: &[String], value: Option<&str>) -> bool {
    value.is_some_and(|value| {
        candidates
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(value.trim()))
    })
}

/// Match a path pattern against a route.
///
/// - Glob patterns (`*`, `?`, `[`) match the path or any of its ancestor
///   directories.
/// - A plain pattern ending in `/` matches the directory and everything below.
/// - Any other plain pattern matches the path exactly, ignoring a trailing `/`.
#[must_use]
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return false;
    }
    if pattern.contains(['*', '?', '[']) {
        return match Pattern::new(pattern) {
            Ok(glob) => ancestor_chain(path).iter().any(|p| glob.matches(p)),
            Err(err) => {
                tracing::debug!(pattern, error = %err, "Invalid path pattern, comparing literally");
                same_path(pattern, path)
            }
        };
    }
    if pattern.ends_with('/') {
        let directory = if path.ends_with('/') {
            path.to_owned()
        } else {
            format!("{path}/")
        };
        return directory.starts_with(pattern);
    }
    same_path(pattern, path)
}

fn same_path(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

/// The path and its ancestors, deepest first, in both slash forms.
///
/// `"/docs/api"` → `["/docs/api/", "/docs/api", "/docs/", "/docs", "/"]`
fn ancestor_chain(path: &str) -> Vec<String> {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut chain = Vec::with_capacity(parts.len() * 2 + 1);
    for end in (1..=parts.len()).rev() {
        let joined = format!("/{}", parts[..end].join("/"));
        chain.push(format!("{joined}/"));
        chain.push(joined);
    }
    chain.push("/".to_owned());
    chain
}

/// Pick the active profile for a context.
///
/// The highest priority wins. Equal priorities resolve to the profile
/// declared first; the others are reported in `tied`.
#[must_use]
pub fn select_profile<'a>(
    profiles: &'a [NavigationProfileSpec],
    context: &RenderContextSpec,
) -> ProfileSelection<'a> {
    let mut selection = ProfileSelection::default();
    for profile in profiles.iter().filter(|p| profile_matches(&p.matches, context)) {
        match selection.profile {
            Some(best) if profile.priority > best.priority => {
                selection.profile = Some(profile);
                selection.tied.clear();
            }
            Some(best) if profile.priority == best.priority => selection.tied.push(profile),
            Some(_) => {}
            None => selection.profile = Some(profile),
        }
    }
    selection
}
