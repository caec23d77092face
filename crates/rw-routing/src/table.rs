//! Resolved route table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What produced a route.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteOrigin {
    /// Authored content file.
    Content { source_path: String },
    /// Synthetic collection landing page.
    CollectionIndex {
        collection: String,
        language: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
    },
    /// Synthetic taxonomy listing.
    TaxonomyListing { taxonomy: String, language: String },
    /// Synthetic taxonomy term page.
    TaxonomyTerm {
        taxonomy: String,
        language: String,
        /// Term name, lowercased. Distinct terms may share a slug.
        term: String,
    },
}

impl RouteOrigin {
    /// Whether the route is not backed by an authored file.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, Self::Content { .. })
    }
}

impl fmt::Display for RouteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content { source_path } => write!(f, "'{source_path}'"),
            Self::CollectionIndex {
                collection,
                language,
                version: Some(version),
            } => write!(f, "index of collection '{collection}' ({language}, {version})"),
            Self::CollectionIndex {
                collection,
                language,
                version: None,
            } => write!(f, "index of collection '{collection}' ({language})"),
            Self::TaxonomyListing { taxonomy, language } => {
                write!(f, "listing of taxonomy '{taxonomy}' ({language})")
            }
            Self::TaxonomyTerm {
                taxonomy,
                language,
                term,
            } => write!(f, "term '{term}' of taxonomy '{taxonomy}' ({language})"),
        }
    }
}

/// Rejected write to an occupied route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCollision {
    pub route: String,
    /// Origin that holds the route.
    pub existing: RouteOrigin,
    /// Origin that was rejected.
    pub incoming: RouteOrigin,
}

/// Result of [`ResolvedRouteTable::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Same synthetic identity declared again.
    Idempotent,
    Collision,
}

/// Route → origin map. The first writer of a route keeps it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRouteTable {
    routes: BTreeMap<String, RouteOrigin>,
    collisions: Vec<RouteCollision>,
}

impl ResolvedRouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a route.
    pub fn insert(&mut self, route: impl Into<String>, origin: RouteOrigin) -> InsertOutcome {
        let route = route.into();
        match self.routes.get(&route) {
            None => {
                self.routes.insert(route, origin);
                InsertOutcome::Inserted
            }
            Some(existing) if existing.is_synthetic() && *existing == origin => InsertOutcome::Idempotent,
            Some(existing) => {
                tracing::debug!(%route, %existing, incoming = %origin, "Route collision");
                self.collisions.push(RouteCollision {
                    existing: existing.clone(),
                    route,
                    incoming: origin,
                });
                InsertOutcome::Collision
            }
        }
    }

    #[must_use]
    pub fn get(&self, route: &str) -> Option<&RouteOrigin> {
        self.routes.get(route)
    }

    #[must_use]
    pub fn contains(&self, route: &str) -> bool {
        self.routes.contains_key(route)
    }

    /// Routes in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteOrigin)> {
        self.routes.iter().map(|(r, o)| (r.as_str(), o))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Rejected writes in insertion order.
    #[must_use]
    pub fn collisions(&self) -> &[RouteCollision] {
        &self.collisions
    }
}
