//! Content routing for RW sites.
//!
//! Turns content items into public routes, honoring language prefixes,
//! version mounts and collection base paths, and synthesizes listing routes
//! for collections and taxonomies.
//!
//! # Architecture
//!
//! - [`Localization`]: normalized languages, language detection, prefixes
//! - [`Versioning`]: normalized versions, current-version resolution, mounts
//! - [`RouteBuilder`]: slug derivation and route composition
//! - [`TaxonomyAggregator`]: per-language taxonomy terms
//! - [`ResolvedRouteTable`]: route → origin map with collision tracking
//!
//! Nothing here performs I/O. Every function is deterministic and the
//! normalization helpers accept any input.
//!
//! # Example
//!
//! ```
//! use rw_config::{LocalizationConfig, TrailingSlash, VersioningConfig};
//! use rw_routing::{ContentItem, Localization, RouteBuilder, Versioning};
//!
//! let localization = Localization::new(&LocalizationConfig::default(), TrailingSlash::Always);
//! let versioning = Versioning::new(&VersioningConfig::default(), TrailingSlash::Always);
//! let builder = RouteBuilder::new(&localization, &versioning, &[], &[], TrailingSlash::Always);
//!
//! let mut item = ContentItem::new("blog/hello.md", "blog");
//! builder.assign(&mut item);
//! assert_eq!(item.route.as_deref(), Some("/blog/hello/"));
//! ```

mod content;
mod i18n;
mod path;
mod route;
mod table;
pub mod taxonomy;
mod version;

pub use content::{ContentItem, PageKind};
pub use i18n::{
    ItemLanguage, LanguageAlternate, LanguageConfig, Localization, LocalizationRuntime,
    TranslationIndex,
};
pub use path::{build_route, normalize_route, normalize_token, slugify};
pub use route::{RouteBuilder, RouteParts};
pub use table::{InsertOutcome, ResolvedRouteTable, RouteCollision, RouteOrigin};
pub use taxonomy::{TaxonomyAggregator, TaxonomyIndex, TermEntry};
pub use version::{VersionConfig, VersionEntry, VersionRuntime, Versioning};
