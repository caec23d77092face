//! Site-wide routing pass for RW.
//!
//! This crate provides:
//! - [`build_site`]: routes every content item, synthesizes collection and
//!   taxonomy listings, resolves per-surface navigation and verifies the result
//! - [`BuildContext`]: normalized per-build state shared by every stage
//! - [`SiteVerifier`]: collision, landing page, taxonomy and translation checks
//!
//! # Quick Start
//!
//! ```
//! use rw_config::SiteSpec;
//! use rw_routing::ContentItem;
//! use rw_site::build_site;
//!
//! let spec = SiteSpec::from_toml_str(r#"
//! [[collections]]
//! name = "docs"
//! index = true
//! "#).unwrap();
//!
//! let build = build_site(&spec, vec![ContentItem::new("docs/guide.md", "docs")]);
//! assert!(build.routes.contains("/docs/"));
//! assert!(build.routes.contains("/docs/guide/"));
//! assert!(build.warnings.is_empty());
//! ```

mod build;
mod context;
mod verify;

pub use build::{SiteBuild, build_site};
pub use context::BuildContext;
pub use verify::SiteVerifier;
