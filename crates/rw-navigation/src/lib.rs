//! Navigation resolution for RW sites.
//!
//! Merges the global navigation tree with the profile that matches a render
//! context, and partitions the result into named rendering surfaces.
//!
//! # Architecture
//!
//! - [`profile`]: profile matching and priority-based selection
//! - [`merge`]: one generic per-axis merge (`replace` / `append`)
//! - [`surface`]: explicit surfaces plus rule-based inference
//! - [`NavigationResolver`]: ties the above together into a [`NavigationModel`]
//!
//! Visibility predicates on menu items are carried through untouched; the
//! renderer evaluates them per page.
//!
//! # Example
//!
//! ```
//! use rw_config::NavigationSpec;
//! use rw_navigation::{DEFAULT_SURFACE_RULES, NavigationResolver, SurfaceInputs};
//!
//! let spec = NavigationSpec::default();
//! let mut warnings = Vec::new();
//! let model = NavigationResolver::new(&spec, DEFAULT_SURFACE_RULES)
//!     .build_model(&SurfaceInputs::default(), &mut warnings);
//! assert_eq!(model.surfaces[0].name, "main");
//! ```

pub mod merge;
mod model;
pub mod profile;
mod resolver;
pub mod surface;

pub use merge::{AxisContent, Keyed, merge_axis};
pub use model::{NavigationModel, ResolvedNavigation, SurfaceNavigation};
pub use profile::{ProfileSelection, select_profile};
pub use resolver::NavigationResolver;
pub use surface::{DEFAULT_SURFACE_RULES, ResolvedSurface, SurfaceInputs, SurfaceRule};
