//! Per-axis merging of global navigation with a profile overlay.
//!
//! One routine serves all four axes. Named entries (menus, regions, footer
//! columns) are deduplicated by name: global entries whose name the overlay
//! redeclares are dropped, then every overlay entry is appended. Actions have
//! no name and are simply concatenated.

use rw_config::{
    AxisPolicy, FooterColumnSpec, MenuItemSpec, MenuSpec, NavigationFooterSpec,
    NavigationRegionSpec,
};

/// Navigation entry with an optional identity.
pub trait Keyed {
    /// Name used for de-duplication, if the entry has one.
    fn key(&self) -> Option<&str>;
}

impl Keyed for MenuSpec {
    fn key(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Keyed for NavigationRegionSpec {
    fn key(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Keyed for FooterColumnSpec {
    fn key(&self) -> Option<&str> {
        Some(&self.title)
    }
}

impl Keyed for MenuItemSpec {
    fn key(&self) -> Option<&str> {
        None
    }
}

/// Content of one navigation axis.
pub trait AxisContent: Clone {
    /// Global content followed by the overlay, overlay winning on conflicts.
    #[must_use]
    fn combine(global: &Self, overlay: &Self) -> Self;
}

impl<T: Keyed + Clone> AxisContent for Vec<T> {
    fn combine(global: &Self, overlay: &Self) -> Self {
        let mut merged: Vec<T> = global
            .iter()
            .filter(|entry| {
                entry
                    .key()
                    .is_none_or(|key| !overlay.iter().any(|o| o.key() == Some(key)))
            })
            .cloned()
            .collect();
        merged.extend(overlay.iter().cloned());
        merged
    }
}

impl AxisContent for NavigationFooterSpec {
    fn combine(global: &Self, overlay: &Self) -> Self {
        Self {
            copyright: overlay.copyright.clone().or_else(|| global.copyright.clone()),
            columns: AxisContent::combine(&global.columns, &overlay.columns),
            visibility: overlay.visibility.clone().or_else(|| global.visibility.clone()),
        }
    }
}

/// Merge one axis.
///
/// Without overlay the global content is kept. `Replace` discards the global
/// content; `Append` combines both.
#[must_use]
pub fn merge_axis<T: AxisContent>(global: &T, overlay: Option<&T>, policy: AxisPolicy) -> T {
    match (overlay, policy) {
        (None, _) => global.clone(),
        (Some(overlay), AxisPolicy::Replace) => overlay.clone(),
        (Some(overlay), AxisPolicy::Append) => T::combine(global, overlay),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn menu(name: &str, label: &str) -> MenuSpec {
        MenuSpec {
            name: name.to_owned(),
            items: vec![MenuItemSpec {
                label: label.to_owned(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn action(label: &str) -> MenuItemSpec {
        MenuItemSpec {
            label: label.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_overlay_keeps_global() {
        let global = vec![menu("main", "Home")];
        assert_eq!(merge_axis(&global, None, AxisPolicy::Replace), global);
        assert_eq!(merge_axis(&global, None, AxisPolicy::Append), global);
    }

    #[test]
    fn test_replace_discards_global() {
        let global = vec![menu("main", "Home"), menu("footer", "Legal")];
        let overlay = vec![menu("main", "Docs")];
        assert_eq!(
            merge_axis(&global, Some(&overlay), AxisPolicy::Replace),
            overlay
        );
    }

    #[test]
    fn test_append_overlay_wins_on_name_and_lands_last() {
        let global = vec![menu("main", "Home"), menu("footer", "Legal")];
        let overlay = vec![menu("main", "Docs"), menu("sidebar", "Guide")];
        let merged = merge_axis(&global, Some(&overlay), AxisPolicy::Append);
        assert_eq!(
            merged,
            vec![menu("footer", "Legal"), menu("main", "Docs"), menu("sidebar", "Guide")]
        );
    }

    #[test]
    fn test_append_actions_concatenates() {
        let global = vec![action("Search")];
        let overlay = vec![action("Search"), action("Edit")];
        let merged = merge_axis(&global, Some(&overlay), AxisPolicy::Append);
        assert_eq!(merged, vec![action("Search"), action("Search"), action("Edit")]);
    }

    #[test]
    fn test_append_footer() {
        let global = NavigationFooterSpec {
            copyright: Some("© Acme".to_owned()),
            columns: vec![
                FooterColumnSpec {
                    title: "Company".to_owned(),
                    ..Default::default()
                },
                FooterColumnSpec {
                    title: "Docs".to_owned(),
                    ..Default::default()
                },
            ],
            visibility: None,
        };
        let overlay = NavigationFooterSpec {
            copyright: None,
            columns: vec![FooterColumnSpec {
                title: "Docs".to_owned(),
                items: vec![action("API")],
                visibility: None,
            }],
            visibility: None,
        };
        let merged = merge_axis(&global, Some(&overlay), AxisPolicy::Append);
        assert_eq!(merged.copyright.as_deref(), Some("© Acme"));
        let titles: Vec<&str> = merged.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Company", "Docs"]);
        assert_eq!(merged.columns[1].items, vec![action("API")]);
    }

    #[test]
    fn test_replace_footer() {
        let global = NavigationFooterSpec {
            copyright: Some("© Acme".to_owned()),
            ..Default::default()
        };
        let merged = merge_axis(
            &global,
            Some(&NavigationFooterSpec::default()),
            AxisPolicy::Replace,
        );
        assert!(merged.is_empty());
    }
}
