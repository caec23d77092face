//! Content manifest loading.
//!
//! A manifest lists the content items produced by discovery, either as a
//! bare sequence or under an `items` key. Files ending in `.yaml` or `.yml`
//! are read as YAML, anything else as JSON.

use std::path::Path;

use rw_routing::ContentItem;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    Items(Vec<ContentItem>),
    Document { items: Vec<ContentItem> },
}

impl From<Manifest> for Vec<ContentItem> {
    fn from(manifest: Manifest) -> Self {
        match manifest {
            Manifest::Items(items) | Manifest::Document { items } => items,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

/// Read content items from a manifest file.
///
/// # Errors
///
/// Returns an error if the file can't be read or parsed, or if an item has
/// no source path.
pub(crate) fn load_manifest(path: &Path) -> Result<Vec<ContentItem>, CliError> {
    let content = std::fs::read_to_string(path)?;
    let manifest: Manifest = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    let items: Vec<ContentItem> = manifest.into();

    if let Some(position) = items.iter().position(|i| i.source_path.trim().is_empty()) {
        return Err(CliError::Validation(format!(
            "{}: item {position} has no source_path",
            path.display()
        )));
    }

    tracing::debug!(path = %path.display(), items = items.len(), "Loaded content manifest");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_sequence() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content.json");
        fs::write(
            &path,
            r#"[{"source_path": "docs/guide.md", "collection": "docs", "tags": ["Rust"]}]"#,
        )
        .unwrap();

        let items = load_manifest(&path).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source_path, "docs/guide.md");
        assert_eq!(items[0].collection, "docs");
        assert_eq!(items[0].tags, vec!["Rust".to_owned()]);
    }

    #[test]
    fn test_load_yaml_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content.yml");
        fs::write(
            &path,
            r"
items:
  - source_path: fr/blog/bonjour.md
    collection: blog
    draft: true
    metadata:
      categories: [News]
",
        )
        .unwrap();

        let items = load_manifest(&path).unwrap();

        assert_eq!(items.len(), 1);
        assert!(items[0].draft);
        assert_eq!(
            items[0].meta("Categories"),
            Some(&serde_json::json!(["News"]))
        );
    }

    #[test]
    fn test_load_rejects_missing_source_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content.json");
        fs::write(&path, r#"[{"collection": "docs"}]"#).unwrap();

        let err = load_manifest(&path).unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("item 0 has no source_path"));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(load_manifest(&path), Err(CliError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_manifest(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
