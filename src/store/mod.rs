//! Tree store: the persisted child -> parentage mapping.
//!
//! The store is a flat JSON file, loaded once at session start and written
//! back either on every successful add (web) or on an explicit save command
//! (CLI). A single process owns the file; there is no locking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Parentage record for one child. An absent parent is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parentage {
    pub father: String,
    pub mother: String,
}

/// The full family tree, keyed by child name. BTreeMap keeps the serialized
/// file in a deterministic order.
pub type FamilyTree = BTreeMap<String, Parentage>;

/// A transient sibling pair (sibling1, sibling2).
pub type SiblingPair = (String, String);

/// Load the family tree from `path`. A missing file yields an empty tree; a
/// malformed file propagates the parse error.
pub fn load(path: &Path) -> Result<FamilyTree> {
    if !path.exists() {
        return Ok(FamilyTree::new());
    }
    let contents = std::fs::read_to_string(path)?;
    let tree: FamilyTree = serde_json::from_str(&contents)?;
    Ok(tree)
}

/// Serialize the full tree to `path`, overwriting prior contents.
/// Written as pretty JSON with 4-space indentation.
pub fn save(path: &Path, tree: &FamilyTree) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tree.serialize(&mut ser)?;
    std::fs::write(path, buf)?;
    Ok(())
}

/// Insert or replace the record for `child`.
///
/// The whole record is replaced, not merged: a mother-only sentence for a
/// child with a stored father drops that father. Observed legacy behavior,
/// kept and covered by tests (see DESIGN.md).
pub fn upsert(tree: &mut FamilyTree, child: &str, father: Option<&str>, mother: Option<&str>) {
    tree.insert(
        child.to_string(),
        Parentage {
            father: father.unwrap_or("").to_string(),
            mother: mother.unwrap_or("").to_string(),
        },
    );
}

/// Record a sibling pair, skipping pairs already present. Keeps the session
/// list (and the sidecar, when persisted) free of duplicates, so restating a
/// sibling sentence does not grow the graph.
pub fn record_sibling(pairs: &mut Vec<SiblingPair>, pair: SiblingPair) {
    if !pairs.contains(&pair) {
        pairs.push(pair);
    }
}

/// Delete the storage file (and the sibling sidecar, if present). A missing
/// file is not an error; a subsequent `load` yields an empty tree.
pub fn reset(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    let sidecar = siblings_path(path);
    if sidecar.exists() {
        std::fs::remove_file(sidecar)?;
    }
    Ok(())
}

/// Sidecar file for persisted sibling pairs. Kept separate so the primary
/// file stays a plain child -> parentage mapping.
pub fn siblings_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".siblings.json");
    PathBuf::from(name)
}

/// Load persisted sibling pairs. Missing sidecar yields an empty list.
pub fn load_siblings(path: &Path) -> Result<Vec<SiblingPair>> {
    let sidecar = siblings_path(path);
    if !sidecar.exists() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(sidecar)?;
    let pairs: Vec<SiblingPair> = serde_json::from_str(&contents)?;
    Ok(pairs)
}

/// Persist sibling pairs to the sidecar file.
pub fn save_siblings(path: &Path, pairs: &[SiblingPair]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    pairs.serialize(&mut ser)?;
    std::fs::write(siblings_path(path), buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FamtreeError;
    use tempfile::TempDir;

    fn tree_path(dir: &TempDir) -> PathBuf {
        dir.path().join("family_tree.json")
    }

    #[test]
    fn test_load_missing_file_yields_empty() {
        let dir = TempDir::new().unwrap();
        let tree = load(&tree_path(&dir)).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_load_malformed_file_propagates_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = tree_path(&dir);
        std::fs::write(&path, "{ not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, FamtreeError::Parse(_)));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = tree_path(&dir);

        let mut tree = FamilyTree::new();
        upsert(&mut tree, "Abhay", Some("Raj"), Some("Neha"));
        upsert(&mut tree, "Kavya", Some("Raj"), None);

        save(&path, &tree).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, tree);

        // save(load()) is a no-op on contents
        save(&path, &loaded).unwrap();
        assert_eq!(load(&path).unwrap(), tree);
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = tree_path(&dir);
        let mut tree = FamilyTree::new();
        upsert(&mut tree, "Abhay", Some("Raj"), None);
        save(&path, &tree).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("    \"Abhay\""));
        assert!(contents.contains("        \"father\": \"Raj\""));
    }

    #[test]
    fn test_upsert_scenario_father_then_mother_replaces() {
        // "Abhay's father is Raj" then "Abhay's mother is Neha": the second
        // upsert replaces the whole record, losing the father.
        let mut tree = FamilyTree::new();
        upsert(&mut tree, "Abhay", Some("Raj"), None);
        assert_eq!(
            tree.get("Abhay"),
            Some(&Parentage {
                father: "Raj".to_string(),
                mother: String::new()
            })
        );

        upsert(&mut tree, "Abhay", None, Some("Neha"));
        assert_eq!(
            tree.get("Abhay"),
            Some(&Parentage {
                father: String::new(),
                mother: "Neha".to_string()
            })
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_upsert_idempotent() {
        let mut once = FamilyTree::new();
        upsert(&mut once, "Abhay", Some("Raj"), Some("Neha"));

        let mut twice = FamilyTree::new();
        upsert(&mut twice, "Abhay", Some("Raj"), Some("Neha"));
        upsert(&mut twice, "Abhay", Some("Raj"), Some("Neha"));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_reset_then_load_empty() {
        let dir = TempDir::new().unwrap();
        let path = tree_path(&dir);

        let mut tree = FamilyTree::new();
        upsert(&mut tree, "Abhay", Some("Raj"), None);
        save(&path, &tree).unwrap();
        save_siblings(&path, &[("Abhay".to_string(), "Kavya".to_string())]).unwrap();

        reset(&path).unwrap();
        assert!(!path.exists());
        assert!(!siblings_path(&path).exists());
        assert!(load(&path).unwrap().is_empty());
        assert!(load_siblings(&path).unwrap().is_empty());
    }

    #[test]
    fn test_reset_missing_file_ok() {
        let dir = TempDir::new().unwrap();
        assert!(reset(&tree_path(&dir)).is_ok());
    }

    #[test]
    fn test_record_sibling_dedupes() {
        let mut pairs = Vec::new();
        let pair = ("Abhay".to_string(), "Kavya".to_string());
        record_sibling(&mut pairs, pair.clone());
        record_sibling(&mut pairs, pair.clone());
        assert_eq!(pairs, vec![pair]);

        record_sibling(&mut pairs, ("Asha".to_string(), "Ravi".to_string()));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_siblings_sidecar_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = tree_path(&dir);
        let pairs = vec![
            ("Abhay".to_string(), "Kavya".to_string()),
            ("Asha".to_string(), "Ravi".to_string()),
        ];
        save_siblings(&path, &pairs).unwrap();
        assert_eq!(load_siblings(&path).unwrap(), pairs);
        // primary file untouched by sibling persistence
        assert!(!path.exists());
    }
}
