//! Relationship extraction from free-text sentences (regex-based).

use regex::Regex;

/// A single extracted relationship. Fields are filled depending on which
/// pattern(s) matched; all names are capitalized single words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationship {
    pub child: Option<String>,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub sibling1: Option<String>,
    pub sibling2: Option<String>,
}

impl Relationship {
    /// The sibling pair, if this record carries one.
    pub fn sibling_pair(&self) -> Option<(String, String)> {
        match (&self.sibling1, &self.sibling2) {
            (Some(a), Some(b)) => Some((a.clone(), b.clone())),
            _ => None,
        }
    }
}

/// Capitalize a name: first letter uppercase, remainder lowercase.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Extract a family relationship from one line of free text.
///
/// The input is lowercased and checked against all three patterns; the checks
/// are not short-circuited, so a line matching both the father and the mother
/// pattern ends up with `child` from the later (mother) match. Names are
/// single `\w+` tokens; multi-word names do not match.
///
/// Returns `None` when no pattern matches. Never fails.
pub fn extract_relationships(text: &str) -> Option<Relationship> {
    let text = text.to_lowercase();

    let father_regex = Regex::new(r"(\w+)'s father is (\w+)").expect("Invalid regex pattern");
    let mother_regex = Regex::new(r"(\w+)'s mother is (\w+)").expect("Invalid regex pattern");
    let sibling_regex =
        Regex::new(r"(\w+) is (\w+)'s (brother|sister|sibling)").expect("Invalid regex pattern");

    let mut relation = Relationship::default();
    let mut matched = false;

    if let Some(cap) = father_regex.captures(&text) {
        relation.child = Some(capitalize(&cap[1]));
        relation.father = Some(capitalize(&cap[2]));
        matched = true;
    }

    if let Some(cap) = mother_regex.captures(&text) {
        relation.child = Some(capitalize(&cap[1]));
        relation.mother = Some(capitalize(&cap[2]));
        matched = true;
    }

    if let Some(cap) = sibling_regex.captures(&text) {
        relation.sibling1 = Some(capitalize(&cap[1]));
        relation.sibling2 = Some(capitalize(&cap[2]));
        matched = true;
    }

    if matched { Some(relation) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_father() {
        let rel = extract_relationships("Abhay's father is Raj").unwrap();
        assert_eq!(rel.child.as_deref(), Some("Abhay"));
        assert_eq!(rel.father.as_deref(), Some("Raj"));
        assert!(rel.mother.is_none());
    }

    #[test]
    fn test_extract_mother() {
        let rel = extract_relationships("Kavya's mother is Neha").unwrap();
        assert_eq!(rel.child.as_deref(), Some("Kavya"));
        assert_eq!(rel.mother.as_deref(), Some("Neha"));
        assert!(rel.father.is_none());
    }

    #[test]
    fn test_extract_sibling() {
        let rel = extract_relationships("Abhay is Kavya's brother").unwrap();
        assert_eq!(rel.sibling1.as_deref(), Some("Abhay"));
        assert_eq!(rel.sibling2.as_deref(), Some("Kavya"));
        assert_eq!(
            rel.sibling_pair(),
            Some(("Abhay".to_string(), "Kavya".to_string()))
        );
        assert!(rel.child.is_none());
    }

    #[test]
    fn test_extract_case_insensitive() {
        let rel = extract_relationships("ABHAY'S FATHER IS RAJ").unwrap();
        assert_eq!(rel.child.as_deref(), Some("Abhay"));
        assert_eq!(rel.father.as_deref(), Some("Raj"));
    }

    #[test]
    fn test_extract_no_match() {
        assert!(extract_relationships("hello there").is_none());
        assert!(extract_relationships("xyz").is_none());
        assert!(extract_relationships("").is_none());
    }

    #[test]
    fn test_extract_father_and_mother_same_line() {
        // Both patterns match; the mother match is checked last and overwrites
        // the child capture (last-match-wins).
        let rel =
            extract_relationships("Abhay's father is Raj and Kavya's mother is Neha").unwrap();
        assert_eq!(rel.child.as_deref(), Some("Kavya"));
        assert_eq!(rel.father.as_deref(), Some("Raj"));
        assert_eq!(rel.mother.as_deref(), Some("Neha"));
    }

    #[test]
    fn test_extract_sibling_keywords() {
        for word in ["brother", "sister", "sibling"] {
            let line = format!("Asha is Ravi's {}", word);
            let rel = extract_relationships(&line).unwrap();
            assert_eq!(rel.sibling1.as_deref(), Some("Asha"));
            assert_eq!(rel.sibling2.as_deref(), Some("Ravi"));
        }
    }

    #[test]
    fn test_extract_multi_word_names_unsupported() {
        // "Mary Jane" is two tokens; the name capture only picks up the word
        // adjacent to the pattern anchor.
        let rel = extract_relationships("Mary Jane's father is Raj").unwrap();
        assert_eq!(rel.child.as_deref(), Some("Jane"));
        assert_eq!(rel.father.as_deref(), Some("Raj"));
    }

    #[test]
    fn test_extract_never_empty_record() {
        // A Some result always carries at least one filled field.
        let rel = extract_relationships("Abhay's father is Raj").unwrap();
        assert_ne!(rel, Relationship::default());
    }
}
