//! Prefix generation
//!
//! Every product is expanded into the prefixes a user could plausibly type:
//! prefixes of each field combination with whitespace removed, plus prefixes
//! of every individual word. Output order is deterministic (first-seen).

use std::collections::HashSet;

/// Field orderings over (name, category, type), by position.
///
/// Singles, pairs in both orders, and one triple starting with each field,
/// so a query may open with any field and continue with any other.
const COMBINATIONS: [&[usize]; 12] = [
    &[0],
    &[1],
    &[2],
    &[0, 1],
    &[0, 2],
    &[1, 2],
    &[0, 1, 2],
    &[1, 0],
    &[2, 0],
    &[1, 2, 0],
    &[2, 1],
    &[2, 0, 1],
];

/// Insertion-ordered string set.
#[derive(Debug, Default)]
struct PrefixSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl PrefixSet {
    fn new() -> Self {
        Self::default()
    }

    /// Insert a prefix; returns false if it was already present.
    fn insert(&mut self, prefix: &str) -> bool {
        if self.seen.contains(prefix) {
            return false;
        }
        self.seen.insert(prefix.to_string());
        self.order.push(prefix.to_string());
        true
    }

    /// Insert every prefix of `s`, shortest first, cut on char boundaries.
    fn insert_prefixes_of(&mut self, s: &str) {
        for (idx, ch) in s.char_indices() {
            self.insert(&s[..idx + ch.len_utf8()]);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// Lowercase and trim a product field before indexing.
pub fn normalize_field(field: &str) -> String {
    field.trim().to_lowercase()
}

/// Lowercase a query and strip all whitespace from it.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<String>()
        .to_lowercase()
}

fn extend_with_text(set: &mut PrefixSet, text: &str) {
    let words: Vec<&str> = text.split_whitespace().collect();
    set.insert_prefixes_of(&words.concat());
    for word in &words {
        set.insert_prefixes_of(word);
    }
}

/// All prefixes of `text`: whole-string (whitespace removed) first, then
/// each word's prefixes in increasing length.
///
/// Input is expected to be normalized already.
pub fn generate_prefixes(text: &str) -> Vec<String> {
    let mut set = PrefixSet::new();
    extend_with_text(&mut set, text);
    set.into_vec()
}

/// The 12 field combinations, joined with single spaces.
///
/// Empty fields are skipped; combinations that end up empty are dropped.
pub fn field_combinations(name: &str, category: &str, product_type: &str) -> Vec<String> {
    let fields = [name, category, product_type];
    COMBINATIONS
        .iter()
        .map(|combo| {
            combo
                .iter()
                .map(|&i| fields[i])
                .filter(|f| !f.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|joined| !joined.is_empty())
        .collect()
}

/// Prefixes for a whole product, de-duplicated across all combinations.
///
/// Fields must already be normalized with [`normalize_field`].
pub fn product_prefixes(name: &str, category: &str, product_type: &str) -> Vec<String> {
    let mut set = PrefixSet::new();
    for combination in field_combinations(name, category, product_type) {
        extend_with_text(&mut set, &combination);
    }
    set.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(generate_prefixes("").is_empty());
        assert!(generate_prefixes("   ").is_empty());
    }

    #[test]
    fn test_single_character() {
        assert_eq!(generate_prefixes("a"), vec!["a"]);
    }

    #[test]
    fn test_whole_string_then_words() {
        let prefixes = generate_prefixes("red bike");
        assert_eq!(
            prefixes,
            vec![
                "r", "re", "red", "redb", "redbi", "redbik", "redbike", // joined
                "b", "bi", "bik", "bike", // second word; first word already present
            ]
        );
    }

    #[test]
    fn test_no_duplicates() {
        let prefixes = generate_prefixes("aa aa");
        let unique: HashSet<_> = prefixes.iter().collect();
        assert_eq!(unique.len(), prefixes.len());
    }

    #[test]
    fn test_multibyte_boundaries() {
        let prefixes = generate_prefixes("café");
        assert_eq!(prefixes, vec!["c", "ca", "caf", "café"]);
    }

    #[test]
    fn test_twelve_combinations() {
        let combos = field_combinations("n", "c", "t");
        assert_eq!(
            combos,
            vec!["n", "c", "t", "n c", "n t", "c t", "n c t", "c n", "t n", "c t n", "t c", "t n c"]
        );
    }

    #[test]
    fn test_combinations_skip_empty_fields() {
        let combos = field_combinations("bike", "", "cycle");
        assert!(combos.iter().all(|c| !c.is_empty()));
        assert!(combos.iter().all(|c| !c.contains("  ")));
        assert!(combos.contains(&"bike cycle".to_string()));
        assert!(combos.contains(&"cycle bike".to_string()));
    }

    #[test]
    fn test_product_prefixes_cover_any_field_order() {
        let prefixes = product_prefixes("red bike", "sports", "cycle");
        for expected in ["red", "bik", "sports", "cyc", "sportscycle", "cyclesports", "cycleredbike"] {
            assert!(prefixes.contains(&expected.to_string()), "missing {}", expected);
        }
    }

    #[test]
    fn test_product_prefixes_deterministic() {
        let a = product_prefixes("red bike", "sports", "cycle");
        let b = product_prefixes("red bike", "sports", "cycle");
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Red  Bike "), "redbike");
        assert_eq!(normalize_query(" \t "), "");
    }

    #[test]
    fn test_normalize_field() {
        assert_eq!(normalize_field("  Sports "), "sports");
    }
}
