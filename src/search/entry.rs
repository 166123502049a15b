//! Index entry codec
//!
//! Members of the sorted index are single strings:
//!
//! ```text
//! <prefix>|<product_id>|<name>|<category>|<type>|<image_url>
//! ```
//!
//! Each field is escaped before joining (`\` -> `\\`, `|` -> `\;`), so a
//! field never contains the delimiter. The code is prefix-free, so
//! `escape(q)` is a prefix of `escape(p)` exactly when `q` is a prefix of
//! `p`, and a plain lexicographic range over raw members still answers
//! prefix queries.

use std::ops::Bound;

use super::errors::{SearchError, SearchResult};
use super::types::{IndexedProduct, Suggestion};

/// Field delimiter inside a member
pub const DELIMITER: char = '|';

const ESCAPE: char = '\\';
const ESCAPED_DELIMITER: char = ';';
const FIELD_COUNT: usize = 6;

/// Escape one field so it never contains the delimiter.
pub fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            ESCAPE => {
                out.push(ESCAPE);
                out.push(ESCAPE);
            }
            DELIMITER => {
                out.push(ESCAPE);
                out.push(ESCAPED_DELIMITER);
            }
            c => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape`].
pub fn unescape(field: &str) -> SearchResult<String> {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != ESCAPE {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(ESCAPE) => out.push(ESCAPE),
            Some(ESCAPED_DELIMITER) => out.push(DELIMITER),
            Some(other) => {
                return Err(SearchError::corrupt(format!(
                    "invalid escape sequence '\\{}'",
                    other
                )))
            }
            None => return Err(SearchError::corrupt("dangling escape at end of field")),
        }
    }
    Ok(out)
}

/// One decoded member of the sorted index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub prefix: String,
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub product_type: String,
    pub image_url: String,
}

impl IndexEntry {
    /// Entry for `prefix` pointing at an already-normalized product.
    pub fn for_product(prefix: &str, product: &IndexedProduct) -> Self {
        Self {
            prefix: prefix.to_string(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            product_type: product.product_type.clone(),
            image_url: product.image_url.clone(),
        }
    }

    /// Serialize into a sorted-set member.
    pub fn encode(&self) -> String {
        [
            &self.prefix,
            &self.product_id,
            &self.name,
            &self.category,
            &self.product_type,
            &self.image_url,
        ]
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join("|")
    }

    /// Parse a sorted-set member.
    ///
    /// Anything other than exactly six well-escaped fields is `Corrupt`.
    pub fn decode(member: &str) -> SearchResult<Self> {
        let parts: Vec<&str> = member.split(DELIMITER).collect();
        if parts.len() != FIELD_COUNT {
            return Err(SearchError::corrupt(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                parts.len()
            )));
        }

        Ok(Self {
            prefix: unescape(parts[0])?,
            product_id: unescape(parts[1])?,
            name: unescape(parts[2])?,
            category: unescape(parts[3])?,
            product_type: unescape(parts[4])?,
            image_url: unescape(parts[5])?,
        })
    }

    /// Reshape into the record returned to autocomplete callers.
    pub fn into_suggestion(self) -> Suggestion {
        Suggestion::new(
            self.product_id,
            self.name,
            self.category,
            self.product_type,
            self.image_url,
        )
    }
}

/// Decode only the product id of a member.
pub fn decode_product_id(member: &str) -> SearchResult<String> {
    let parts: Vec<&str> = member.split(DELIMITER).collect();
    if parts.len() != FIELD_COUNT {
        return Err(SearchError::corrupt(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            parts.len()
        )));
    }
    unescape(parts[1])
}

/// Lexicographic range of members whose prefix field starts with `prefix`.
///
/// `prefix` must already be normalized. The upper bound is the smallest
/// string greater than every string starting with the escaped prefix.
pub fn prefix_range(prefix: &str) -> (Bound<String>, Bound<String>) {
    let lower = escape(prefix);
    let upper = match successor(&lower) {
        Some(s) => Bound::Excluded(s),
        None => Bound::Unbounded,
    };
    (Bound::Included(lower), upper)
}

fn successor(s: &str) -> Option<String> {
    let mut chars: Vec<char> = s.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(next) = next_char(last) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

fn next_char(c: char) -> Option<char> {
    let mut n = c as u32 + 1;
    while n <= char::MAX as u32 {
        // skips the surrogate gap
        if let Some(next) = char::from_u32(n) {
            return Some(next);
        }
        n += 1;
    }
    None
}
