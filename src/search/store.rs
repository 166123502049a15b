//! Index store
//!
//! A single lexicographically ordered, score-free collection of encoded
//! members. Stores must make each command atomic with respect to readers:
//! a range scan sees either all or none of one `insert_many`,
//! `delete_matching` or `replace_matching`.

use std::collections::BTreeSet;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::entry::decode_product_id;
use super::errors::{SearchError, SearchResult};

/// Lexicographic range over raw members.
pub type LexRange = (Bound<String>, Bound<String>);

/// Predicate over the decoded product id of a member.
pub type ProductPredicate<'a> = &'a (dyn Fn(&str) -> bool + Send + Sync);

/// Backing sorted collection for the autocomplete index.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Check the store is reachable.
    async fn ping(&self) -> SearchResult<()>;

    /// Add members in one atomic command. Existing members are kept.
    async fn insert_many(&self, members: Vec<String>) -> SearchResult<()>;

    /// Members inside `range` in ascending order, skipping `offset` and
    /// returning at most `count`.
    async fn range_by_lex(
        &self,
        range: LexRange,
        offset: usize,
        count: usize,
    ) -> SearchResult<Vec<String>>;

    /// Remove every member whose product id satisfies `predicate`.
    ///
    /// Members that cannot be decoded are left alone.
    async fn delete_matching(&self, predicate: ProductPredicate<'_>) -> SearchResult<u64>;

    /// Remove matching members and insert `members` as one command.
    ///
    /// The default runs two commands; stores that can do better override it.
    async fn replace_matching(
        &self,
        predicate: ProductPredicate<'_>,
        members: Vec<String>,
    ) -> SearchResult<u64> {
        let removed = self.delete_matching(predicate).await?;
        self.insert_many(members).await?;
        Ok(removed)
    }

    /// Release the store. Later commands fail with `Unavailable`.
    async fn close(&self) -> SearchResult<()>;
}

/// In-process sorted store backed by a `BTreeSet`.
///
/// One `RwLock` guards the whole set, so every command is a single
/// critical section.
#[derive(Debug, Default)]
pub struct MemoryIndexStore {
    members: RwLock<BTreeSet<String>>,
    closed: AtomicBool,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored members.
    pub fn len(&self) -> usize {
        self.members.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn check_open(&self) -> SearchResult<()> {
        if self.is_closed() {
            return Err(SearchError::unavailable("index store is closed"));
        }
        Ok(())
    }

    fn read(&self) -> SearchResult<RwLockReadGuard<'_, BTreeSet<String>>> {
        self.check_open()?;
        self.members
            .read()
            .map_err(|_| SearchError::unavailable("Lock poisoned"))
    }

    fn write(&self) -> SearchResult<RwLockWriteGuard<'_, BTreeSet<String>>> {
        self.check_open()?;
        self.members
            .write()
            .map_err(|_| SearchError::unavailable("Lock poisoned"))
    }

    fn remove_where(set: &mut BTreeSet<String>, predicate: ProductPredicate<'_>) -> u64 {
        let before = set.len();
        set.retain(|member| match decode_product_id(member) {
            Ok(id) => !predicate(&id),
            Err(_) => true,
        });
        (before - set.len()) as u64
    }
}

/// `BTreeSet::range` panics on inverted or empty-excluded ranges.
fn is_valid_range(range: &LexRange) -> bool {
    match range {
        (Bound::Included(lo), Bound::Included(hi)) => lo <= hi,
        (Bound::Included(lo), Bound::Excluded(hi)) | (Bound::Excluded(lo), Bound::Included(hi)) => {
            lo <= hi
        }
        (Bound::Excluded(lo), Bound::Excluded(hi)) => lo < hi,
        _ => true,
    }
}

#[async_trait]
impl IndexStore for MemoryIndexStore {
    async fn ping(&self) -> SearchResult<()> {
        self.read().map(|_| ())
    }

    async fn insert_many(&self, members: Vec<String>) -> SearchResult<()> {
        let mut set = self.write()?;
        set.extend(members);
        Ok(())
    }

    async fn range_by_lex(
        &self,
        range: LexRange,
        offset: usize,
        count: usize,
    ) -> SearchResult<Vec<String>> {
        let set = self.read()?;
        if count == 0 || !is_valid_range(&range) {
            return Ok(Vec::new());
        }
        Ok(set
            .range::<String, _>(range)
            .skip(offset)
            .take(count)
            .cloned()
            .collect())
    }

    async fn delete_matching(&self, predicate: ProductPredicate<'_>) -> SearchResult<u64> {
        let mut set = self.write()?;
        Ok(Self::remove_where(&mut set, predicate))
    }

    async fn replace_matching(
        &self,
        predicate: ProductPredicate<'_>,
        members: Vec<String>,
    ) -> SearchResult<u64> {
        let mut set = self.write()?;
        let removed = Self::remove_where(&mut set, predicate);
        set.extend(members);
        Ok(removed)
    }

    async fn close(&self) -> SearchResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
