//! List options: sort mode, pagination and filtering

use crate::error::{Error, Result};
use crate::item::Item;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Sort
// ============================================================================

/// Order in which List yields records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sort {
    /// Backend iteration order; no guarantee across runs
    #[default]
    Natural,
    /// Newest created first
    CreatedDesc,
    /// Oldest created first
    CreatedAsc,
    /// Most recently updated first
    UpdatedDesc,
    /// Least recently updated first
    UpdatedAsc,
}

impl Sort {
    /// True for the modes served from a time index
    pub fn is_time_sorted(&self) -> bool {
        !matches!(self, Sort::Natural)
    }

    /// Stable wire discriminant
    pub fn as_i64(&self) -> i64 {
        match self {
            Sort::Natural => 0,
            Sort::CreatedDesc => 1,
            Sort::CreatedAsc => 2,
            Sort::UpdatedDesc => 3,
            Sort::UpdatedAsc => 4,
        }
    }
}

impl TryFrom<i64> for Sort {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Sort::Natural),
            1 => Ok(Sort::CreatedDesc),
            2 => Ok(Sort::CreatedAsc),
            3 => Ok(Sort::UpdatedDesc),
            4 => Ok(Sort::UpdatedAsc),
            other => Err(Error::InvalidSort(other)),
        }
    }
}

// ============================================================================
// Filter / Factory
// ============================================================================

/// Predicate restricting which records a Natural List yields
///
/// Time-sorted modes ignore the filter; see [`ListOpt::filter`].
pub trait ItemFilter: Send + Sync {
    /// True if the record should be yielded
    fn matches(&self, item: &dyn Item) -> bool;
}

impl<F> ItemFilter for F
where
    F: Fn(&dyn Item) -> bool + Send + Sync,
{
    fn matches(&self, item: &dyn Item) -> bool {
        self(item)
    }
}

/// Produces empty records of the listed type; the produced record's
/// namespace selects the namespace being listed.
pub type Factory = Arc<dyn Fn() -> Box<dyn Item> + Send + Sync>;

/// Build a [`Factory`] from a constructor closure
pub fn factory<T, F>(make: F) -> Factory
where
    T: Item,
    F: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(move || Box::new(make()) as Box<dyn Item>)
}

// ============================================================================
// ListOpt
// ============================================================================

/// Pagination, ordering and filtering for List
///
/// `limit <= 0` means no cap. The first `page * limit` qualifying records are
/// skipped.
#[derive(Clone, Default)]
pub struct ListOpt {
    /// Zero-based page number
    pub page: i64,
    /// Page size; `<= 0` disables the cap
    pub limit: i64,
    /// Ordering
    pub sort: Sort,
    /// Optional predicate, honoured by [`Sort::Natural`] only
    pub filter: Option<Arc<dyn ItemFilter>>,
}

impl ListOpt {
    /// Default options: first page, no cap, natural order, no filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the ordering
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Restrict Natural results to records accepted by `filter`.
    ///
    /// Time-sorted modes do not consult the filter.
    pub fn filter(mut self, filter: impl ItemFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Number of qualifying records to skip before emitting
    pub fn skip(&self) -> u64 {
        if self.limit <= 0 || self.page <= 0 {
            return 0;
        }
        self.page.saturating_mul(self.limit) as u64
    }

    /// Maximum number of records to emit, `None` for no cap
    pub fn cap(&self) -> Option<u64> {
        (self.limit > 0).then_some(self.limit as u64)
    }
}

impl fmt::Debug for ListOpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListOpt")
            .field("page", &self.page)
            .field("limit", &self.limit)
            .field("sort", &self.sort)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
