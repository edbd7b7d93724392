use std::cmp::Ordering;
use std::collections::HashMap;

use common::{Notifier, ValidationFailure};
use serde::de::DeserializeOwned;
use serde::Serialize;
use storage::LocalStore;
use tracing::warn;

use crate::ids::next_id;
use crate::records::Priority;

/// Bucket label for records without a category.
pub const UNCATEGORIZED: &str = "Sem Categoria";

/// A uniquely-identified entity managed by [`ListController`].
///
/// The accessors with default implementations exist so one engine can
/// serve every module: goals have no category or due date, tasks have
/// all of it.
pub trait Record: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    fn completed(&self) -> bool {
        false
    }
    fn set_completed(&mut self, _value: bool) {}

    /// Lowercased text searched by the free-text filter.
    fn search_haystack(&self) -> String;

    fn category(&self) -> Option<&str> {
        None
    }
    fn due_date(&self) -> Option<&str> {
        None
    }
    fn priority(&self) -> Option<Priority> {
        None
    }

    /// Required-field policy, checked on add.
    fn validate(&self) -> Result<(), ValidationFailure>;
}

/// Where `add` inserts: goals go newest-first, tasks append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Head,
    Tail,
}

/// Status stage of the filter pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
    Overdue,
    Priority(Priority),
}

/// Read-only view derivation: category membership, then free-text
/// substring, then status, then the default sort comparator.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// `None` keeps every category.
    pub category: Option<String>,
    pub search: String,
    pub status: StatusFilter,
}

pub type SortFn<R> = fn(&R, &R) -> Ordering;

/// Tasks sort by due date ascending; a missing date sorts last.
pub fn by_due_date<R: Record>(a: &R, b: &R) -> Ordering {
    a.due_date()
        .unwrap_or("9999")
        .cmp(b.due_date().unwrap_or("9999"))
}

/// Ordered collection of records under one storage key.
///
/// `load` must run once per page-show before anything else; the
/// collection lives in memory while the page is active and every
/// mutation writes the full JSON snapshot back immediately, so
/// storage stays the source of truth across navigations.
pub struct ListController<R: Record> {
    storage_key: String,
    insert: InsertPosition,
    sort: Option<SortFn<R>>,
    items: Vec<R>,
}

impl<R: Record> ListController<R> {
    pub fn new(storage_key: impl Into<String>, insert: InsertPosition) -> Self {
        Self {
            storage_key: storage_key.into(),
            insert,
            sort: None,
            items: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: SortFn<R>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Reads the collection from storage; absent key means empty.
    /// A corrupt snapshot is reported once and treated as absent.
    pub fn load(&mut self, store: &LocalStore, notifier: &mut Notifier) {
        match store.load::<Vec<R>>(&self.storage_key) {
            Ok(Some(items)) => self.items = items,
            Ok(None) => self.items = Vec::new(),
            Err(err) => {
                warn!(key = %self.storage_key, %err, "load failed");
                notifier.error("Não foi possível carregar os dados.");
                self.items = Vec::new();
            }
        }
    }

    fn persist(&self, store: &LocalStore, notifier: &mut Notifier) {
        if let Err(err) = store.save(&self.storage_key, &self.items) {
            warn!(key = %self.storage_key, %err, "save failed");
            notifier.error("Não foi possível salvar os dados.");
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|r| r.completed()).count()
    }

    /// Validates, assigns a fresh id, inserts per module policy and
    /// persists. Returns the assigned id.
    pub fn add(
        &mut self,
        store: &LocalStore,
        notifier: &mut Notifier,
        mut record: R,
    ) -> Result<String, ValidationFailure> {
        record.validate()?;
        let id = next_id();
        record.set_id(id.clone());
        match self.insert {
            InsertPosition::Head => self.items.insert(0, record),
            InsertPosition::Tail => self.items.push(record),
        }
        self.persist(store, notifier);
        Ok(id)
    }

    /// Merges fields into the record with `id` via `apply`. Unknown
    /// id is a silent no-op (deliberate leniency, not an error).
    pub fn update(
        &mut self,
        store: &LocalStore,
        notifier: &mut Notifier,
        id: &str,
        apply: impl FnOnce(&mut R),
    ) -> bool {
        let Some(record) = self.items.iter_mut().find(|r| r.id() == id) else {
            return false;
        };
        apply(record);
        self.persist(store, notifier);
        true
    }

    pub fn toggle_completed(&mut self, store: &LocalStore, notifier: &mut Notifier, id: &str) -> bool {
        let Some(record) = self.items.iter_mut().find(|r| r.id() == id) else {
            return false;
        };
        let flipped = !record.completed();
        record.set_completed(flipped);
        self.persist(store, notifier);
        true
    }

    /// Removes by id. No write occurs when the id is unknown.
    /// Destructive UI paths must confirm with the user before calling.
    pub fn remove(&mut self, store: &LocalStore, notifier: &mut Notifier, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id() != id);
        if self.items.len() == before {
            return false;
        }
        self.persist(store, notifier);
        true
    }

    /// Derives the filtered, sorted read-only view without touching
    /// the underlying collection.
    pub fn filter(&self, spec: &FilterSpec, today: &str) -> Vec<R> {
        let search = spec.search.trim().to_lowercase();
        let mut view: Vec<R> = self
            .items
            .iter()
            .filter(|r| match &spec.category {
                None => true,
                Some(cat) => r.category() == Some(cat.as_str()),
            })
            .filter(|r| search.is_empty() || r.search_haystack().contains(&search))
            .filter(|r| match spec.status {
                StatusFilter::All => true,
                StatusFilter::Pending => !r.completed(),
                StatusFilter::Completed => r.completed(),
                StatusFilter::Overdue => {
                    !r.completed() && matches!(r.due_date(), Some(d) if d < today)
                }
                StatusFilter::Priority(p) => r.priority() == Some(p),
            })
            .cloned()
            .collect();
        if let Some(sort) = self.sort {
            view.sort_by(sort);
        }
        view
    }
}

/// One clamped slice of a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<R> {
    pub items: Vec<R>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Fixed-size pagination; the requested page is clamped to
/// `[1, ceil(total / page_size)]`, with a single page for an empty view.
pub fn paginate<R: Clone>(view: &[R], page_size: usize, page: usize) -> PageSlice<R> {
    let page_size = page_size.max(1);
    let total = view.len();
    let total_pages = (total + page_size - 1) / page_size;
    let total_pages = total_pages.max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let items = view
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();
    PageSlice {
        items,
        page,
        total_pages,
        total,
    }
}

/// Labels and per-category counts for the distribution chart, in the
/// order of [`group_by_category`]. Both sequences are empty when
/// there is nothing to plot.
pub fn category_distribution<R: Record>(items: &[R], order: &[String]) -> (Vec<String>, Vec<u64>) {
    let groups = group_by_category(items, order);
    let labels = groups.iter().map(|(cat, _)| cat.clone()).collect();
    let series = groups.iter().map(|(_, bucket)| bucket.len() as u64).collect();
    (labels, series)
}

/// Partitions records by category, keeping the caller's category
/// order first, then categories the caller no longer lists (orphaned
/// soft tags), then the uncategorized bucket last.
pub fn group_by_category<R: Record>(items: &[R], order: &[String]) -> Vec<(String, Vec<R>)> {
    let mut buckets: HashMap<&str, Vec<R>> = HashMap::new();
    let mut orphan_order: Vec<&str> = Vec::new();
    for item in items {
        let cat = item.category().unwrap_or(UNCATEGORIZED);
        if cat != UNCATEGORIZED
            && !order.iter().any(|o| o == cat)
            && !orphan_order.contains(&cat)
        {
            orphan_order.push(cat);
        }
        buckets.entry(cat).or_default().push(item.clone());
    }

    let mut groups = Vec::new();
    for cat in order
        .iter()
        .map(String::as_str)
        .chain(orphan_order)
        .chain(std::iter::once(UNCATEGORIZED))
    {
        if let Some(bucket) = buckets.remove(cat) {
            if !bucket.is_empty() {
                groups.push((cat.to_string(), bucket));
            }
        }
    }
    groups
}
