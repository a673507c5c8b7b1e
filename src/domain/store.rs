use std::{cell::OnceCell, cmp::Reverse};

use uuid::Uuid;

use crate::domain::{IdGenerator, RandomIds, Vacation, VacationDraft};

/// Why a draft was not stored.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The draft carries an id that is already in use.
    #[error("a vacation with id {0} already exists")]
    DuplicateId(Uuid),
}

/// The in-memory collection of vacations.
///
/// New records go to the front, so [`VacationStore::list_all`] yields the most
/// recently added record first. Records are never updated or removed.
///
/// The start-date ordering used for display is derived on demand by
/// [`VacationStore::sorted`] and memoized until the next insertion.
#[derive(Debug, Clone, Default)]
pub struct VacationStore<I = RandomIds> {
    records: Vec<Vacation>,
    ids: I,
    version: u64,
    sorted: OnceCell<Vec<usize>>,
}

impl VacationStore {
    /// Creates an empty store that assigns random ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ids(RandomIds)
    }
}

impl<I: IdGenerator> VacationStore<I> {
    /// Creates an empty store that draws ids from the given generator.
    #[must_use]
    pub const fn with_ids(ids: I) -> Self {
        Self {
            records: Vec::new(),
            ids,
            version: 0,
            sorted: OnceCell::new(),
        }
    }

    /// Stores a draft as the most recently added vacation.
    ///
    /// A fresh id is generated unless the draft already carries one. Existing
    /// records are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the draft's id is already taken.
    pub fn insert_front(&mut self, draft: VacationDraft) -> Result<&Vacation, StoreError> {
        let id = match draft.id {
            Some(id) if self.get(id).is_some() => return Err(StoreError::DuplicateId(id)),
            Some(id) => id,
            None => self.fresh_id(),
        };

        self.records.insert(0, Vacation::from_draft(draft, id));
        self.version += 1;
        self.sorted = OnceCell::new();

        tracing::debug!(%id, version = self.version, "stored vacation");
        Ok(&self.records[0])
    }

    fn fresh_id(&mut self) -> Uuid {
        loop {
            let id = self.ids.next_id();
            if self.get(id).is_none() {
                return id;
            }
            tracing::warn!(%id, "id generator repeated an id in use, drawing another");
        }
    }
}

impl<I> VacationStore<I> {
    /// Every stored vacation, most recently added first.
    #[must_use]
    pub fn list_all(&self) -> &[Vacation] {
        &self.records
    }

    /// Looks up a vacation by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Vacation> {
        self.records.iter().find(|vacation| vacation.id() == id)
    }

    /// The number of stored vacations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts the insertions made so far.
    ///
    /// Every change to the store bumps the version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// The vacations ordered by start date, latest first.
    ///
    /// Vacations sharing a start date keep their [`list_all`] order. The
    /// ordering is computed on first use after each insertion and reused until
    /// the next one.
    ///
    /// [`list_all`]: VacationStore::list_all
    #[must_use]
    pub fn sorted(&self) -> SortedView<'_> {
        let order = self.sorted.get_or_init(|| {
            let mut order: Vec<usize> = (0..self.records.len()).collect();
            // `sort_by_key` is stable, which keeps ties in store order.
            order.sort_by_key(|&index| Reverse(self.records[index].start()));
            order
        });
        SortedView {
            records: &self.records,
            order,
        }
    }
}

/// A read-only projection of a [`VacationStore`] sorted by start date.
#[derive(Debug, Clone, Copy)]
pub struct SortedView<'a> {
    records: &'a [Vacation],
    order: &'a [usize],
}

impl<'a> SortedView<'a> {
    /// Iterates over the vacations in display order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a Vacation> + use<'a> {
        let (records, order) = (self.records, self.order);
        order.iter().map(move |&index| &records[index])
    }

    /// The vacation shown in the first row, if any.
    #[must_use]
    pub fn first(&self) -> Option<&'a Vacation> {
        self.order.first().map(|&index| &self.records[index])
    }

    /// The number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'a> IntoIterator for SortedView<'a> {
    type Item = &'a Vacation;
    type IntoIter = Box<dyn ExactSizeIterator<Item = &'a Vacation> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
