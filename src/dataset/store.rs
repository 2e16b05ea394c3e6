//! Owned store for the loaded dataset and the current filtered view.

use crate::dataset::record::Record;

/// Generation token handed out when a file load starts.
///
/// Only the most recently issued ticket may complete a load; results carrying an older ticket
/// come from a superseded read and are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Holds the full dataset and the indices of the rows passing the active filters.
#[derive(Debug, Default)]
pub struct RecordStore {
    dataset: Vec<Record>,
    filtered: Vec<usize>,
    generation: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dataset wholesale and reset the filtered view to every row.
    pub fn load(&mut self, rows: Vec<Record>) {
        self.filtered = (0..rows.len()).collect();
        self.dataset = rows;
    }

    /// Start a new load, invalidating every ticket issued before.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Whether `ticket` belongs to the newest load.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply the rows of a finished load if it is still the newest one.
    ///
    /// Returns `false` (and leaves the store untouched) for stale tickets.
    pub fn complete_load(&mut self, ticket: LoadTicket, rows: Vec<Record>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "discarding stale load generation {} (current {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.load(rows);
        true
    }

    /// Every loaded row, in file order.
    pub fn all(&self) -> &[Record] {
        &self.dataset
    }

    /// Rows of the filtered view, in file order.
    pub fn current_filtered_view(&self) -> Vec<&Record> {
        self.resolve(&self.filtered)
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    /// Replace the filtered view. Indices outside the dataset are dropped.
    pub fn set_filtered(&mut self, indices: Vec<usize>) {
        let len = self.dataset.len();
        self.filtered = indices.into_iter().filter(|&i| i < len).collect();
    }

    /// Look up a list of dataset indices.
    pub fn resolve(&self, indices: &[usize]) -> Vec<&Record> {
        indices
            .iter()
            .filter_map(|&i| self.dataset.get(i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }
}
