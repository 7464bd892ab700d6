use serde::{Deserialize, Serialize};

/// Status change reported for a cell during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellStatus {
    Queued,
    Checked,
    OnPath,
}

impl CellStatus {
    /// Wire code: 1=queued, 2=checked, 3=on path
    pub fn code(self) -> u8 {
        match self {
            CellStatus::Queued => 1,
            CellStatus::Checked => 2,
            CellStatus::OnPath => 3,
        }
    }
}

/// Cells whose status changed during the most recent step.
///
/// Keeps first-insertion order; marking a cell twice replaces its status in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    entries: Vec<(usize, CellStatus)>,
}

impl ChangeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `status` for `cell`, overriding any earlier status in this report
    pub fn mark(&mut self, cell: usize, status: CellStatus) {
        match self.entries.iter_mut().find(|(c, _)| *c == cell) {
            Some(entry) => entry.1 = status,
            None => self.entries.push((cell, status)),
        }
    }

    pub fn get(&self, cell: usize) -> Option<CellStatus> {
        self.entries
            .iter()
            .find(|(c, _)| *c == cell)
            .map(|&(_, status)| status)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, CellStatus)> + '_ {
        self.entries.iter().copied()
    }

    /// Cells carrying `status`, in report order
    pub fn cells_with(&self, status: CellStatus) -> Vec<usize> {
        self.iter()
            .filter(|&(_, s)| s == status)
            .map(|(c, _)| c)
            .collect()
    }
}

impl<'a> IntoIterator for &'a ChangeReport {
    type Item = (usize, CellStatus);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (usize, CellStatus)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}
