//! Per-upload progress tracking.
//!
//! Every upload owns one [`Transfer`] row, so concurrent uploads never write
//! to the same indicator.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransferId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    Uploading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub id: TransferId,
    pub name: String,
    /// 0.0..=100.0, never decreases while the row exists.
    pub percent: f64,
    pub phase: TransferPhase,
}

/// Percentage sent, or `None` when the total length is not computable.
pub fn percent(loaded: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((loaded as f64 / total as f64 * 100.0).clamp(0.0, 100.0))
}

/// The set of visible progress rows, in start order.
#[derive(Debug, Default)]
pub struct Transfers {
    next_id: u64,
    items: Vec<Transfer>,
}

impl Transfers {
    pub fn begin(&mut self, name: impl Into<String>) -> TransferId {
        self.next_id += 1;
        let id = TransferId(self.next_id);
        self.items.push(Transfer { id, name: name.into(), percent: 0.0, phase: TransferPhase::Uploading });
        id
    }

    /// Applies a progress report. Returns `true` if the row changed.
    pub fn advance(&mut self, id: TransferId, loaded: u64, total: u64) -> bool {
        let Some(p) = percent(loaded, total) else { return false };
        match self.items.iter_mut().find(|t| t.id == id) {
            Some(t) if t.phase == TransferPhase::Uploading && p > t.percent => {
                t.percent = p;
                true
            }
            _ => false,
        }
    }

    pub fn settle(&mut self, id: TransferId, ok: bool) {
        if let Some(t) = self.items.iter_mut().find(|t| t.id == id) {
            t.phase = if ok { TransferPhase::Succeeded } else { TransferPhase::Failed };
        }
    }

    pub fn remove(&mut self, id: TransferId) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    #[cfg(test)]
    pub(crate) fn get(&self, id: TransferId) -> Option<&Transfer> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn items(&self) -> &[Transfer] {
        &self.items
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
