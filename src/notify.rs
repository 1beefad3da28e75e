use crate::types::NoticeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub kind: NoticeKind,
}

/// Visible notification banners, oldest first.
///
/// Removal is idempotent: the expiry timer and the close button may both
/// fire for the same banner.
#[derive(Debug, Default)]
pub struct Notices {
    next_id: u64,
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, message: impl Into<String>, kind: NoticeKind) -> NoticeId {
        self.next_id += 1;
        let id = NoticeId(self.next_id);
        self.items.push(Notice { id, message: message.into(), kind });
        id
    }

    /// Returns `false` if the banner was already gone.
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
