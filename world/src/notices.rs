//! Notification board with text-based deduplication and fading.

use bounty_core::{tuning::NOTICE_LIFETIME, Notice};

#[derive(Clone, Copy, Debug)]
struct PostedNotice {
    notice: Notice,
    remaining: u32,
}

/// Transient notices shown to the player, newest last.
#[derive(Debug, Default)]
pub(crate) struct NoticeBoard {
    entries: Vec<PostedNotice>,
}

impl NoticeBoard {
    /// Posts a notice unless one with the same text is still visible.
    pub(crate) fn post(&mut self, notice: Notice) -> bool {
        if self
            .entries
            .iter()
            .any(|entry| entry.notice.text() == notice.text())
        {
            return false;
        }

        self.entries.push(PostedNotice {
            notice,
            remaining: NOTICE_LIFETIME,
        });
        true
    }

    /// Fades every notice by one tick and drops the invisible ones.
    pub(crate) fn age(&mut self) {
        for entry in &mut self.entries {
            entry.remaining = entry.remaining.saturating_sub(1);
        }
        self.entries.retain(|entry| entry.remaining > 0);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Notice, u32)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.notice, entry.remaining))
    }
}
