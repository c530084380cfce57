/// User-visible notifications
///
/// The controller reports outcomes as `Notification` values; the GUI shell
/// shows them as toasts and dismisses them after a timeout.
use crate::error::StudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// One transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl From<&StudioError> for Notification {
    fn from(err: &StudioError) -> Self {
        Notification::error(err.to_string())
    }
}

/// Identifier of a toast on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

/// Visible toast stack, oldest first
#[derive(Debug)]
pub struct Toasts {
    next_id: u64,
    items: Vec<(ToastId, Notification)>,
    limit: usize,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Toasts {
    /// Create a stack showing at most `limit` toasts
    pub fn new(limit: usize) -> Self {
        Self {
            next_id: 0,
            items: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Show a notification, evicting the oldest when the stack is full
    pub fn push(&mut self, notification: Notification) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        if self.items.len() == self.limit {
            self.items.remove(0);
        }
        self.items.push((id, notification));
        id
    }

    /// Remove a toast. Already-dismissed or evicted ids are ignored.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.items.len();
        self.items.retain(|(toast_id, _)| *toast_id != id);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ToastId, Notification)> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
