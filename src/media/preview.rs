/// Preview handle registry
///
/// Every attached image gets one revocable display handle. The registry is
/// the single owner of those handles: the UI borrows them by key for
/// rendering, and a handle is gone the moment its key is revoked.
use iced::widget::image::Handle;
use std::collections::HashMap;

use super::loader::Thumbnail;

/// Key of a live preview handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewKey(u64);

/// Owns every preview handle that has not been revoked yet
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_key: u64,
    live: HashMap<PreviewKey, Handle>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a display handle from thumbnail pixels
    pub fn create(&mut self, thumbnail: &Thumbnail) -> PreviewKey {
        let key = PreviewKey(self.next_key);
        self.next_key += 1;

        let handle = Handle::from_rgba(
            thumbnail.width,
            thumbnail.height,
            thumbnail.rgba.clone(),
        );
        self.live.insert(key, handle);
        key
    }

    /// Release a handle. Returns false if it was already released.
    pub fn revoke(&mut self, key: PreviewKey) -> bool {
        self.live.remove(&key).is_some()
    }

    /// Release every handle, returning how many were live
    pub fn revoke_all(&mut self) -> usize {
        let count = self.live.len();
        self.live.clear();
        count
    }

    pub fn get(&self, key: PreviewKey) -> Option<&Handle> {
        self.live.get(&key)
    }

    #[cfg(test)]
    pub fn is_live(&self, key: PreviewKey) -> bool {
        self.live.contains_key(&key)
    }

    /// Number of handles created and not yet revoked
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
