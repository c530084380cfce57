/// Reference image manager
///
/// Owns the ordered collection of attached reference images and the
/// preview handle of each one. The collection never holds more than the
/// configured maximum; a batch that would overflow it is refused whole.
use std::fmt;
use uuid::Uuid;

use crate::error::StudioError;
use crate::media::loader::SourceImage;
use crate::media::preview::{PreviewKey, PreviewRegistry};

/// Opaque identifier of one attachment, stable for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachmentId(Uuid);

impl AttachmentId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single attached reference image
#[derive(Debug)]
pub struct Attachment {
    pub id: AttachmentId,
    /// The selected file content, owned until removal
    pub source: SourceImage,
    /// Key of the display handle in the manager's registry
    pub preview: PreviewKey,
}

/// Ordered, capped collection of reference images
#[derive(Debug)]
pub struct ReferenceImages {
    items: Vec<Attachment>,
    previews: PreviewRegistry,
    max: usize,
}

impl ReferenceImages {
    /// Create an empty collection holding at most `max` images
    pub fn new(max: usize) -> Self {
        Self {
            items: Vec::new(),
            previews: PreviewRegistry::new(),
            max,
        }
    }

    /// Append a batch of images, all or nothing
    ///
    /// Returns the ids of the new attachments in batch order.
    pub fn attach(&mut self, batch: Vec<SourceImage>) -> Result<Vec<AttachmentId>, StudioError> {
        self.check_capacity(batch.len())?;

        let mut ids = Vec::with_capacity(batch.len());
        for source in batch {
            let id = AttachmentId::new();
            let preview = self.previews.create(&source.thumbnail);
            tracing::debug!("📎 Attached {} as {}", source.file_name, id);
            self.items.push(Attachment {
                id,
                source,
                preview,
            });
            ids.push(id);
        }

        if !ids.is_empty() {
            tracing::info!(
                "📎 Attached {} reference image(s), {}/{} in use",
                ids.len(),
                self.items.len(),
                self.max
            );
        }
        Ok(ids)
    }

    /// Fail if `requested` more images would not fit
    pub fn check_capacity(&self, requested: usize) -> Result<(), StudioError> {
        if self.items.len() + requested > self.max {
            tracing::warn!(
                "❌ Rejected batch of {} image(s): {} attached, limit {}",
                requested,
                self.items.len(),
                self.max
            );
            return Err(StudioError::TooManyImages {
                max: self.max,
                current: self.items.len(),
                requested,
            });
        }
        Ok(())
    }

    /// Remove an attachment and release its preview
    ///
    /// Unknown ids are ignored and return false.
    pub fn remove(&mut self, id: AttachmentId) -> bool {
        let Some(index) = self.items.iter().position(|a| a.id == id) else {
            return false;
        };

        let removed = self.items.remove(index);
        self.previews.revoke(removed.preview);
        tracing::info!(
            "🗑️  Removed reference image {} ({} preview handle(s) live)",
            removed.source.file_name,
            self.previews.live_count()
        );
        true
    }

    /// Release every preview and empty the collection
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        let released = self.previews.revoke_all();
        if released > 0 {
            tracing::info!("🧹 Released {} preview handle(s)", released);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// How many more images fit
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.items.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<AttachmentId> {
        self.items.iter().map(|a| a.id).collect()
    }

    #[cfg(test)]
    pub fn get(&self, id: AttachmentId) -> Option<&Attachment> {
        self.items.iter().find(|a| a.id == id)
    }

    /// Display handle of an attachment's preview
    pub fn preview(&self, key: PreviewKey) -> Option<&iced::widget::image::Handle> {
        self.previews.get(key)
    }

    /// Number of preview handles not yet released
    #[cfg(test)]
    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }
}

impl Drop for ReferenceImages {
    fn drop(&mut self) {
        self.clear();
    }
}
