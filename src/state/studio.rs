/// Page controller
///
/// `Studio` owns everything the page mutates: the prompt, the reference
/// images and the generation state machine. The GUI shell holds one by
/// value and turns its results into widgets, toasts and timers.
use std::path::PathBuf;

use super::attachments::{AttachmentId, ReferenceImages};
use super::generation::{GenerationRequest, Generator, Ticket};
use super::notify::Notification;
use crate::config::Settings;
use crate::error::StudioError;
use crate::media::loader::SourceImage;

#[derive(Debug)]
pub struct Studio {
    settings: Settings,
    prompt: String,
    references: ReferenceImages,
    generator: Generator,
    /// Paths from one drag-and-drop gesture, not yet loaded
    dropped: Vec<PathBuf>,
}

impl Studio {
    pub fn new(settings: Settings) -> Self {
        Self {
            references: ReferenceImages::new(settings.max_images),
            settings,
            prompt: String::new(),
            generator: Generator::new(),
            dropped: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ========== Prompt ==========

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Replace the prompt with a gallery example
    ///
    /// Scrolling back to the form is up to the caller.
    pub fn use_example_prompt(&mut self, text: &str) {
        tracing::debug!("seeding prompt from gallery: {text}");
        self.prompt = text.to_string();
    }

    // ========== Reference images ==========

    pub fn references(&self) -> &ReferenceImages {
        &self.references
    }

    /// Fail early when a picked batch cannot fit, before any file is read
    pub fn check_capacity(&self, requested: usize) -> Result<(), StudioError> {
        self.references.check_capacity(requested)
    }

    pub fn attach(&mut self, batch: Vec<SourceImage>) -> Result<Vec<AttachmentId>, StudioError> {
        self.references.attach(batch)
    }

    /// Attach the outcome of a background load
    ///
    /// Files that failed to load get one error notification each; the rest
    /// are attached as a single all-or-nothing batch, which adds at most one
    /// more notification if the cap was reached while they were loading.
    pub fn attach_loaded(
        &mut self,
        results: Vec<Result<SourceImage, StudioError>>,
    ) -> Vec<Notification> {
        let mut batch = Vec::with_capacity(results.len());
        let mut notifications = Vec::new();

        for result in results {
            match result {
                Ok(source) => batch.push(source),
                Err(e) => {
                    tracing::warn!("⚠️  {e}");
                    notifications.push(Notification::from(&e));
                }
            }
        }

        if let Err(e) = self.references.attach(batch) {
            notifications.push(Notification::from(&e));
        }
        notifications
    }

    /// Buffer a file dropped onto the window
    ///
    /// A multi-file drop arrives one path at a time. Returns true for the
    /// first path of a new gesture, when the caller should schedule a flush.
    pub fn queue_dropped(&mut self, path: PathBuf) -> bool {
        self.dropped.push(path);
        self.dropped.len() == 1
    }

    /// Take every buffered dropped path as one batch
    pub fn take_dropped(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.dropped)
    }

    pub fn remove_reference(&mut self, id: AttachmentId) -> bool {
        self.references.remove(id)
    }

    /// Whether the "add images" trigger should be enabled
    pub fn can_attach(&self) -> bool {
        !self.references.is_full() && !self.generator.is_generating()
    }

    // ========== Generation ==========

    pub fn is_generating(&self) -> bool {
        self.generator.is_generating()
    }

    /// Submit the current prompt with the current reference images
    pub fn submit(&mut self) -> Result<GenerationRequest, StudioError> {
        let ids = self.references.ids();
        self.generator.submit(&self.prompt, &ids)
    }

    /// Resolve a finished generation timer
    pub fn finish(&mut self, ticket: Ticket) -> Option<Notification> {
        self.generator.complete(ticket)
    }

    // ========== Teardown ==========

    /// Cancel any pending generation and release every preview handle
    ///
    /// Returns the ticket that was pending, if any.
    pub fn teardown(&mut self) -> Option<Ticket> {
        let pending = self.generator.cancel();
        self.dropped.clear();
        let released = self.references.clear();
        tracing::info!(
            "👋 Studio torn down ({} reference image(s) released)",
            released
        );
        pending
    }
}
