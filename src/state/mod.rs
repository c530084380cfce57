/// State management module
///
/// This module handles all page state, including:
/// - The page controller that owns everything below (studio.rs)
/// - Reference image attachments and their previews (attachments.rs)
/// - The simulated generation state machine (generation.rs)
/// - Toast notifications (notify.rs)
/// - Static gallery and feature content (data.rs)

pub mod attachments;
pub mod data;
pub mod generation;
pub mod notify;
pub mod studio;
