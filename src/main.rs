use iced::widget::{stack, text_editor};
use iced::{event, task, window, Element, Event, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod media;
mod state;
mod ui;

use config::Settings;
use error::StudioError;
use media::loader::{self, SourceImage};
use state::attachments::AttachmentId;
use state::generation::{self, Ticket};
use state::notify::{Notification, ToastId, Toasts};
use state::studio::Studio;

/// How long to wait for the rest of a multi-file drop before loading it
const DROP_SETTLE: Duration = Duration::from_millis(50);

/// Main application state
struct ImageStudio {
    /// Page controller: prompt, reference images, generation state
    studio: Studio,
    /// Text buffer behind the prompt editor
    editor: text_editor::Content,
    toasts: Toasts,
    /// Abort handle of the pending generation timer
    pending: Option<task::Handle>,
    theme: Theme,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User typed in the prompt editor
    PromptEdited(text_editor::Action),
    /// User clicked a gallery example
    UseExample(&'static str),
    /// User clicked the call-to-action button
    ScrollToTop,
    /// User clicked "Add images"
    PickReferences,
    /// Background load of picked files finished
    ReferencesLoaded(Vec<Result<SourceImage, StudioError>>),
    /// User removed a reference image
    RemoveReference(AttachmentId),
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// Every file of the current drop gesture has arrived
    FlushDropped,
    /// User clicked "Generate"
    Generate,
    /// The generation delay elapsed
    GenerationFinished(Ticket),
    DismissToast(ToastId),
    /// The window is about to close
    CloseRequested(window::Id),
}

impl ImageStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        tracing::info!(
            "🎨 AI Image Studio starting (max {} reference images, {}ms generation delay)",
            settings.max_images,
            settings.generation_delay_ms
        );

        (Self::with_settings(settings), Task::none())
    }

    fn with_settings(settings: Settings) -> Self {
        ImageStudio {
            studio: Studio::new(settings),
            editor: text_editor::Content::new(),
            toasts: Toasts::default(),
            pending: None,
            theme: ui::style::studio_theme(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PromptEdited(action) => {
                self.editor.perform(action);
                self.studio.set_prompt(self.editor.text());
                Task::none()
            }
            Message::UseExample(prompt) => {
                self.studio.use_example_prompt(prompt);
                self.editor = text_editor::Content::with_text(self.studio.prompt());
                ui::page::scroll_to_top()
            }
            Message::ScrollToTop => ui::page::scroll_to_top(),
            Message::PickReferences => {
                if self.studio.is_generating() {
                    return Task::none();
                }

                // Show the native multi-file picker
                let Some(paths) = FileDialog::new()
                    .set_title("Выберите изображения-референсы")
                    .add_filter("Изображения", loader::IMAGE_EXTENSIONS)
                    .pick_files()
                else {
                    return Task::none();
                };

                self.load_references(paths)
            }
            Message::FileDropped(path) => {
                if self.studio.is_generating() {
                    return Task::none();
                }
                if !loader::has_image_extension(&path) {
                    let name = path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string();
                    return self.report(&StudioError::UnsupportedImage { name });
                }

                // One event per file; load the whole gesture as one batch
                if self.studio.queue_dropped(path) {
                    Task::perform(tokio::time::sleep(DROP_SETTLE), |_| Message::FlushDropped)
                } else {
                    Task::none()
                }
            }
            Message::FlushDropped => {
                let paths = self.studio.take_dropped();
                if paths.is_empty() || self.studio.is_generating() {
                    return Task::none();
                }
                self.load_references(paths)
            }
            Message::ReferencesLoaded(results) => {
                let notifications = self.studio.attach_loaded(results);
                let mut tasks = Vec::with_capacity(notifications.len());
                for notification in notifications {
                    tasks.push(self.notify(notification));
                }
                Task::batch(tasks)
            }
            Message::RemoveReference(id) => {
                self.studio.remove_reference(id);
                Task::none()
            }
            Message::Generate => match self.studio.submit() {
                Ok(request) => {
                    tracing::debug!(
                        "generating \"{}\" with {} reference image(s)",
                        request.prompt,
                        request.attachments.len()
                    );
                    let delay = self.studio.settings().generation_delay();
                    let (task, handle) = Task::perform(
                        generation::simulate(request.ticket, delay),
                        Message::GenerationFinished,
                    )
                    .abortable();
                    self.pending = Some(handle);
                    task
                }
                Err(e) => self.report(&e),
            },
            Message::GenerationFinished(ticket) => match self.studio.finish(ticket) {
                Some(notification) => {
                    self.pending = None;
                    self.notify(notification)
                }
                None => Task::none(),
            },
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
            Message::CloseRequested(id) => {
                if let Some(handle) = self.pending.take() {
                    handle.abort();
                }
                self.studio.teardown();
                window::close(id)
            }
        }
    }

    /// Check the cap up front, then load the files in the background
    fn load_references(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        if let Err(e) = self.studio.check_capacity(paths.len()) {
            return self.report(&e);
        }

        let settings = self.studio.settings();
        Task::perform(
            loader::load_sources(paths, settings.preview_size, settings.max_file_bytes),
            Message::ReferencesLoaded,
        )
    }

    /// Show a toast and schedule its dismissal
    fn notify(&mut self, notification: Notification) -> Task<Message> {
        let id = self.toasts.push(notification);
        let duration = self.studio.settings().toast_duration();
        Task::perform(tokio::time::sleep(duration), move |_| {
            Message::DismissToast(id)
        })
    }

    /// Surface an error to the user as a toast
    fn report(&mut self, err: &StudioError) -> Task<Message> {
        if err.is_validation() {
            tracing::debug!("validation: {err}");
        } else {
            tracing::warn!("⚠️  {err}");
        }
        self.notify(Notification::from(err))
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let page = ui::page::view(&self.studio, &self.editor);
        if self.toasts.is_empty() {
            return page;
        }
        stack![page, ui::toast::view(&self.toasts)].into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::close_requests().map(Message::CloseRequested),
            event::listen_with(|event, _status, _window| match event {
                Event::Window(window::Event::FileDropped(path)) => {
                    Some(Message::FileDropped(path))
                }
                _ => None,
            }),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.theme.clone()
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ai_image_studio=info")),
        )
        .init();

    iced::application("ИИ Генератор", ImageStudio::update, ImageStudio::view)
        .theme(ImageStudio::theme)
        .subscription(ImageStudio::subscription)
        .exit_on_close_request(false)
        .window_size((1100.0, 860.0))
        .centered()
        .run_with(ImageStudio::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::loader::test_support::source;

    fn studio_with(count: usize) -> ImageStudio {
        let mut app = ImageStudio::with_settings(Settings::default());
        let sources: Vec<_> = (0..count).map(|i| source(&format!("{i}.png"))).collect();
        app.studio.attach(sources).unwrap();
        app
    }

    #[tokio::test]
    async fn test_multi_file_drop_over_cap_is_rejected_whole() {
        let mut app = studio_with(9);

        // winit delivers a three-file drop as three separate events
        for name in ["a.png", "b.png", "c.png"] {
            let _ = app.update(Message::FileDropped(PathBuf::from(name)));
        }
        let _ = app.update(Message::FlushDropped);

        assert_eq!(app.studio.references().len(), 9);
        assert_eq!(app.toasts.len(), 1);
        let (_, toast) = app.toasts.iter().next().unwrap();
        assert_eq!(toast.message, "Максимум 10 изображений");
    }

    #[tokio::test]
    async fn test_non_image_drop_is_reported() {
        let mut app = studio_with(0);
        let _ = app.update(Message::FileDropped(PathBuf::from("notes.txt")));
        let _ = app.update(Message::FlushDropped);

        assert_eq!(app.toasts.len(), 1);
        assert!(app.studio.take_dropped().is_empty());
    }

    #[tokio::test]
    async fn test_loaded_batch_over_cap_gives_one_toast() {
        let mut app = studio_with(9);
        let loaded = vec![Ok(source("x.png")), Ok(source("y.png")), Ok(source("z.png"))];
        let _ = app.update(Message::ReferencesLoaded(loaded));

        assert_eq!(app.studio.references().len(), 9);
        assert_eq!(app.toasts.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_prompt_shows_error_toast() {
        let mut app = studio_with(0);
        let _ = app.update(Message::Generate);

        assert!(!app.studio.is_generating());
        assert_eq!(app.toasts.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_generation_timer_is_silent() {
        let mut app = studio_with(0);
        app.studio.set_prompt("горы на закате");
        let _ = app.update(Message::Generate);
        assert!(app.studio.is_generating());

        let ticket = app.studio.teardown().unwrap();
        app.studio.set_prompt("горы на закате");
        let _ = app.update(Message::Generate);
        let _ = app.update(Message::GenerationFinished(ticket));

        // The stale ticket from the first submission shows nothing
        assert!(app.toasts.is_empty());
        assert!(app.studio.is_generating());
    }
}
