/// Simulated image generation
///
/// `Idle -> Generating -> Idle`. A submission is accepted only from `Idle`
/// with a non-blank prompt, and it resolves after a fixed delay. Nothing is
/// produced; the only outcome is a success notification.
use std::time::Duration;

use super::attachments::AttachmentId;
use super::notify::Notification;
use crate::error::StudioError;

/// Identifies one submission so a late or stale completion can be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating {
        ticket: Ticket,
        /// Number of reference images captured at submit time
        reference_count: usize,
    },
}

/// Snapshot of what the user asked for at the moment of submission
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub ticket: Ticket,
    pub prompt: String,
    pub attachments: Vec<AttachmentId>,
}

/// The generation state machine
#[derive(Debug, Default)]
pub struct Generator {
    state: GenerationState,
    next_ticket: u64,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.state, GenerationState::Generating { .. })
    }

    /// Start a generation
    pub fn submit(
        &mut self,
        prompt: &str,
        attachments: &[AttachmentId],
    ) -> Result<GenerationRequest, StudioError> {
        if prompt.trim().is_empty() {
            return Err(StudioError::EmptyPrompt);
        }
        if self.is_generating() {
            return Err(StudioError::AlreadyGenerating);
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.state = GenerationState::Generating {
            ticket,
            reference_count: attachments.len(),
        };

        tracing::info!(
            "🪄 Generation {:?} submitted with {} reference image(s)",
            ticket,
            attachments.len()
        );

        Ok(GenerationRequest {
            ticket,
            prompt: prompt.to_string(),
            attachments: attachments.to_vec(),
        })
    }

    /// Resolve the pending generation
    ///
    /// Only the ticket currently pending completes; anything else is stale
    /// and yields no notification.
    pub fn complete(&mut self, ticket: Ticket) -> Option<Notification> {
        match self.state {
            GenerationState::Generating {
                ticket: pending,
                reference_count,
            } if pending == ticket => {
                self.state = GenerationState::Idle;
                tracing::info!("✅ Generation {:?} complete", ticket);
                Some(Notification::success(success_message(reference_count)))
            }
            _ => {
                tracing::debug!("ignoring stale completion for {:?}", ticket);
                None
            }
        }
    }

    /// Drop the pending generation without a notification
    pub fn cancel(&mut self) -> Option<Ticket> {
        match std::mem::take(&mut self.state) {
            GenerationState::Generating { ticket, .. } => {
                tracing::info!("⏹️  Generation {:?} cancelled", ticket);
                Some(ticket)
            }
            GenerationState::Idle => None,
        }
    }
}

/// Text of the success toast
pub fn success_message(reference_count: usize) -> String {
    if reference_count == 0 {
        "Изображение создано! (Демо-режим)".to_string()
    } else {
        format!("Изображение создано с учётом референсов: {reference_count}! (Демо-режим)")
    }
}

/// Wait out the fixed generation delay
///
/// The shell runs this as an abortable task; the returned ticket is fed
/// back into `Generator::complete`.
pub async fn simulate(ticket: Ticket, delay: Duration) -> Ticket {
    tokio::time::sleep(delay).await;
    ticket
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::notify::NotificationKind;

    #[test]
    fn test_blank_prompt_never_starts() {
        let mut generator = Generator::new();
        for prompt in ["", "   ", "\n\t "] {
            assert_eq!(generator.submit(prompt, &[]), Err(StudioError::EmptyPrompt));
            assert_eq!(generator.state(), GenerationState::Idle);
        }
    }

    #[test]
    fn test_submit_then_complete_once() {
        let mut generator = Generator::new();
        let request = generator.submit("a valid prompt", &[]).unwrap();
        assert!(generator.is_generating());
        assert_eq!(request.prompt, "a valid prompt");

        let notification = generator.complete(request.ticket).unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, "Изображение создано! (Демо-режим)");
        assert_eq!(generator.state(), GenerationState::Idle);

        // A second completion for the same ticket does nothing
        assert!(generator.complete(request.ticket).is_none());
    }

    #[test]
    fn test_resubmit_while_generating_is_refused() {
        let mut generator = Generator::new();
        let first = generator.submit("first", &[]).unwrap();

        assert_eq!(
            generator.submit("second", &[]),
            Err(StudioError::AlreadyGenerating)
        );
        assert_eq!(
            generator.state(),
            GenerationState::Generating {
                ticket: first.ticket,
                reference_count: 0
            }
        );
    }

    #[test]
    fn test_stale_ticket_ignored_after_cancel() {
        let mut generator = Generator::new();
        let first = generator.submit("first", &[]).unwrap();
        assert_eq!(generator.cancel(), Some(first.ticket));
        assert_eq!(generator.cancel(), None);

        let second = generator.submit("second", &[]).unwrap();
        assert_ne!(first.ticket, second.ticket);

        // The cancelled timer firing late must not end the new generation
        assert!(generator.complete(first.ticket).is_none());
        assert!(generator.is_generating());
        assert!(generator.complete(second.ticket).is_some());
    }

    #[test]
    fn test_message_mentions_reference_count() {
        assert_eq!(success_message(0), "Изображение создано! (Демо-режим)");
        assert_eq!(
            success_message(3),
            "Изображение создано с учётом референсов: 3! (Демо-режим)"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_waits_fixed_delay() {
        let mut generator = Generator::new();
        let request = generator.submit("prompt", &[]).unwrap();

        let start = tokio::time::Instant::now();
        let ticket = simulate(request.ticket, Duration::from_millis(2000)).await;

        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(ticket, request.ticket);
        assert!(generator.complete(ticket).is_some());
    }
}
