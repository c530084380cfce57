/// Error taxonomy for the studio
///
/// The `Display` text of every variant is what ends up in the error toast,
/// so the user-facing variants carry the page copy verbatim.
use std::path::PathBuf;

/// All failures the studio can report
///
/// `Clone` because errors travel inside iced messages; I/O and decode
/// failures keep the rendered reason instead of the source error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudioError {
    // ========== Validation ==========
    /// Prompt was empty or whitespace only
    #[error("Введите описание изображения")]
    EmptyPrompt,

    /// Attaching the batch would push the collection past its cap
    #[error("Максимум {max} изображений")]
    TooManyImages {
        max: usize,
        current: usize,
        requested: usize,
    },

    /// A generation is already pending
    #[error("Генерация уже выполняется")]
    AlreadyGenerating,

    // ========== File loading ==========
    #[error("Не удалось прочитать {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },

    #[error("Файл {name} слишком большой ({size} байт, максимум {limit})")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("Файл {name} не является изображением")]
    UnsupportedImage { name: String },

    #[error("Не удалось декодировать {name}: {reason}")]
    Decode { name: String, reason: String },

    // ========== Configuration ==========
    #[error("invalid settings file {}: {reason}", .path.display())]
    Settings { path: PathBuf, reason: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl StudioError {
    /// Validation failures are expected user input, not faults
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StudioError::EmptyPrompt
                | StudioError::TooManyImages { .. }
                | StudioError::AlreadyGenerating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            StudioError::EmptyPrompt.to_string(),
            "Введите описание изображения"
        );

        let err = StudioError::TooManyImages {
            max: 10,
            current: 9,
            requested: 2,
        };
        assert_eq!(err.to_string(), "Максимум 10 изображений");
    }

    #[test]
    fn test_validation_classification() {
        assert!(StudioError::EmptyPrompt.is_validation());
        assert!(StudioError::AlreadyGenerating.is_validation());
        assert!(!StudioError::UnsupportedImage {
            name: "notes.txt".into()
        }
        .is_validation());
    }
}
