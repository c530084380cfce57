/// Static page content
///
/// Gallery examples seed the prompt field when clicked; feature cards are
/// presentational only.

/// A gallery entry whose prompt can be reused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamplePrompt {
    /// Short caption shown above the prompt
    pub title: &'static str,
    pub prompt: &'static str,
}

pub static EXAMPLES: [ExamplePrompt; 3] = [
    ExamplePrompt {
        title: "Абстракция",
        prompt: "Абстрактное цифровое искусство с фиолетовыми градиентами",
    },
    ExamplePrompt {
        title: "Пейзаж",
        prompt: "Футуристический пейзаж с горами на закате",
    },
    ExamplePrompt {
        title: "Архитектура",
        prompt: "Архитектурная визуализация с фиолетовым освещением",
    },
];

/// A feature card in the "why us" row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub static FEATURES: [Feature; 3] = [
    Feature {
        icon: "⚡",
        title: "Мгновенная генерация",
        description: "Получите результат за секунды",
    },
    Feature {
        icon: "🎨",
        title: "Любой стиль",
        description: "От реализма до абстракции",
    },
    Feature {
        icon: "⬇",
        title: "Высокое качество",
        description: "Изображения в HD разрешении",
    },
];
