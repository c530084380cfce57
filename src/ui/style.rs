/// Shared widget styles and the studio theme
use iced::theme::Palette;
use iced::widget::container;
use iced::{Border, Color, Shadow, Theme, Vector};

/// Light theme with the violet brand accent
pub fn studio_theme() -> Theme {
    Theme::custom(
        "AI Image Studio".to_string(),
        Palette {
            background: Color::from_rgb8(0xFA, 0xFA, 0xFC),
            text: Color::from_rgb8(0x1E, 0x1B, 0x2E),
            primary: Color::from_rgb8(0x8B, 0x5C, 0xF6),
            success: Color::from_rgb8(0x16, 0xA3, 0x4A),
            danger: Color::from_rgb8(0xDC, 0x26, 0x26),
        },
    )
}

/// White rounded card with a soft shadow
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Color::WHITE.into()),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 16.0,
        },
        ..container::Style::default()
    }
}

/// Small tinted badge, e.g. above the hero title
pub fn pill(theme: &Theme) -> container::Style {
    let primary = theme.palette().primary;
    container::Style {
        text_color: Some(primary),
        background: Some(Color { a: 0.1, ..primary }.into()),
        border: Border {
            radius: 999.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Violet tile standing in for a gallery picture
pub fn gallery_tile(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        text_color: Some(Color::WHITE),
        background: Some(palette.primary.strong.color.into()),
        border: Border {
            radius: 16.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Placeholder behind a preview whose handle is gone
pub fn thumbnail_frame(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}
