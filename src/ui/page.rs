/// The single scrolling page: hero, generator form, features, gallery,
/// call to action and footer
use iced::widget::image::{Handle, Image};
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{
    button, column, container, horizontal_space, row, scrollable, text, text_editor,
    vertical_space, Column, Row,
};
use iced::{Alignment, ContentFit, Element, Length, Task};
use iced_aw::Wrap;

use super::style;
use crate::state::attachments::{Attachment, ReferenceImages};
use crate::state::data::{EXAMPLES, FEATURES};
use crate::state::studio::Studio;
use crate::Message;

const CONTENT_WIDTH: f32 = 860.0;
const THUMBNAIL_SIDE: f32 = 96.0;

/// Hero headline, one entry per line
const HEADLINE: [&str; 2] = ["Превратите слова", "в изображения"];

/// Id of the page scrollable
pub fn page_id() -> scrollable::Id {
    scrollable::Id::new("studio-page")
}

/// Scroll the page back to the generator form
pub fn scroll_to_top<T>() -> Task<T> {
    scrollable::scroll_to(page_id(), AbsoluteOffset { x: 0.0, y: 0.0 })
}

/// Build the whole page
pub fn view<'a>(studio: &'a Studio, editor: &'a text_editor::Content) -> Element<'a, Message> {
    let content = column![
        hero(),
        generator_form(studio, editor),
        features(),
        gallery(),
        call_to_action(),
        footer(),
    ]
    .spacing(64)
    .padding(40)
    .width(Length::Fill)
    .align_x(Alignment::Center);

    scrollable(content)
        .id(page_id())
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn hero<'a>() -> Element<'a, Message> {
    column![
        container(text("✨ Генерация изображений с ИИ").size(14))
            .padding([6, 16])
            .style(style::pill),
        text(HEADLINE[0]).size(56),
        text(HEADLINE[1]).size(56),
        text("Создавайте уникальные изображения из текстовых описаний с помощью искусственного интеллекта")
            .size(20),
    ]
    .spacing(16)
    .max_width(CONTENT_WIDTH)
    .align_x(Alignment::Center)
    .into()
}

fn generator_form<'a>(
    studio: &'a Studio,
    editor: &'a text_editor::Content,
) -> Element<'a, Message> {
    let generating = studio.is_generating();

    let prompt = column![
        text("✏️ Опишите желаемое изображение").size(16),
        text_editor(editor)
            .placeholder("Например: Футуристический город на закате с летающими автомобилями...")
            .on_action(Message::PromptEdited)
            .height(Length::Fixed(140.0))
            .padding(12),
        text("Будьте максимально детальны в описании для лучших результатов").size(13),
    ]
    .spacing(8);

    let label = if generating {
        "⏳ Генерируем..."
    } else {
        "🪄 Создать изображение"
    };
    let generate = button(container(text(label).size(18)).center_x(Length::Fill))
        .on_press_maybe((!generating).then_some(Message::Generate))
        .padding(14)
        .width(Length::Fill)
        .style(button::primary);

    let form = column![prompt, references(studio), generate].spacing(24);

    container(form)
        .padding(32)
        .max_width(CONTENT_WIDTH)
        .style(style::card)
        .into()
}

fn references(studio: &Studio) -> Element<'_, Message> {
    let images = studio.references();

    let add = button(text("＋ Добавить изображения").size(14))
        .on_press_maybe(studio.can_attach().then_some(Message::PickReferences))
        .padding(10)
        .style(button::secondary);

    let header = row![
        column![
            text(format!("🖼️ Референсы ({}/{})", images.len(), images.max())).size(16),
            text(format!(
                "Необязательно: примеры стиля или композиции, свободных мест: {}",
                images.remaining()
            ))
            .size(13),
        ]
        .spacing(4),
        horizontal_space(),
        add,
    ]
    .align_y(Alignment::Center);

    if images.is_empty() {
        return header.into();
    }

    let tiles: Vec<Element<Message>> = images
        .iter()
        .map(|attachment| reference_tile(images, attachment))
        .collect();

    column![header, Wrap::with_elements(tiles).spacing(12.0).line_spacing(12.0)]
        .spacing(12)
        .into()
}

fn reference_tile<'a>(
    images: &'a ReferenceImages,
    attachment: &'a Attachment,
) -> Element<'a, Message> {
    let preview: Element<Message> = match images.preview(attachment.preview) {
        Some(handle) => Image::<Handle>::new(handle.clone())
            .width(Length::Fixed(THUMBNAIL_SIDE))
            .height(Length::Fixed(THUMBNAIL_SIDE))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("—"))
            .center_x(Length::Fixed(THUMBNAIL_SIDE))
            .center_y(Length::Fixed(THUMBNAIL_SIDE))
            .style(style::thumbnail_frame)
            .into(),
    };

    let remove = button(text("✕").size(12))
        .on_press(Message::RemoveReference(attachment.id))
        .padding([2, 6])
        .style(button::danger);

    column![
        preview,
        row![
            text(short_name(&attachment.source.file_name)).size(11),
            horizontal_space(),
            remove,
        ]
        .align_y(Alignment::Center),
    ]
    .spacing(4)
    .width(Length::Fixed(THUMBNAIL_SIDE))
    .into()
}

/// Shorten long file names to fit under a thumbnail
fn short_name(name: &str) -> String {
    const MAX_CHARS: usize = 10;
    if name.chars().count() <= MAX_CHARS {
        name.to_string()
    } else {
        let head: String = name.chars().take(MAX_CHARS - 1).collect();
        format!("{head}…")
    }
}

fn features<'a>() -> Element<'a, Message> {
    let cards = FEATURES.iter().map(|feature| {
        container(
            column![
                text(feature.icon).size(28),
                text(feature.title).size(18),
                text(feature.description).size(14),
            ]
            .spacing(8)
            .align_x(Alignment::Center),
        )
        .padding(24)
        .width(Length::Fill)
        .style(style::card)
        .into()
    });

    container(Row::with_children(cards).spacing(24))
        .max_width(CONTENT_WIDTH)
        .into()
}

fn gallery<'a>() -> Element<'a, Message> {
    let tiles = EXAMPLES.iter().map(|example| {
        let tile = container(
            column![
                text(example.title).size(20),
                text(example.prompt).size(14),
                vertical_space(),
                text("👆 Нажмите, чтобы использовать промпт").size(12),
            ]
            .spacing(8),
        )
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fixed(220.0))
        .style(style::gallery_tile);

        button(tile)
            .on_press(Message::UseExample(example.prompt))
            .padding(0)
            .width(Length::Fill)
            .style(button::text)
            .into()
    });

    column![
        text("Галерея примеров").size(36),
        text("Вдохновитесь работами, созданными нашим ИИ").size(18),
        Row::with_children(tiles).spacing(24),
    ]
    .spacing(16)
    .max_width(CONTENT_WIDTH * 1.3)
    .align_x(Alignment::Center)
    .into()
}

fn call_to_action<'a>() -> Element<'a, Message> {
    column![
        text("Готовы создать что-то удивительное?").size(36),
        text("Начните генерировать изображения прямо сейчас").size(18),
        button(text("⬆ Начать создавать").size(18))
            .on_press(Message::ScrollToTop)
            .padding(14)
            .style(button::primary),
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .into()
}

fn footer<'a>() -> Element<'a, Message> {
    Column::new()
        .push(text("© 2024 ИИ Генератор. Создано с помощью передовых технологий.").size(13))
        .align_x(Alignment::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_copy() {
        assert_eq!(HEADLINE.join(" "), "Превратите слова в изображения");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("a.png"), "a.png");
        assert_eq!(short_name("0123456789"), "0123456789");
        assert_eq!(short_name("very_long_name.png"), "very_long…");
        assert_eq!(short_name("пейзаж_горы.jpg").chars().count(), 10);
    }
}
