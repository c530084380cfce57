/// Toast overlay, stacked in the bottom-right corner above the page
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, horizontal_space, row, text, Column};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::state::notify::{Notification, NotificationKind, ToastId, Toasts};
use crate::Message;

const TOAST_WIDTH: f32 = 360.0;

pub fn view(toasts: &Toasts) -> Element<'_, Message> {
    let items = toasts
        .iter()
        .map(|(id, notification)| toast(*id, notification));

    container(
        Column::with_children(items)
            .spacing(8)
            .width(Length::Fixed(TOAST_WIDTH)),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(20)
    .align_x(Horizontal::Right)
    .align_y(Vertical::Bottom)
    .into()
}

fn toast(id: ToastId, notification: &Notification) -> Element<'_, Message> {
    let kind = notification.kind;
    let icon = match kind {
        NotificationKind::Success => "✅",
        NotificationKind::Error => "⚠️",
    };

    container(
        row![
            text(icon),
            text(notification.message.as_str()).size(14),
            horizontal_space(),
            button(text("✕").size(12))
                .on_press(Message::DismissToast(id))
                .padding(2)
                .style(button::text),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .padding(14)
    .width(Length::Fill)
    .style(move |theme: &Theme| toast_style(theme, kind))
    .into()
}

fn toast_style(theme: &Theme, kind: NotificationKind) -> container::Style {
    let palette = theme.extended_palette();
    let pair = match kind {
        NotificationKind::Success => palette.success.base,
        NotificationKind::Error => palette.danger.base,
    };

    container::Style {
        text_color: Some(pair.text),
        background: Some(pair.color.into()),
        border: Border {
            radius: 10.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}
