/// Toast overlay
/// Stacks the live notifications in the bottom-right corner
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::state::notify::{ToastKind, Toasts};
use crate::Message;

/// Width of a single toast card
const TOAST_WIDTH: f32 = 320.0;

pub fn view(toasts: &Toasts) -> Element<'_, Message> {
    let cards = toasts.iter().map(|toast| {
        let kind = toast.kind;
        let card = container(
            row![
                text(&toast.message).size(14).width(Length::Fill),
                button(text("×").size(14))
                    .on_press(Message::DismissToast(toast.id))
                    .style(button::text)
                    .padding(0),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        )
        .padding(12)
        .width(TOAST_WIDTH)
        .style(move |theme: &Theme| card_style(theme, kind));

        Element::from(card)
    });

    container(column(cards).spacing(8))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(16)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Bottom)
        .into()
}

fn card_style(theme: &Theme, kind: ToastKind) -> container::Style {
    let palette = theme.extended_palette();
    let pair = match kind {
        ToastKind::Success => palette.success.base,
        ToastKind::Failure => palette.danger.base,
    };

    container::Style {
        background: Some(pair.color.into()),
        text_color: Some(pair.text),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}
