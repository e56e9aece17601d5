/// Query results: markdown answer, image gallery and source list.
/// Each section is only shown when it has content.
use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, markdown, text, Column};
use iced::{Element, Pixels, Theme};
use iced_aw::Wrap;

use crate::state::data::{ImageEntry, SourceLink};
use crate::state::query::QueryView;
use crate::Message;

/// Display width of a gallery image
const IMAGE_WIDTH: f32 = 300.0;

/// Load state of a single gallery image
#[derive(Debug, Clone)]
pub enum Thumbnail {
    /// Download still running
    Loading,
    Ready(Handle),
    /// Download or file lookup failed; only the caption is shown
    Failed,
}

pub fn view<'a>(
    state: &'a QueryView,
    answer: &'a [markdown::Item],
    thumbnails: &'a [Thumbnail],
    theme: &Theme,
) -> Element<'a, Message> {
    let mut sections = Column::new().spacing(24);

    if !state.answer().is_empty() {
        sections = sections.push(column![
            text("💬 Answer").size(24),
            markdown::view(
                answer,
                markdown::Settings::default(),
                markdown::Style::from_palette(theme.palette()),
            )
            .map(Message::LinkClicked),
        ]
        .spacing(12));
    }

    if !state.images().is_empty() {
        sections = sections.push(column![
            text("🖼️ Relevant Images").size(20),
            gallery(state.images(), thumbnails),
        ]
        .spacing(12));
    }

    if !state.sources().is_empty() {
        sections = sections.push(column![
            text("📚 Sources").size(20),
            source_list(state.sources()),
        ]
        .spacing(8));
    }

    sections.into()
}

/// Wrapping row of images with their captions
fn gallery<'a>(entries: &'a [ImageEntry], thumbnails: &'a [Thumbnail]) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let picture: Element<'a, Message> = match thumbnails.get(index) {
                Some(Thumbnail::Ready(handle)) => image(handle.clone()).width(IMAGE_WIDTH).into(),
                Some(Thumbnail::Failed) => placeholder("Image unavailable"),
                Some(Thumbnail::Loading) | None => placeholder("Loading image..."),
            };

            column![picture, text(entry.alt_text()).size(12)]
                .spacing(4)
                .width(IMAGE_WIDTH)
                .into()
        })
        .collect();

    Wrap::with_elements(tiles)
        .spacing(Pixels(16.0))
        .line_spacing(Pixels(16.0))
        .into()
}

fn placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(12))
        .center_x(IMAGE_WIDTH)
        .center_y(IMAGE_WIDTH * 0.66)
        .style(container::rounded_box)
        .into()
}

/// Bulleted list of links that open in the system browser
fn source_list(sources: &[SourceLink]) -> Element<'_, Message> {
    let links = sources.iter().map(|source| {
        let link = button(text(format!("• {}", source.label)).size(14))
            .on_press(Message::OpenUrl(source.url.clone()))
            .style(button::text)
            .padding(0);

        Element::from(link)
    });

    column(links).spacing(6).into()
}
