use iced::gradient::Linear;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::text::Shaping;
use iced::widget::{
    button, center, column, container, mouse_area, opaque, row, scrollable, stack, text, Column, Id,
};
use iced::{alignment, Background, Color, Degrees, Element, Gradient, Length, Padding, Theme};
use iced_video_player::{Video, VideoPlayer};

use crate::app::GALLERY_ID;
use crate::content::VideoRecord;
use crate::detail::{
    DetailPanel, DetailState, BODY_SIZE, CREW_ROW_SPACING, DIRECTOR_SIZE, EXPANDED_SECTION_GAP,
    HEADING_SIZE, INFO_BOTTOM_OFFSET, PANEL_MARGIN, PARAGRAPH_SPACING, SECTION_SPACING, TITLE_SIZE,
};
use crate::gallery::GalleryItem;
use crate::message::Message;
use crate::state::App;
use crate::wheel_guard::wheel_guard;

const PLACEHOLDER_BACKGROUND: Color = Color::from_rgb(0.133, 0.133, 0.133);

/// White with the given alpha, for text fading with the panel.
fn faded(alpha: f32) -> Color {
    Color {
        a: alpha.clamp(0.0, 1.0),
        ..Color::WHITE
    }
}

/// Render the main view.
pub fn render_main_view(app: &App) -> Element<'_, Message> {
    let gallery: Element<'_, Message> = if app.gallery.items().is_empty() {
        center(
            column![
                text("No clips yet").size(36),
                text("Drop .webm files here or add one from the menu").size(16),
            ]
            .spacing(12)
            .align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    } else {
        render_gallery(app)
    };

    let mut layers = stack![gallery, render_header(app)];
    if app.gallery.menu_open() {
        layers = layers.push(render_menu(app));
    }

    container(layers)
        .style(|_theme: &Theme| container::Style {
            background: Some(Color::BLACK.into()),
            ..Default::default()
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// One full-height cell per clip, stacked in a scrollable the wheel never reaches.
fn render_gallery(app: &App) -> Element<'_, Message> {
    let item_height = app.gallery.viewport().item_height();

    let cells: Vec<Element<'_, Message>> = app
        .gallery
        .items()
        .iter()
        .filter_map(|item| {
            let record = app.gallery.record(item.index)?;
            Some(create_item_cell(app, item, record, item_height))
        })
        .collect();

    let list = scrollable(Column::with_children(cells).width(Length::Fill))
        .id(Id::new(GALLERY_ID))
        .direction(Direction::Vertical(Scrollbar::hidden()))
        .on_scroll(Message::GalleryScrolled)
        .width(Length::Fill)
        .height(Length::Fill);

    wheel_guard(list).into()
}

/// Create a gallery cell: the clip, its backdrop and the credits panel.
fn create_item_cell<'a>(
    app: &'a App,
    item: &'a GalleryItem<Video>,
    record: &'a VideoRecord,
    height: f32,
) -> Element<'a, Message> {
    let Some(video) = item.media() else {
        return create_placeholder_cell(record, height);
    };

    let mut player = VideoPlayer::new(video)
        .width(Length::Fill)
        .height(Length::Fill)
        .content_fit(iced::ContentFit::Cover);
    if item.is_loading() {
        player = player.on_new_frame(Message::FirstFrame(item.index));
    }

    let mut layers = stack![
        container(player)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
        build_backdrop(&item.detail),
        build_info_panel(app, &item.detail, record),
    ];

    if item.is_loading() {
        layers = layers.push(
            center(text("Loading…").size(14).color(faded(0.6)))
                .width(Length::Fill)
                .height(Length::Fill),
        );
    }

    mouse_area(
        container(layers)
            .width(Length::Fill)
            .height(Length::Fixed(height)),
    )
    .on_press(Message::ToggleDetail(item.index))
    .into()
}

/// Static card shown in place of a clip that failed to load.
fn create_placeholder_cell(record: &VideoRecord, height: f32) -> Element<'_, Message> {
    container(center(
        column![
            text("🎬").size(48).shaping(Shaping::Advanced),
            text("Video unavailable").size(19).color(Color::from_rgb8(0x66, 0x66, 0x66)),
            text(&record.title).size(16).color(Color::from_rgb8(0x99, 0x99, 0x99)),
            text(&record.director).size(14).color(Color::from_rgb8(0x77, 0x77, 0x77)),
        ]
        .spacing(10)
        .align_x(alignment::Horizontal::Center),
    ))
    .style(|_theme: &Theme| container::Style {
        background: Some(PLACEHOLDER_BACKGROUND.into()),
        ..Default::default()
    })
    .width(Length::Fill)
    .height(Length::Fixed(height))
    .into()
}

/// Dark gradient rising from the bottom edge; grows with the expanded panel.
fn build_backdrop<'a>(detail: &DetailPanel) -> Element<'a, Message> {
    let gradient = Linear::new(Degrees(0.0))
        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.85))
        .add_stop(1.0, Color::TRANSPARENT);

    container(
        container("")
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Gradient(Gradient::Linear(gradient))),
                ..Default::default()
            })
            .width(Length::Fill)
            .height(Length::Fixed(detail.gradient_height())),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_y(alignment::Vertical::Bottom)
    .into()
}

/// Title and director, with the credits section sliding open beneath them.
fn build_info_panel<'a>(
    app: &'a App,
    detail: &'a DetailPanel,
    record: &'a VideoRecord,
) -> Element<'a, Message> {
    let metrics = app.gallery.panel_metrics();

    let mut info = column![
        text(&record.title).size(TITLE_SIZE).color(Color::WHITE),
        text(&record.director)
            .size(DIRECTOR_SIZE)
            .color(faded(0.8)),
    ]
    .width(Length::Fill);

    if detail.state() != DetailState::Collapsed {
        info = info.push(container("").height(Length::Fixed(EXPANDED_SECTION_GAP)));
        info = info.push(build_expanded_section(detail));
    }

    container(container(info).max_width(metrics.width))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(alignment::Vertical::Bottom)
        .padding(Padding {
            top: 0.0,
            right: PANEL_MARGIN,
            bottom: INFO_BOTTOM_OFFSET,
            left: PANEL_MARGIN,
        })
        .into()
}

fn build_expanded_section(detail: &DetailPanel) -> Element<'_, Message> {
    let alpha = detail.opacity();
    let mut section = Column::new().spacing(PARAGRAPH_SPACING);

    if let Some(content) = detail.content() {
        for paragraph in &content.paragraphs {
            section = section.push(text(paragraph).size(BODY_SIZE).color(faded(0.9 * alpha)));
        }

        let gap = SECTION_SPACING - PARAGRAPH_SPACING;
        section = section.push(container("").height(Length::Fixed(gap)));
        section = section.push(text("CREW").size(HEADING_SIZE).color(faded(0.6 * alpha)));

        let crew = content.crew.iter().fold(
            Column::new().spacing(CREW_ROW_SPACING),
            |crew, (role, name)| {
                crew.push(
                    row![
                        text(format!("{}:", role)).size(BODY_SIZE).color(faded(0.6 * alpha)),
                        text(name).size(BODY_SIZE).color(faded(alpha)),
                    ]
                    .spacing(6),
                )
            },
        );
        section = section.push(crew);
    }

    container(section)
        .width(Length::Fill)
        .height(Length::Fixed(detail.height()))
        .clip(true)
        .into()
}

/// Logo and burger toggle, floating over the gallery.
fn render_header(app: &App) -> Element<'_, Message> {
    let menu_open = app.gallery.menu_open();
    let logo_alpha = if menu_open { 0.0 } else { 1.0 };

    let icon = if menu_open { "✕" } else { "☰" };
    let burger = button(text(icon).size(22).shaping(Shaping::Advanced))
        .on_press(Message::ToggleMenu)
        .padding(8)
        .style(|_theme: &Theme, _status| button::Style {
            background: None,
            text_color: Color::WHITE,
            ..Default::default()
        });

    container(
        row![
            text("SHOWREEL").size(20).color(faded(logo_alpha)),
            container("").width(Length::Fill),
            burger,
        ]
        .align_y(alignment::Vertical::Center),
    )
    .padding(Padding {
        top: 16.0,
        right: 24.0,
        bottom: 0.0,
        left: PANEL_MARGIN,
    })
    .width(Length::Fill)
    .height(Length::Shrink)
    .into()
}

fn menu_entry(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(28))
        .on_press(message)
        .padding(6)
        .style(|_theme: &Theme, status| button::Style {
            background: None,
            text_color: match status {
                button::Status::Hovered => Color::WHITE,
                _ => faded(0.75),
            },
            ..Default::default()
        })
        .into()
}

/// The full-window menu. Clicks on the scrim close it; clicks on the entries do not.
fn render_menu(app: &App) -> Element<'_, Message> {
    let entries = column![
        menu_entry("Work", Message::MenuHome),
        menu_entry("Add clip…", Message::BrowseFile),
        menu_entry("Reload", Message::ReloadManifest),
        text(app.status.clone()).size(12).color(faded(0.5)),
    ]
    .spacing(16)
    .align_x(alignment::Horizontal::Center);

    let scrim = center(opaque(entries))
        .style(|_theme: &Theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.92).into()),
            ..Default::default()
        })
        .width(Length::Fill)
        .height(Length::Fill);

    // Keep the header's close button on top of the scrim.
    stack![
        mouse_area(scrim).on_press(Message::ScrimPressed),
        render_header(app)
    ]
    .into()
}
