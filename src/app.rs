use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{operation, Id};
use iced::{event, keyboard, mouse, window};
use iced::{Element, Subscription, Task};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::bus_monitor::{self, WatchedPipelines};
use crate::config::Config;
use crate::content::{self, VideoRecord};
use crate::error::MediaError;
use crate::loader;
use crate::message::Message;
use crate::overlay::EscapeOutcome;
use crate::state::App;
use crate::ui;

pub const GALLERY_ID: &str = "gallery";
pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 800.0;

fn is_clip_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("webm"))
}

fn scroll_gallery_to(offset: f32) -> Task<Message> {
    operation::scroll_to(Id::new(GALLERY_ID), AbsoluteOffset { x: 0.0, y: offset })
}

/// Launch the iced application loop.
pub fn run(config: Config) -> iced::Result {
    use std::cell::RefCell;

    // iced calls boot through `Fn`; the config is only consumed once.
    let boot_state = RefCell::new(Some(config));
    let boot = move || App::boot(boot_state.borrow_mut().take().unwrap_or_default());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .window_size(iced::Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .run()
}

impl App {
    /// Build the initial state and render the catalogue.
    pub fn boot(config: Config) -> (Self, Task<Message>) {
        let mut app = App::new(config);
        app.gallery.set_viewport_size(WINDOW_WIDTH, WINDOW_HEIGHT);

        let records = match &app.manifest {
            Some(path) => content::load_manifest(path).unwrap_or_else(|e| {
                log::error!("{}; using the built-in catalogue", e);
                content::builtin_catalogue()
            }),
            None => content::builtin_catalogue(),
        };
        app.render(records);
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        "Showreel".to_string()
    }

    /// Full replace of the gallery contents.
    fn render(&mut self, records: Vec<VideoRecord>) {
        self.gallery
            .update_video_data(records, &mut loader::load_clip);
        self.render_generation += 1;
        self.status = format!("{} clips", self.gallery.items().len());
    }

    fn add_clip(&mut self, path: PathBuf) {
        if !is_clip_file(&path) {
            log::info!("Ignoring non-webm file {}", path.display());
            self.status = format!("Not a .webm clip: {}", path.display());
            return;
        }
        let index = self
            .gallery
            .add_video(VideoRecord::from_file(path), &mut loader::load_clip);
        self.render_generation += 1;
        self.status = format!(
            "Added {}",
            self.gallery
                .record(index)
                .map(|r| r.title.as_str())
                .unwrap_or_default()
        );
    }

    fn reload_manifest(&mut self) {
        let records = match &self.manifest {
            Some(path) => match content::load_manifest(path) {
                Ok(records) => records,
                Err(e) => {
                    log::error!("Reload failed, keeping current gallery: {}", e);
                    self.status = e.to_string();
                    return;
                }
            },
            None => content::builtin_catalogue(),
        };
        self.render(records);
    }

    /// Handle UI messages and state updates.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleDetail(index) => {
                self.gallery.toggle_detail(index);
            }
            Message::FirstFrame(index) => {
                self.gallery.mark_loaded(index);
            }
            Message::ClipFailed(index, error) => {
                self.gallery.mark_failed(index, MediaError::Load(error));
            }
            Message::GalleryScrolled(viewport) => {
                self.gallery.set_scroll_offset(viewport.absolute_offset().y);
            }
            Message::Frame(now) => {
                if let Some(offset) = self.gallery.tick(now) {
                    return scroll_gallery_to(offset);
                }
            }
            Message::ShowResumeDue => {
                self.gallery.resume_after_show();
            }
            Message::ToggleMenu => {
                self.gallery.toggle_menu();
            }
            Message::ScrimPressed => {
                self.gallery.close_menu();
            }
            Message::MenuHome => {
                self.gallery.set_scroll_offset(0.0);
                self.gallery.close_menu();
                return scroll_gallery_to(0.0);
            }
            Message::BrowseFile => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Clips", &["webm", "WEBM"])
                    .pick_file()
                {
                    self.add_clip(path);
                }
            }
            Message::ReloadManifest => {
                self.reload_manifest();
                return scroll_gallery_to(self.gallery.viewport().offset_y);
            }
            Message::FileDropped(path) => {
                self.add_clip(path);
            }
            Message::EventOccurred(event) => return self.handle_event(event),
        }
        Task::none()
    }

    fn handle_event(&mut self, event: iced::Event) -> Task<Message> {
        match event {
            iced::Event::Window(window::Event::Focused) => {
                self.gallery.window_focused();
            }
            iced::Event::Window(window::Event::Unfocused) => {
                self.gallery.window_blurred();
            }
            iced::Event::Window(window::Event::Opened { size, .. }) => {
                self.gallery.set_viewport_size(size.width, size.height);
            }
            iced::Event::Window(window::Event::Resized(size)) => {
                // Minimizing reports a zero-sized window.
                if size.width <= 0.0 || size.height <= 0.0 {
                    if !self.window_minimized {
                        self.window_minimized = true;
                        self.gallery.window_hidden();
                    }
                    return Task::none();
                }
                self.gallery.set_viewport_size(size.width, size.height);
                if self.window_minimized {
                    self.window_minimized = false;
                    let delay = self.gallery.window_shown();
                    return Task::perform(tokio::time::sleep(delay), |_| Message::ShowResumeDue);
                }
            }
            iced::Event::Window(window::Event::FileDropped(path)) => {
                return self.update(Message::FileDropped(path));
            }
            iced::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) => match self.gallery.escape() {
                EscapeOutcome::ClosedMenu => log::debug!("Escape closed the menu"),
                EscapeOutcome::CollapsedDetails(n) => log::debug!("Escape collapsed {} panels", n),
            },
            iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let dy = match delta {
                    mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => y,
                };
                // Positive wheel deltas scroll up in iced; the navigator wants down-positive.
                self.gallery.on_wheel(Instant::now(), -dy);
            }
            _ => {}
        }
        Task::none()
    }

    /// Subscribe to events.
    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![event::listen().map(Message::EventOccurred)];

        if self.gallery.is_animating() {
            subscriptions.push(window::frames().map(Message::Frame));
        }

        let pipelines = self
            .gallery
            .items()
            .iter()
            .filter_map(|item| item.media().map(|video| (item.index, video.pipeline())))
            .collect();
        subscriptions.push(bus_monitor::bus_monitor_subscription(WatchedPipelines {
            generation: self.render_generation,
            pipelines,
        }));

        Subscription::batch(subscriptions)
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        ui::render_main_view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_webm_files_are_accepted() {
        assert!(is_clip_file(Path::new("/tmp/reel.webm")));
        assert!(is_clip_file(Path::new("/tmp/REEL.WEBM")));
        assert!(!is_clip_file(Path::new("/tmp/reel.mp4")));
        assert!(!is_clip_file(Path::new("/tmp/reel")));
    }
}
