use iced::widget::scrollable::Viewport;
use iced::Event;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Debug)]
pub enum Message {
    ToggleDetail(usize),
    FirstFrame(usize),
    ClipFailed(usize, String),
    GalleryScrolled(Viewport),
    Frame(Instant),
    ShowResumeDue,
    ToggleMenu,
    ScrimPressed,
    MenuHome,
    BrowseFile,
    ReloadManifest,
    FileDropped(PathBuf),
    EventOccurred(Event),
}
