//! Playback, scrolling and animation tuning read from `settings.toml`.
//!
//! The file is looked up in `<config_dir>/Showreel/settings.toml` unless a
//! path is given on the command line. A missing file yields the defaults; an
//! unreadable or malformed one yields the defaults plus a warning for the log.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Showreel";

pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.3;
pub const DEFAULT_BOTTOM_MARGIN: f32 = 0.1;
pub const DEFAULT_RESUME_BAND_TOP: f32 = 0.7;
pub const DEFAULT_RESUME_BAND_BOTTOM: f32 = 0.3;
pub const DEFAULT_SHOW_RESUME_DELAY_MS: u64 = 100;
pub const DEFAULT_SCROLL_COOLDOWN_MS: u64 = 1000;
pub const DEFAULT_SCROLL_ANIMATION_MS: u64 = 600;
pub const DEFAULT_DETAIL_ANIMATION_MS: u64 = 400;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackSection {
    /// Fraction of an item that must be inside the viewport before it plays.
    pub visibility_threshold: f32,
    /// Fraction of the viewport height trimmed from the bottom of the root rectangle.
    pub bottom_margin: f32,
    /// An item resumes only if its top is above this fraction of the viewport height...
    pub resume_band_top: f32,
    /// ...and its bottom is below this fraction.
    pub resume_band_bottom: f32,
    pub show_resume_delay_ms: u64,
}

impl Default for PlaybackSection {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            resume_band_top: DEFAULT_RESUME_BAND_TOP,
            resume_band_bottom: DEFAULT_RESUME_BAND_BOTTOM,
            show_resume_delay_ms: DEFAULT_SHOW_RESUME_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollSection {
    pub cooldown_ms: u64,
    pub animation_ms: u64,
}

impl Default for ScrollSection {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_SCROLL_COOLDOWN_MS,
            animation_ms: DEFAULT_SCROLL_ANIMATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetailSection {
    pub animation_ms: u64,
}

impl Default for DetailSection {
    fn default() -> Self {
        Self {
            animation_ms: DEFAULT_DETAIL_ANIMATION_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON manifest replacing the built-in catalogue.
    pub manifest: Option<PathBuf>,
    pub playback: PlaybackSection,
    pub scroll: ScrollSection,
    pub detail: DetailSection,
}

impl Config {
    /// Pulls every value back into a range the controllers can work with.
    pub fn sanitized(mut self) -> Self {
        let p = &mut self.playback;
        p.visibility_threshold = p.visibility_threshold.clamp(0.0, 1.0);
        p.bottom_margin = p.bottom_margin.clamp(0.0, 0.9);
        p.resume_band_top = p.resume_band_top.clamp(0.0, 1.0);
        p.resume_band_bottom = p.resume_band_bottom.clamp(0.0, p.resume_band_top);
        p.show_resume_delay_ms = p.show_resume_delay_ms.min(5_000);
        self.scroll.cooldown_ms = self.scroll.cooldown_ms.min(10_000);
        self.scroll.animation_ms = self.scroll.animation_ms.clamp(1, 5_000);
        self.detail.animation_ms = self.detail.animation_ms.clamp(1, 5_000);
        self
    }

    pub fn show_resume_delay(&self) -> Duration {
        Duration::from_millis(self.playback.show_resume_delay_ms)
    }

    pub fn scroll_cooldown(&self) -> Duration {
        Duration::from_millis(self.scroll.cooldown_ms)
    }

    pub fn scroll_animation(&self) -> Duration {
        Duration::from_millis(self.scroll.animation_ms)
    }

    pub fn detail_animation(&self) -> Duration {
        Duration::from_millis(self.detail.animation_ms)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration, returning a warning message when the file had to be ignored.
pub fn load(explicit: Option<&Path>) -> (Config, Option<String>) {
    let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => path,
        None => return (Config::default(), None),
    };

    if explicit.is_none() && !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(e) => (
            Config::default(),
            Some(format!("Ignoring {}: {}", path.display(), e)),
        ),
    }
}

/// TOML accepts `nan` and `inf`; neither can be clamped into range.
fn check_finite(section: &PlaybackSection) -> Result<()> {
    let values = [
        ("visibility_threshold", section.visibility_threshold),
        ("bottom_margin", section.bottom_margin),
        ("resume_band_top", section.resume_band_top),
        ("resume_band_bottom", section.resume_band_bottom),
    ];
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((key, value)) => Err(Error::Config(format!("playback.{} = {}", key, value))),
        None => Ok(()),
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    check_finite(&config.playback)?;
    Ok(config.sanitized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[scroll]\ncooldown_ms = 250\n").expect("failed to write config");

        let config = load_from_path(&path).expect("config should parse");
        assert_eq!(config.scroll.cooldown_ms, 250);
        assert_eq!(config.scroll.animation_ms, DEFAULT_SCROLL_ANIMATION_MS);
        assert_eq!(config.playback, PlaybackSection::default());
        assert!(config.manifest.is_none());
    }

    #[test]
    fn invalid_toml_is_reported_and_defaults_are_used() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "not = valid = toml").expect("failed to write config");

        assert!(matches!(
            load_from_path(&path),
            Err(Error::Config(_))
        ));

        let (config, warning) = load(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn non_finite_floats_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        for body in [
            "[playback]\nresume_band_top = nan\n",
            "[playback]\nvisibility_threshold = inf\n",
            "[playback]\nbottom_margin = -inf\n",
        ] {
            let path = temp_dir.path().join(CONFIG_FILE);
            fs::write(&path, body).expect("failed to write config");

            assert!(matches!(load_from_path(&path), Err(Error::Config(_))));
            let (config, warning) = load(Some(&path));
            assert_eq!(config, Config::default());
            assert!(warning.is_some_and(|w| w.contains("playback.")));
        }
    }

    #[test]
    fn explicit_missing_file_warns() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("absent.toml");

        let (config, warning) = load(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warning.unwrap().contains("absent.toml"));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "manifest = \"reel.json\"\n[playback]\nvisibility_threshold = 4.0\nresume_band_top = 0.5\nresume_band_bottom = 0.8\n",
        )
        .expect("failed to write config");

        let config = load_from_path(&path).expect("config should parse");
        assert_eq!(config.manifest, Some(PathBuf::from("reel.json")));
        assert_eq!(config.playback.visibility_threshold, 1.0);
        assert_eq!(config.playback.resume_band_bottom, 0.5);
    }

    #[test]
    fn durations_follow_the_sections() {
        let config = Config::default();
        assert_eq!(config.show_resume_delay(), Duration::from_millis(100));
        assert_eq!(config.scroll_cooldown(), Duration::from_millis(1000));
        assert_eq!(config.detail_animation(), Duration::from_millis(400));
    }
}
