mod app;
mod bus_monitor;
mod config;
mod content;
mod detail;
mod error;
mod gallery;
mod loader;
mod media;
mod message;
mod overlay;
mod playback;
mod scroll;
mod state;
mod ui;
mod visibility;
mod wheel_guard;

#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("showreel=info"))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let manifest: Option<PathBuf> = args.opt_value_from_str("--manifest").unwrap_or_else(|e| {
        log::warn!("Ignoring --manifest: {}", e);
        None
    });
    let config_path: Option<PathBuf> = args.opt_value_from_str("--config").unwrap_or_else(|e| {
        log::warn!("Ignoring --config: {}", e);
        None
    });
    for extra in args.finish() {
        log::warn!("Unrecognised argument {:?}", extra);
    }

    let (mut config, warning) = config::load(config_path.as_deref());
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }
    if manifest.is_some() {
        config.manifest = manifest;
    }

    app::run(config)
}
