//! GStreamer bus monitor for clip failures.
//!
//! Pipelines that hit a decode or resource error after construction are
//! reported so their item can switch to the placeholder card. Only error
//! messages are popped; EOS stays on the bus for the player's own looping.

use futures::channel::mpsc;
use gstreamer::prelude::*;
use iced::Subscription;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::message::Message;

/// The set of pipelines being watched. Identity is the render generation.
#[derive(Clone)]
pub struct WatchedPipelines {
    pub generation: u64,
    pub pipelines: Vec<(usize, gstreamer::Pipeline)>,
}

impl Hash for WatchedPipelines {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.generation.hash(state);
        for (index, _) in &self.pipelines {
            index.hash(state);
        }
    }
}

/// Creates a subscription that reports pipeline errors for all clips.
pub fn bus_monitor_subscription(watched: WatchedPipelines) -> Subscription<Message> {
    if watched.pipelines.is_empty() {
        return Subscription::none();
    }
    Subscription::run_with(watched, watch_buses)
}

fn watch_buses(watched: &WatchedPipelines) -> impl futures::Stream<Item = Message> + use<> {
    let pipelines = watched.pipelines.clone();

    iced::stream::channel(100, move |mut output: mpsc::Sender<Message>| async move {
        log::info!("Bus monitor started, watching {} clips", pipelines.len());
        let mut failed = vec![false; pipelines.len()];

        loop {
            for (slot, (index, pipeline)) in pipelines.iter().enumerate() {
                if failed[slot] {
                    continue;
                }
                let Some(bus) = pipeline.bus() else {
                    continue;
                };
                while let Some(msg) = bus.timed_pop_filtered(
                    gstreamer::ClockTime::ZERO,
                    &[gstreamer::MessageType::Error],
                ) {
                    if let gstreamer::MessageView::Error(err) = msg.view() {
                        log::error!(
                            "GStreamer error on clip {}: {} (debug: {:?})",
                            index,
                            err.error(),
                            err.debug()
                        );
                        failed[slot] = true;
                        let message = Message::ClipFailed(*index, err.error().to_string());
                        let _ = output.try_send(message);
                    }
                }
            }

            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
}
