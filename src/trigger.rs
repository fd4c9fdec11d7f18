//! Trigger boundary for Burst FX
//! External detection components (clipboard watchers, hotkeys, anything) run
//! on their own threads and hand burst requests to the render thread through
//! this channel. The pool itself is only ever mutated on the render thread.

use crossbeam_channel::{unbounded, Receiver, Sender};
use egui::Vec2;
use tracing::{debug, warn};

use crate::style::BurstStyle;

/// Raw trigger payload as received from a collaborator. Position may be
/// missing or garbage; validation decides whether a burst fires at all.
#[derive(Clone, Debug)]
pub struct TriggerEvent {
    pub pos: Option<(f32, f32)>,
    pub style_hint: Option<String>,
}

/// A validated burst request.
#[derive(Clone, Copy, Debug)]
pub struct Burst {
    pub origin: Vec2,
    /// `None` keeps the "always randomized unless overridden" contract.
    pub style: Option<BurstStyle>,
}

impl TriggerEvent {
    /// Validate into a burst. Malformed positions drop the event silently
    /// (logged, no burst, no crash). Unknown style names fall back to the
    /// default style rather than failing.
    pub fn validate(self) -> Option<Burst> {
        let (x, y) = match self.pos {
            Some(pos) => pos,
            None => {
                warn!("trigger without position, burst skipped");
                return None;
            }
        };
        if !x.is_finite() || !y.is_finite() {
            warn!(x, y, "non-finite trigger position, burst skipped");
            return None;
        }
        let style = self.style_hint.as_deref().map(|name| {
            let style = BurstStyle::from_name(name);
            debug!(hint = name, resolved = style.name(), "style hint resolved");
            style
        });
        Some(Burst {
            origin: Vec2::new(x, y),
            style,
        })
    }
}

/// Sender half handed to detection threads. Firing also wakes the render
/// loop, which otherwise sleeps while the clock is idle.
#[derive(Clone)]
pub struct TriggerHandle {
    tx: Sender<TriggerEvent>,
    ctx: egui::Context,
}

impl TriggerHandle {
    pub fn fire(&self, event: TriggerEvent) {
        if self.tx.send(event).is_ok() {
            self.ctx.request_repaint();
        }
    }
}

/// Build the trigger channel for one overlay context.
pub fn channel(ctx: egui::Context) -> (TriggerHandle, Receiver<TriggerEvent>) {
    let (tx, rx) = unbounded();
    (TriggerHandle { tx, ctx }, rx)
}
