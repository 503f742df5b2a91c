use foundation::time::Time;
use gpu::{DrawStats, RenderDevice};
use runtime::{Frame, FrameHost, FrameTicket};
use serde::{Deserialize, Serialize};

use crate::marker::{Marker, RankedVisibleMarker};
use crate::state::SceneState;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Yaw added per frame while not dragging (radians).
    pub idle_rotation_speed: f64,
    /// Fraction of the remaining zoom distance covered per frame.
    pub zoom_easing: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            idle_rotation_speed: 0.002,
            zoom_easing: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub frame: Frame,
    pub markers: Vec<RankedVisibleMarker>,
    pub draw: DrawStats,
}

/// Per-frame driver. Holds at most one pending host callback.
#[derive(Debug, Default)]
pub struct AnimationLoop {
    config: AnimationConfig,
    pending: Option<FrameTicket>,
    frame: Option<Frame>,
}

impl AnimationLoop {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            pending: None,
            frame: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// Last frame produced, if any.
    pub fn frame(&self) -> Option<Frame> {
        self.frame
    }

    /// Request the first frame. Returns `false` if already running.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(host.request_frame());
        tracing::debug!("animation loop started");
        true
    }

    /// Cancel the pending callback. Returns whether one was pending.
    pub fn stop<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.pending.take() {
            Some(ticket) => {
                host.cancel_frame(ticket);
                tracing::debug!(frames = self.frame.map_or(0, |f| f.index + 1), "animation loop stopped");
                true
            }
            None => false,
        }
    }

    /// Run one frame for `ticket`.
    ///
    /// Order within a frame: idle rotation (skipped while dragging), zoom
    /// easing, marker projection, redraw, next-frame request. A ticket that is
    /// not the pending one (stale, or the loop was stopped) does nothing. A
    /// failed redraw is logged and the loop keeps going.
    #[allow(clippy::too_many_arguments)]
    pub fn tick<H: FrameHost + ?Sized>(
        &mut self,
        host: &mut H,
        ticket: FrameTicket,
        now: Time,
        scene: &mut SceneState,
        device: &mut dyn RenderDevice,
        markers: &[Marker],
        dragging: bool,
    ) -> Option<FrameOutput> {
        if self.pending != Some(ticket) {
            tracing::trace!(?ticket, "ignoring stale frame callback");
            return None;
        }
        self.pending = None;
        let frame = match self.frame {
            Some(prev) => prev.advance(now),
            None => Frame::first(now),
        };
        self.frame = Some(frame);

        if !dragging {
            scene.camera.rotation_y += self.config.idle_rotation_speed;
        }
        let camera_config = scene.config().camera;
        scene.camera.ease_zoom(self.config.zoom_easing, &camera_config);
        let overlay = scene.project(markers);
        let draw = scene.render(device).unwrap_or_else(|err| {
            tracing::warn!(%err, frame = frame.index, "frame render failed");
            DrawStats::default()
        });

        self.pending = Some(host.request_frame());
        Some(FrameOutput {
            frame,
            markers: overlay,
            draw,
        })
    }
}
