use serde::{Deserialize, Serialize};

use crate::camera::{CameraConfig, CameraState};

/// Pointer, touch and wheel input in CSS pixels.
///
/// Touch events carry the number of touches active on the surface; only
/// single-finger gestures rotate the globe.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    TouchStart { touches: usize, x: f64, y: f64 },
    TouchMove { touches: usize, x: f64, y: f64 },
    TouchEnd,
    Wheel { delta_y: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Radians per pixel of drag.
    pub drag_sensitivity: f64,
    /// Zoom units per wheel delta unit.
    pub zoom_sensitivity: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.004,
            zoom_sensitivity: 0.5,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { last: [f64; 2] },
}

/// `clamp(target + delta_y * sensitivity, min, max)`. Non-finite deltas leave the target unchanged.
pub fn apply_zoom_delta(target: f64, delta_y: f64, sensitivity: f64, min: f64, max: f64) -> f64 {
    if !delta_y.is_finite() {
        return target.clamp(min, max);
    }
    (target + delta_y * sensitivity).clamp(min, max)
}

/// Drag state machine. Zoom is handled alongside but never depends on the drag state.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: DragState,
    config: InteractionConfig,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: DragState::Idle,
            config,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Force the idle state, e.g. on teardown mid-drag.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    fn press(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.state = DragState::Dragging { last: [x, y] };
        }
    }

    fn drag_to(&mut self, x: f64, y: f64, camera: &mut CameraState, max_tilt: f64) -> bool {
        let DragState::Dragging { last } = self.state else {
            return false;
        };
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let s = self.config.drag_sensitivity;
        camera.rotate_by((x - last[0]) * s, (y - last[1]) * s, max_tilt);
        self.state = DragState::Dragging { last: [x, y] };
        true
    }

    /// Apply one input event to the camera. Returns whether the camera changed.
    pub fn handle(&mut self, event: InputEvent, camera: &mut CameraState, config: &CameraConfig) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.press(x, y);
                false
            }
            InputEvent::TouchStart { touches: 1, x, y } => {
                self.press(x, y);
                false
            }
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { touches: 1, x, y } => {
                self.drag_to(x, y, camera, config.max_tilt)
            }
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                self.cancel();
                false
            }
            InputEvent::TouchStart { .. } | InputEvent::TouchMove { .. } => false,
            InputEvent::Wheel { delta_y } => {
                let before = camera.target_zoom;
                camera.target_zoom = apply_zoom_delta(
                    camera.target_zoom,
                    delta_y,
                    self.config.zoom_sensitivity,
                    config.min_zoom,
                    config.max_zoom,
                );
                camera.target_zoom != before
            }
        }
    }
}
