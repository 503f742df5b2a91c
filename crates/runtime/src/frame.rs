use foundation::time::Time;

/// Largest step a single frame may report. Hosts pause callbacks for hidden
/// tabs, and the first frame after resuming must not jump.
pub const MAX_FRAME_DT_S: f64 = 0.1;

/// Frame metadata.
///
/// Frames are produced from host timestamps with [`Frame::advance`], or with a
/// fixed step through [`Frame::new`] so runs can be recorded and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time since the previous frame (seconds).
    pub dt_s: f64,
    /// Host time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    /// First frame of a run, observed at host time `time`.
    pub fn first(time: Time) -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            time,
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }

    /// The frame that follows `self` when the host reports time `now`.
    pub fn advance(self, now: Time) -> Self {
        Self {
            index: self.index + 1,
            dt_s: now.since(self.time).min(MAX_FRAME_DT_S),
            time: now,
        }
    }
}
