//! Per-frame state and its update law.

/// Clock increment applied on every rendered frame.
pub const TIME_STEP: f64 = 0.05;

/// `rotation.x = time / ROTATION_X_DIVISOR`
pub const ROTATION_X_DIVISOR: f64 = 2000.0;

/// `rotation.y = time / ROTATION_Y_DIVISOR`
pub const ROTATION_Y_DIVISOR: f64 = 1000.0;

/// Pixel size of the host container's layout box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `width / height`; not guarded against a zero height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Mesh rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Animation clock snapshot.
///
/// Rotation is never stored; it is always derived from `time`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameState {
    time: f64,
    frame_index: u64,
}

impl FrameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of frames advanced so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Returns the next snapshot. No wraparound.
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            time: self.time + TIME_STEP,
            frame_index: self.frame_index + 1,
        }
    }

    pub fn rotation(&self) -> Rotation {
        Rotation {
            x: self.time / ROTATION_X_DIVISOR,
            y: self.time / ROTATION_Y_DIVISOR,
            z: 0.0,
        }
    }
}
