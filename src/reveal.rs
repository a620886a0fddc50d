//! The logo-reveal widget: configuration, geometry, compositing and the
//! animation that sweeps the reveal band across the logo.

pub mod animation;
pub mod bitmaps;
pub mod compositor;
pub mod geometry;
mod widget;

use std::time::Duration;

use iced::Color;
use image::RgbaImage;

pub use widget::{LogoReveal, RevealFrame};

/// Edge the reveal sweeps from, and the shape it takes over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDirection {
    /// Reveal grows from the bottom edge upward.
    Bottom,
    /// Reveal grows from the top edge downward.
    Top,
    /// The revealed band starts covering the whole logo and its top edge
    /// sweeps down until nothing is left.
    Cover,
}

impl StartDirection {
    /// Resolve a raw attribute code (0 = bottom, 1 = top, 2 = cover).
    pub fn from_code(code: i32) -> Result<Self, RevealError> {
        match code {
            0 => Ok(Self::Bottom),
            1 => Ok(Self::Top),
            2 => Ok(Self::Cover),
            other => Err(RevealError::Direction(other)),
        }
    }

    /// Short display name for UI labels.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bottom => "Bottom",
            Self::Top => "Top",
            Self::Cover => "Cover",
        }
    }
}

/// What happens when an animation cycle completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    /// Alternate cycles play backwards.
    Reverse,
    /// Every cycle replays from the start value.
    Restart,
}

impl RepeatMode {
    /// Resolve a raw attribute code (0 = reverse, 1 = restart).
    pub fn from_code(code: i32) -> Result<Self, RevealError> {
        match code {
            0 => Ok(Self::Reverse),
            1 => Ok(Self::Restart),
            other => Err(RevealError::RepeatMode(other)),
        }
    }
}

/// How many extra cycles run after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    /// Loop forever.
    Infinite,
    /// Run `1 + n` cycles in total; `Times(0)` plays the animation once.
    Times(u32),
}

impl RepeatCount {
    /// Resolve a raw attribute count; any negative value means infinite.
    pub fn from_code(code: i32) -> Self {
        if code < 0 {
            Self::Infinite
        } else {
            Self::Times(code as u32)
        }
    }
}

/// Resolved widget configuration. Immutable once the widget is built.
#[derive(Clone)]
pub struct RevealConfig {
    /// Length of one animation cycle.
    pub duration: Duration,
    /// The logo to reveal. Drives the mask shape, so it is required.
    pub logo: RgbaImage,
    /// Canvas fill behind the logo layer.
    pub background: Color,
    pub direction: StartDirection,
    pub repeat: RepeatCount,
    pub repeat_mode: RepeatMode,
    /// When set, a reveal cursor of exactly 0.0 is treated as unset and the
    /// next paint snaps the reveal back to its starting edge. Off by
    /// default; only useful to match renderers that detect the first paint
    /// by comparing the cursor against zero.
    pub snap_zero_cursor: bool,
}

impl RevealConfig {
    /// Configuration with the default attribute values: a two second cycle,
    /// white background, bottom-up reveal, looping forever with restart.
    pub fn new(logo: RgbaImage) -> Self {
        Self {
            duration: Duration::from_millis(2000),
            logo,
            background: Color::WHITE,
            direction: StartDirection::Bottom,
            repeat: RepeatCount::Infinite,
            repeat_mode: RepeatMode::Restart,
            snap_zero_cursor: false,
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn direction(mut self, direction: StartDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn repeat(mut self, repeat: RepeatCount) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn repeat_mode(mut self, repeat_mode: RepeatMode) -> Self {
        self.repeat_mode = repeat_mode;
        self
    }

    pub fn snap_zero_cursor(mut self, snap: bool) -> Self {
        self.snap_zero_cursor = snap;
        self
    }
}

impl std::fmt::Debug for RevealConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealConfig")
            .field("duration", &self.duration)
            .field("logo", &self.logo.dimensions())
            .field("background", &self.background)
            .field("direction", &self.direction)
            .field("repeat", &self.repeat)
            .field("repeat_mode", &self.repeat_mode)
            .field("snap_zero_cursor", &self.snap_zero_cursor)
            .finish()
    }
}

/// Fatal construction errors. None of these is recoverable: a widget
/// without a valid logo has no mask shape to animate.
#[derive(Debug, Clone)]
pub enum RevealError {
    Io(String),
    Parse(String),
    /// No logo image was supplied.
    MissingImage,
    /// The logo image could not be decoded.
    Image(String),
    /// The decoded logo has zero width or height.
    EmptyImage,
    /// Unrecognized start-direction code.
    Direction(i32),
    /// Unrecognized repeat-mode code. The raw attribute default (2) lands
    /// here on purpose; see DESIGN.md.
    RepeatMode(i32),
    /// The animation duration must be positive.
    ZeroDuration,
}

impl std::fmt::Display for RevealError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevealError::Io(e) => write!(f, "IO error: {}", e),
            RevealError::Parse(e) => write!(f, "Parse error: {}", e),
            RevealError::MissingImage => write!(f, "no logo image was supplied"),
            RevealError::Image(e) => write!(f, "logo image could not be decoded: {}", e),
            RevealError::EmptyImage => write!(f, "logo image has zero width or height"),
            RevealError::Direction(code) => {
                write!(f, "unrecognized start-direction code: {}", code)
            }
            RevealError::RepeatMode(code) => {
                write!(f, "unrecognized repeat-mode code: {}", code)
            }
            RevealError::ZeroDuration => write!(f, "animation duration must be positive"),
        }
    }
}

impl std::error::Error for RevealError {}
