use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of segments a level control is divided into.
pub const MAX_LEVEL: u8 = 8;

/// Unique identifier for a skill block.
///
/// The editor refers to blocks (selection, drag target, focus) only through
/// their id, so removing a block can never leave a dangling reference behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(uuid::Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The short form is plenty for log lines
        let s = self.0.simple().to_string();
        write!(f, "{}", &s[..8])
    }
}

/// Discrete proficiency in `0..=MAX_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(0);
    pub const MAX: Level = Level(MAX_LEVEL);

    /// Creates a level, clamping anything above the maximum.
    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_LEVEL))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Portion of the control that is filled, in `0.0..=1.0`.
    pub fn fill_fraction(self) -> f32 {
        self.0 as f32 / MAX_LEVEL as f32
    }

    /// Maps a horizontal pointer offset inside a level control to a level.
    ///
    /// The control is split into `MAX_LEVEL` equal segments and the offset's
    /// segment index is rounded half away from zero, so an offset of exactly
    /// 3.5 segments gives level 4. Offsets outside the control clamp to the
    /// ends. A degenerate control (zero, negative or non-finite width) or a
    /// NaN offset yields the minimum level.
    pub fn from_pointer(offset_x: f32, control_width: f32) -> Self {
        if !control_width.is_finite() || control_width <= 0.0 || offset_x.is_nan() {
            return Self::MIN;
        }
        let segment_width = control_width / MAX_LEVEL as f32;
        let segments = (offset_x / segment_width).round();
        Self(segments.clamp(0.0, MAX_LEVEL as f32) as u8)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_LEVEL)
    }
}

/// One entry of the skills list.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillBlock {
    id: BlockId,
    pub name: String,
    pub level: Level,
}

impl SkillBlock {
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self {
            id: BlockId::new(),
            name: name.into(),
            level,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    /// True when the name holds nothing but whitespace.
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}
