//! Quirk toggles and frame pacing.
//!
//! The defaults follow the modern conventions: logic opcodes reset `VF`, the
//! shifts read `VY` and the register dump/load moves `I` forward by `X`.
use crate::definitions::frame;

/// The register the `8XY6` and `8XYE` shifts read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSource {
    /// `VX = VY >> 1`
    Vy,
    /// `VX = VX >> 1`, `VY` is ignored
    Vx,
}

/// How `FX55` and `FX65` leave the index register behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexIncrement {
    /// `I += X`
    X,
    /// `I += X + 1`, as on the COSMAC VIP
    XPlusOne,
    /// `I` is left unmodified
    Unchanged,
}

impl IndexIncrement {
    /// The amount `I` moves after touching `V0..=VX`.
    pub fn offset(self, x: usize) -> usize {
        match self {
            IndexIncrement::X => x,
            IndexIncrement::XPlusOne => x + 1,
            IndexIncrement::Unchanged => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY1`, `8XY2` and `8XY3` set `VF` to `0`
    pub vf_reset: bool,
    pub shift_source: ShiftSource,
    pub index_increment: IndexIncrement,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            vf_reset: true,
            shift_source: ShiftSource::Vy,
            index_increment: IndexIncrement::X,
        }
    }
}

impl Quirks {
    /// The behavior of the original COSMAC VIP interpreter.
    pub fn cosmac() -> Self {
        Self {
            vf_reset: true,
            shift_source: ShiftSource::Vy,
            index_increment: IndexIncrement::XPlusOne,
        }
    }

    /// The behavior of the SUPER-CHIP 1.1 interpreter.
    pub fn schip() -> Self {
        Self {
            vf_reset: false,
            shift_source: ShiftSource::Vx,
            index_increment: IndexIncrement::Unchanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub quirks: Quirks,
    /// Instructions executed per 60Hz frame
    pub instructions_per_frame: usize,
    /// End the frame right before a second sprite draw
    pub display_wait: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quirks: Quirks::default(),
            instructions_per_frame: frame::INSTRUCTIONS,
            display_wait: false,
        }
    }
}

impl Config {
    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    pub fn with_instructions_per_frame(mut self, instructions: usize) -> Self {
        self.instructions_per_frame = instructions;
        self
    }

    pub fn with_display_wait(mut self, display_wait: bool) -> Self {
        self.display_wait = display_wait;
        self
    }

    /// The instruction rate in hertz this configuration runs at.
    pub fn hertz(&self) -> usize {
        self.instructions_per_frame * crate::definitions::timer::HERTZ as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_modern() {
        let config = Config::default();
        assert_eq!(config.quirks.shift_source, ShiftSource::Vy);
        assert_eq!(config.quirks.index_increment, IndexIncrement::X);
        assert!(config.quirks.vf_reset);
        assert!(!config.display_wait);
        assert_eq!(config.hertz(), 600);
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .with_quirks(Quirks::schip())
            .with_instructions_per_frame(8)
            .with_display_wait(true);

        assert_eq!(config.quirks, Quirks::schip());
        assert_eq!(config.instructions_per_frame, 8);
        assert!(config.display_wait);
        assert_eq!(config.hertz(), 480);
    }

    #[test]
    fn test_profiles() {
        assert_eq!(Quirks::cosmac().index_increment, IndexIncrement::XPlusOne);

        let schip = Quirks::schip();
        assert!(!schip.vf_reset);
        assert_eq!(schip.shift_source, ShiftSource::Vx);
        assert_eq!(schip.index_increment, IndexIncrement::Unchanged);
    }

    #[test]
    fn test_index_offset() {
        assert_eq!(IndexIncrement::X.offset(5), 5);
        assert_eq!(IndexIncrement::XPlusOne.offset(5), 6);
        assert_eq!(IndexIncrement::Unchanged.offset(5), 0);
    }
}
