//! Input mode and momentary color-cycling actions.

/// What pointer samples do while the mode is active.
///
/// Modes are sticky: a sample with an unmapped finger count leaves the mode
/// as it was. Color cycling is not a mode, see [`ColorAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Pointer moves without painting
    Idle,
    /// Pointer paints in the pen color
    Draw,
    /// Pointer paints in the background color at eraser thickness
    Erase,
    /// All input ignored until unpaused
    Pause,
}

impl Default for InputMode {
    fn default() -> Self {
        Self::Idle
    }
}

impl InputMode {
    /// Mode mapped to a finger count, if the count selects one.
    ///
    /// Counts 3 and 4 are color gestures, not modes, and return `None`.
    pub fn from_finger_count(count: u8) -> Option<Self> {
        match count {
            0 => Some(Self::Erase),
            1 => Some(Self::Draw),
            2 => Some(Self::Idle),
            5 => Some(Self::Pause),
            _ => None,
        }
    }

    /// Whether pointer samples paint in this mode.
    pub fn is_painting(&self) -> bool {
        matches!(self, Self::Draw | Self::Erase)
    }

    /// Human-readable name for logs and status output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Draw => "draw",
            Self::Erase => "erase",
            Self::Pause => "pause",
        }
    }
}

/// Momentary palette-cycling action fired by a confirmed hold gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorAction {
    /// Advance to the next palette color (three fingers)
    Next,
    /// Step back to the previous palette color (four fingers)
    Prev,
}

impl ColorAction {
    /// Human-readable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Next => "next color",
            Self::Prev => "previous color",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_counts_map_to_modes() {
        assert_eq!(InputMode::from_finger_count(0), Some(InputMode::Erase));
        assert_eq!(InputMode::from_finger_count(1), Some(InputMode::Draw));
        assert_eq!(InputMode::from_finger_count(2), Some(InputMode::Idle));
        assert_eq!(InputMode::from_finger_count(5), Some(InputMode::Pause));
        assert_eq!(InputMode::from_finger_count(3), None);
        assert_eq!(InputMode::from_finger_count(4), None);
    }

    #[test]
    fn painting_modes() {
        assert!(InputMode::Draw.is_painting());
        assert!(InputMode::Erase.is_painting());
        assert!(!InputMode::Idle.is_painting());
        assert!(!InputMode::Pause.is_painting());
    }
}
