//! Press/release events handed to the host input layer.

/// Rotation direction of a press/release pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Cw,
    Ccw,
}

/// Event returned by the scheduler's poll.
///
/// Every step becomes a press followed, after the press-to-release delay, by
/// the release of the same direction. [`EventKind::None`] means nothing is due
/// yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    #[default]
    None,
    CwPress,
    CwRelease,
    CcwPress,
    CcwRelease,
}

impl EventKind {
    /// Press event for `direction`.
    pub const fn press(direction: Direction) -> Self {
        match direction {
            Direction::Cw => EventKind::CwPress,
            Direction::Ccw => EventKind::CcwPress,
        }
    }

    /// Release event for `direction`.
    pub const fn release(direction: Direction) -> Self {
        match direction {
            Direction::Cw => EventKind::CwRelease,
            Direction::Ccw => EventKind::CcwRelease,
        }
    }

    /// Direction of the event, `None` for [`EventKind::None`].
    pub const fn direction(self) -> Option<Direction> {
        match self {
            EventKind::CwPress | EventKind::CwRelease => Some(Direction::Cw),
            EventKind::CcwPress | EventKind::CcwRelease => Some(Direction::Ccw),
            EventKind::None => None,
        }
    }

    /// `true` when nothing was due.
    pub const fn is_none(self) -> bool {
        matches!(self, EventKind::None)
    }

    /// `true` for [`EventKind::CwPress`] and [`EventKind::CcwPress`].
    pub const fn is_press(self) -> bool {
        matches!(self, EventKind::CwPress | EventKind::CcwPress)
    }

    /// `true` for [`EventKind::CwRelease`] and [`EventKind::CcwRelease`].
    pub const fn is_release(self) -> bool {
        matches!(self, EventKind::CwRelease | EventKind::CcwRelease)
    }
}
