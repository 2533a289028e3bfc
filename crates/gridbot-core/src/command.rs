//! Parsed command and canonical verb types.

use smallvec::SmallVec;
use std::fmt;

/// Ordered argument tokens. Three inline slots cover every canonical verb.
pub type Args = SmallVec<[String; 3]>;

/// A command as produced by the parser: verb plus ordered arguments.
///
/// No semantic validation has happened yet: the verb may be unknown and
/// the arguments may be the wrong count or type. The engine decides.
///
/// # Examples
///
/// ```
/// use gridbot_core::Command;
/// use smallvec::smallvec;
///
/// let cmd = Command {
///     verb: "PLACE_WALL".into(),
///     args: smallvec!["1".into(), "2".into()],
///     raw: "PLACE_WALL 1,2".into(),
/// };
/// assert!(!cmd.is_empty());
/// assert!(Command::empty().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Command {
    /// The command keyword, exactly as typed (no case folding).
    pub verb: String,
    /// Trimmed, non-empty argument tokens in order.
    pub args: Args,
    /// The trimmed input text, echoed into the log.
    pub raw: String,
}

impl Command {
    /// The sentinel for blank input.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is the blank-input sentinel.
    pub fn is_empty(&self) -> bool {
        self.verb.is_empty()
    }
}

/// The recognised command verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `PLACE_ROBOT row,col,FACING`
    PlaceRobot,
    /// `PLACE_WALL row,col`
    PlaceWall,
    /// `MOVE`
    Move,
    /// `LEFT`
    Left,
    /// `RIGHT`
    Right,
    /// `REPORT`
    Report,
}

impl Verb {
    /// Every verb, in grammar order.
    pub const ALL: [Verb; 6] = [
        Verb::PlaceRobot,
        Verb::PlaceWall,
        Verb::Move,
        Verb::Left,
        Verb::Right,
        Verb::Report,
    ];

    /// Canonical uppercase name.
    pub fn name(self) -> &'static str {
        match self {
            Verb::PlaceRobot => "PLACE_ROBOT",
            Verb::PlaceWall => "PLACE_WALL",
            Verb::Move => "MOVE",
            Verb::Left => "LEFT",
            Verb::Right => "RIGHT",
            Verb::Report => "REPORT",
        }
    }

    /// Look up a verb by its canonical name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
