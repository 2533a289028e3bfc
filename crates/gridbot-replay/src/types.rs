//! Data types for replay recording and playback.

use gridbot_core::StatusKind;

/// Build environment metadata stored in the replay header.
///
/// # Examples
///
/// ```
/// use gridbot_replay::BuildMetadata;
///
/// let meta = BuildMetadata {
///     rust_version: "1.87".into(),
///     target_triple: "x86_64-linux".into(),
///     gridbot_version: "0.1.0".into(),
///     compile_flags: "release".into(),
/// };
///
/// assert_eq!(meta.gridbot_version, "0.1.0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildMetadata {
    /// Minimum supported Rust version declared by the recording crate's
    /// `rust-version` (e.g. `"1.87"`), or `"unknown"` when unset. This is
    /// not the version of the compiler that built it.
    pub rust_version: String,
    /// Compilation target (e.g. `"x86_64-linux"`).
    pub target_triple: String,
    /// Gridbot crate version (e.g. `"0.1.0"`).
    pub gridbot_version: String,
    /// Compilation profile (`"release"` or `"debug"`).
    pub compile_flags: String,
}

impl BuildMetadata {
    /// Metadata describing the running build.
    pub fn current() -> Self {
        Self {
            rust_version: option_env!("CARGO_PKG_RUST_VERSION")
                .unwrap_or("unknown")
                .to_string(),
            target_triple: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
            gridbot_version: env!("CARGO_PKG_VERSION").to_string(),
            compile_flags: if cfg!(debug_assertions) {
                "debug".to_string()
            } else {
                "release".to_string()
            },
        }
    }
}

/// Session parameters stored in the replay header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitDescriptor {
    /// Side length of the grid.
    pub grid_size: u32,
    /// Hash of the state-affecting session configuration.
    pub config_hash: u64,
}

/// What a frame records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameOp {
    /// One non-empty line of input.
    Command {
        /// The line as submitted, before case normalization.
        raw: String,
        /// The status it produced.
        status: StatusKind,
    },
    /// A session reset.
    Reset,
}

/// A single replay frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// 1-based position of this frame in the recording.
    pub seq: u64,
    /// The recorded operation.
    pub op: FrameOp,
    /// [`state_hash`](crate::state_hash) of the state after `op`.
    pub state_hash: u64,
}
