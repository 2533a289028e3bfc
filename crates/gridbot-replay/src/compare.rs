//! Replay verification.
//!
//! Re-feeds recorded frames through a step function and compares the
//! status and state hash at every frame, stopping at the first divergence.

use std::io::Read;
use std::time::Instant;

use gridbot_core::StatusKind;
use gridbot_engine::Session;

use crate::error::ReplayError;
use crate::hash::{config_hash, state_hash};
use crate::reader::ReplayReader;
use crate::types::FrameOp;

/// What one replayed operation produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayStep {
    /// Status of a replayed command, or `None` for a reset or a command
    /// that produced no outcome.
    pub status: Option<StatusKind>,
    /// Hash of the state after the operation.
    pub state_hash: u64,
}

/// How a replayed frame differed from the recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// The command produced a different status.
    Status {
        /// Status in the recording.
        recorded: StatusKind,
        /// Status on replay.
        replayed: Option<StatusKind>,
    },
    /// The resulting state differs.
    StateHash {
        /// Hash in the recording.
        recorded: u64,
        /// Hash on replay.
        replayed: u64,
    },
}

/// The first divergence found during replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivergenceReport {
    /// Sequence number of the diverging frame.
    pub seq: u64,
    /// What differed.
    pub kind: DivergenceKind,
}

/// Replay a recording through a caller-provided step function.
///
/// `step_fn` receives each recorded operation, performs it, and reports
/// the resulting status and state hash. A status mismatch is reported
/// before a hash mismatch.
///
/// Returns `Ok(None)` if every frame matches, or `Ok(Some(report))` at
/// the first divergence.
pub fn replay_and_compare<R: Read>(
    mut reader: ReplayReader<R>,
    step_fn: &mut dyn FnMut(&FrameOp) -> Result<ReplayStep, ReplayError>,
) -> Result<Option<DivergenceReport>, ReplayError> {
    while let Some(frame) = reader.next_frame()? {
        let step = step_fn(&frame.op)?;

        if let FrameOp::Command { status, .. } = &frame.op {
            if step.status != Some(*status) {
                return Ok(Some(DivergenceReport {
                    seq: frame.seq,
                    kind: DivergenceKind::Status {
                        recorded: *status,
                        replayed: step.status,
                    },
                }));
            }
        }

        if step.state_hash != frame.state_hash {
            return Ok(Some(DivergenceReport {
                seq: frame.seq,
                kind: DivergenceKind::StateHash {
                    recorded: frame.state_hash,
                    replayed: step.state_hash,
                },
            }));
        }
    }

    Ok(None)
}

/// Replay a recording through `session`.
///
/// `session` should be fresh. Its configuration must hash to the value in
/// the recording's header, otherwise [`ReplayError::ConfigMismatch`] is
/// returned before any frame is read.
///
/// # Examples
///
/// ```
/// use std::time::Instant;
/// use gridbot_engine::{Session, SessionConfig};
/// use gridbot_replay::{config_hash, verify_session, BuildMetadata, InitDescriptor, ReplayReader, ReplayWriter};
///
/// let config = SessionConfig::default();
/// let init = InitDescriptor { grid_size: config.grid_size, config_hash: config_hash(&config) };
///
/// let mut live = Session::new(config.clone()).unwrap();
/// let mut buf = Vec::new();
/// let mut writer = ReplayWriter::new(&mut buf, &BuildMetadata::current(), &init).unwrap();
/// for line in ["PLACE_ROBOT 1,1,NORTH", "MOVE", "REPORT"] {
///     let out = live.submit(line, Instant::now()).unwrap();
///     writer.write_command(line, out.status, live.state()).unwrap();
/// }
/// drop(writer);
///
/// let reader = ReplayReader::open(buf.as_slice()).unwrap();
/// let mut fresh = Session::new(config).unwrap();
/// assert!(verify_session(reader, &mut fresh).unwrap().is_none());
/// ```
pub fn verify_session<R: Read>(
    reader: ReplayReader<R>,
    session: &mut Session,
) -> Result<Option<DivergenceReport>, ReplayError> {
    let init = reader.init_descriptor();
    let current = config_hash(session.config());
    if init.config_hash != current || init.grid_size != session.config().grid_size {
        return Err(ReplayError::ConfigMismatch {
            recorded: init.config_hash,
            current,
        });
    }

    replay_and_compare(reader, &mut |op| {
        let now = Instant::now();
        let status = match op {
            FrameOp::Command { raw, .. } => session.submit(raw, now).map(|out| out.status),
            FrameOp::Reset => {
                session.reset(now);
                None
            }
        };
        Ok(ReplayStep {
            status,
            state_hash: state_hash(session.state()),
        })
    })
}
