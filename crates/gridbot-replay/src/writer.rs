//! Replay recording writer.
//!
//! [`ReplayWriter`] streams frames to any `Write` sink, encoding the
//! binary replay format. The header is written immediately on construction.

use std::io::Write;

use gridbot_core::{SimulationState, StatusKind};

use crate::codec::{encode_frame, encode_header};
use crate::error::ReplayError;
use crate::hash::state_hash;
use crate::types::{BuildMetadata, Frame, FrameOp, InitDescriptor};

/// Writes replay data to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`. Sequence numbers start at 1 and
/// increase by one per frame.
///
/// # Examples
///
/// ```
/// use gridbot_core::{SimulationState, StatusKind};
/// use gridbot_replay::{BuildMetadata, FrameOp, InitDescriptor, ReplayReader, ReplayWriter};
///
/// let meta = BuildMetadata::current();
/// let init = InitDescriptor { grid_size: 5, config_hash: 0 };
///
/// let mut buf = Vec::new();
/// let mut writer = ReplayWriter::new(&mut buf, &meta, &init).unwrap();
/// let state = SimulationState::default();
/// writer.write_command("MOVE", StatusKind::NotPlaced, &state).unwrap();
/// writer.write_reset(&state).unwrap();
/// assert_eq!(writer.frames_written(), 2);
/// drop(writer);
///
/// let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
/// let first = reader.next_frame().unwrap().unwrap();
/// assert_eq!(first.seq, 1);
/// assert!(matches!(first.op, FrameOp::Command { .. }));
/// assert_eq!(reader.next_frame().unwrap().unwrap().op, FrameOp::Reset);
/// assert!(reader.next_frame().unwrap().is_none());
/// ```
pub struct ReplayWriter<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> ReplayWriter<W> {
    /// Create a new replay writer, immediately writing the header.
    pub fn new(
        mut writer: W,
        metadata: &BuildMetadata,
        init: &InitDescriptor,
    ) -> Result<Self, ReplayError> {
        encode_header(&mut writer, metadata, init)?;
        Ok(Self {
            writer,
            frames_written: 0,
        })
    }

    /// Record one applied command line and the state it produced.
    pub fn write_command(
        &mut self,
        raw: &str,
        status: StatusKind,
        state: &SimulationState,
    ) -> Result<(), ReplayError> {
        let op = FrameOp::Command {
            raw: raw.to_string(),
            status,
        };
        self.write_op(op, state)
    }

    /// Record a reset and the cleared state.
    pub fn write_reset(&mut self, state: &SimulationState) -> Result<(), ReplayError> {
        self.write_op(FrameOp::Reset, state)
    }

    fn write_op(&mut self, op: FrameOp, state: &SimulationState) -> Result<(), ReplayError> {
        let frame = Frame {
            seq: self.frames_written + 1,
            op,
            state_hash: state_hash(state),
        };
        self.write_raw_frame(&frame)
    }

    /// Write a pre-built frame directly (useful for testing).
    pub fn write_raw_frame(&mut self, frame: &Frame) -> Result<(), ReplayError> {
        encode_frame(&mut self.writer, frame)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
