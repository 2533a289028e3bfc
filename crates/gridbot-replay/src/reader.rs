//! Replay playback reader.
//!
//! [`ReplayReader`] reads frames from any `Read` source, decoding the
//! binary replay format. The header is validated on construction.

use std::io::Read;

use crate::codec::{decode_frame, decode_header};
use crate::error::ReplayError;
use crate::types::{BuildMetadata, Frame, InitDescriptor};

/// Reads replay data from a byte stream.
///
/// Generic over `R: Read` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
pub struct ReplayReader<R: Read> {
    reader: R,
    metadata: BuildMetadata,
    init: InitDescriptor,
    frames_read: u64,
}

impl<R: Read> ReplayReader<R> {
    /// Open a replay stream, reading and validating the header.
    pub fn open(mut reader: R) -> Result<Self, ReplayError> {
        let (metadata, init) = decode_header(&mut reader)?;
        Ok(Self {
            reader,
            metadata,
            init,
            frames_read: 0,
        })
    }

    /// Build metadata from the replay header.
    pub fn metadata(&self) -> &BuildMetadata {
        &self.metadata
    }

    /// Session parameters from the replay header.
    pub fn init_descriptor(&self) -> &InitDescriptor {
        &self.init
    }

    /// Read the next frame, or `None` if the stream is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, ReplayError> {
        let frame = decode_frame(&mut self.reader)?;
        if frame.is_some() {
            self.frames_read += 1;
        }
        Ok(frame)
    }

    /// Number of frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Convert into a frame iterator.
    pub fn frames(self) -> FrameIter<R> {
        FrameIter {
            reader: self.reader,
            done: false,
        }
    }
}

/// Iterator adapter over replay frames.
///
/// Yields at most one error, then stops.
pub struct FrameIter<R: Read> {
    reader: R,
    done: bool,
}

impl<R: Read> Iterator for FrameIter<R> {
    type Item = Result<Frame, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode_frame(&mut self.reader) {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::state_hash;
    use crate::types::FrameOp;
    use crate::writer::ReplayWriter;
    use gridbot_core::{Facing, StatusKind};
    use gridbot_test_utils::StateBuilder;

    fn test_metadata() -> BuildMetadata {
        BuildMetadata {
            rust_version: "test".into(),
            target_triple: "test".into(),
            gridbot_version: "0.1.0".into(),
            compile_flags: "test".into(),
        }
    }

    fn test_init() -> InitDescriptor {
        InitDescriptor {
            grid_size: 5,
            config_hash: 123,
        }
    }

    fn record(lines: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut writer = ReplayWriter::new(&mut buf, &test_metadata(), &test_init()).unwrap();
        let state = StateBuilder::new().robot(1, 1, Facing::North).build();
        for line in lines {
            writer.write_command(line, StatusKind::Ok, &state).unwrap();
        }
        assert_eq!(writer.frames_written(), lines.len() as u64);
        buf
    }

    #[test]
    fn frames_read_back_in_order() {
        let buf = record(&["LEFT", "RIGHT", "REPORT"]);
        let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
        assert_eq!(reader.metadata(), &test_metadata());
        assert_eq!(reader.init_descriptor(), &test_init());

        for (seq, line) in (1u64..).zip(["LEFT", "RIGHT", "REPORT"]) {
            let frame = reader.next_frame().unwrap().unwrap();
            assert_eq!(frame.seq, seq);
            assert_eq!(
                frame.op,
                FrameOp::Command {
                    raw: line.to_string(),
                    status: StatusKind::Ok,
                }
            );
        }
        assert!(reader.next_frame().unwrap().is_none());
        assert_eq!(reader.frames_read(), 3);
    }

    #[test]
    fn recorded_hash_matches_state() {
        let state = StateBuilder::new().wall(2, 2).build();
        let mut buf = Vec::new();
        {
            let mut writer = ReplayWriter::new(&mut buf, &test_metadata(), &test_init()).unwrap();
            writer.write_reset(&state).unwrap();
        }
        let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
        let frame = reader.next_frame().unwrap().unwrap();
        assert_eq!(frame.state_hash, state_hash(&state));
    }

    #[test]
    fn frame_iterator_works() {
        let buf = record(&["MOVE", "MOVE"]);
        let reader = ReplayReader::open(buf.as_slice()).unwrap();
        let frames: Vec<_> = reader.frames().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].seq, 2);
    }

    #[test]
    fn frame_iterator_stops_after_error() {
        let mut buf = record(&["MOVE", "MOVE"]);
        buf.truncate(buf.len() - 4);
        let reader = ReplayReader::open(buf.as_slice()).unwrap();
        let results: Vec<_> = reader.frames().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn truncated_stream_errors() {
        let mut buf = record(&["MOVE"]);
        buf.truncate(buf.len() - 4);
        let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
        assert!(reader.next_frame().is_err());
    }

    #[test]
    fn bad_magic_on_open() {
        let data = b"XBOT\x01rest of data";
        let result = ReplayReader::open(data.as_slice());
        assert!(matches!(result, Err(ReplayError::InvalidMagic)));
    }
}
