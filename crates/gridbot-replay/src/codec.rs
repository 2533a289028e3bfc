//! Binary encode/decode for the replay format.
//!
//! All integers are little-endian. Strings are length-prefixed with a
//! `u32` length, capped at [`MAX_STR_LEN`]. No compression, no padding, no self-describing schema.

use std::io::{Read, Write};

use gridbot_core::StatusKind;

use crate::error::ReplayError;
use crate::types::{BuildMetadata, Frame, FrameOp, InitDescriptor};
use crate::{FORMAT_VERSION, MAGIC};

/// Frame op tag: one command line.
pub const OP_COMMAND: u8 = 0;
/// Frame op tag: session reset.
pub const OP_RESET: u8 = 1;

/// Largest string payload accepted on either side of the codec.
pub const MAX_STR_LEN: usize = 64 * 1024;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ReplayError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed UTF-8 string (u32 length + bytes).
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), ReplayError> {
    check_str_len(s.len())?;
    let len = u32::try_from(s.len()).map_err(|_| ReplayError::MalformedFrame {
        detail: format!("string of {} bytes exceeds u32 length prefix", s.len()),
    })?;
    write_u32_le(w, len)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, ReplayError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, ReplayError> {
    let len = read_u32_le(r)? as usize;
    check_str_len(len)?;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| ReplayError::MalformedFrame {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

fn check_str_len(len: usize) -> Result<(), ReplayError> {
    if len > MAX_STR_LEN {
        return Err(ReplayError::MalformedFrame {
            detail: format!("string length {len} exceeds limit {MAX_STR_LEN}"),
        });
    }
    Ok(())
}

// ── Status tags ─────────────────────────────────────────────────

/// Wire tag for a status.
pub fn status_tag(status: StatusKind) -> u8 {
    match status {
        StatusKind::Ok => 0,
        StatusKind::Blocked => 1,
        StatusKind::Invalid => 2,
        StatusKind::NotPlaced => 3,
    }
}

/// Status for a wire tag.
pub fn status_from_tag(tag: u8) -> Result<StatusKind, ReplayError> {
    match tag {
        0 => Ok(StatusKind::Ok),
        1 => Ok(StatusKind::Blocked),
        2 => Ok(StatusKind::Invalid),
        3 => Ok(StatusKind::NotPlaced),
        tag => Err(ReplayError::UnknownStatusTag { tag }),
    }
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the replay file header (magic, version, build metadata, init descriptor).
pub fn encode_header(
    w: &mut dyn Write,
    meta: &BuildMetadata,
    init: &InitDescriptor,
) -> Result<(), ReplayError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    write_length_prefixed_str(w, &meta.rust_version)?;
    write_length_prefixed_str(w, &meta.target_triple)?;
    write_length_prefixed_str(w, &meta.gridbot_version)?;
    write_length_prefixed_str(w, &meta.compile_flags)?;

    write_u32_le(w, init.grid_size)?;
    write_u64_le(w, init.config_hash)?;
    Ok(())
}

/// Decode and validate the replay file header.
pub fn decode_header(r: &mut dyn Read) -> Result<(BuildMetadata, InitDescriptor), ReplayError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReplayError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: version });
    }

    let meta = BuildMetadata {
        rust_version: read_length_prefixed_str(r)?,
        target_triple: read_length_prefixed_str(r)?,
        gridbot_version: read_length_prefixed_str(r)?,
        compile_flags: read_length_prefixed_str(r)?,
    };
    let init = InitDescriptor {
        grid_size: read_u32_le(r)?,
        config_hash: read_u64_le(r)?,
    };
    Ok((meta, init))
}

// ── Frame encode/decode ─────────────────────────────────────────

/// Encode a single replay frame.
pub fn encode_frame(w: &mut dyn Write, frame: &Frame) -> Result<(), ReplayError> {
    write_u64_le(w, frame.seq)?;
    match &frame.op {
        FrameOp::Command { raw, status } => {
            write_u8(w, OP_COMMAND)?;
            write_length_prefixed_str(w, raw)?;
            write_u8(w, status_tag(*status))?;
        }
        FrameOp::Reset => write_u8(w, OP_RESET)?,
    }
    write_u64_le(w, frame.state_hash)?;
    Ok(())
}

/// Decode a single replay frame.
///
/// Returns `Ok(None)` on clean EOF (no bytes available), `Ok(Some(frame))`
/// on success, or an error on truncated/corrupt data.
pub fn decode_frame(r: &mut dyn Read) -> Result<Option<Frame>, ReplayError> {
    // Read the seq header byte-by-byte to tell clean EOF (zero bytes)
    // from truncation (1-7 bytes).
    let mut seq_buf = [0u8; 8];
    let mut filled = 0;
    while filled < 8 {
        match r.read(&mut seq_buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(ReplayError::MalformedFrame {
                    detail: format!("truncated frame header: got {filled} of 8 bytes for seq"),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReplayError::Io(e)),
        }
    }
    let seq = u64::from_le_bytes(seq_buf);

    let op = match read_u8(r)? {
        OP_COMMAND => {
            let raw = read_length_prefixed_str(r)?;
            let status = status_from_tag(read_u8(r)?)?;
            FrameOp::Command { raw, status }
        }
        OP_RESET => FrameOp::Reset,
        tag => {
            return Err(ReplayError::MalformedFrame {
                detail: format!("unknown frame op tag {tag}"),
            })
        }
    };
    let state_hash = read_u64_le(r)?;

    Ok(Some(Frame {
        seq,
        op,
        state_hash,
    }))
}
