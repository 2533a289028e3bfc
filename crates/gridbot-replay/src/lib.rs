//! Deterministic replay recording and verification for Gridbot sessions.
//!
//! Records every applied command (and every reset) with a hash of the
//! resulting state, then re-feeds the recording through a fresh session
//! to prove the reducer is deterministic. A recording is a verification
//! artifact; nothing resumes a session from one.
//!
//! # Architecture
//!
//! - [`ReplayWriter`] records frames to any `Write` sink
//! - [`ReplayReader`] plays back frames from any `Read` source
//! - [`replay_and_compare`] and [`verify_session`] verify determinism
//! - All I/O uses a small hand-written binary codec
//!
//! # Format
//!
//! ```text
//! [MAGIC "GBOT"] [VERSION u8] [BuildMetadata] [InitDescriptor]
//! [Frame 1] [Frame 2] ... [Frame N]
//! ```
//!
//! Each frame holds a sequence number, the operation (a raw command line
//! with its recorded status, or a reset) and an FNV-1a hash of the state
//! after it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compare;
pub mod error;
pub mod hash;
pub mod reader;
pub mod types;
pub mod writer;

pub use compare::{
    replay_and_compare, verify_session, DivergenceKind, DivergenceReport, ReplayStep,
};
pub use error::ReplayError;
pub use hash::{config_hash, state_hash};
pub use reader::{FrameIter, ReplayReader};
pub use types::{BuildMetadata, Frame, FrameOp, InitDescriptor};
pub use writer::ReplayWriter;

/// Magic bytes at the start of every replay file.
pub const MAGIC: [u8; 4] = *b"GBOT";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
