//! # maillog-sessions
//!
//! Reassembles mail sessions from an interleaved, line-oriented log.
//!
//! Each line looks like `<timestamp> <session_id> <key>=<value>`. Lines of
//! one session are scattered through the stream; the [`SessionAssembler`]
//! collects them by session id and [`SessionAssembler::full_sessions`]
//! yields only the sessions with every field present.
//!
//! ## Key Types
//!
//! - [`decode_line`] - Split one raw line into a [`LogLine`]
//! - [`SessionAssembler`] - Stateful session accumulator
//! - [`SessionRecord`] - One session, serializable in output shape
//! - [`DurationMode`] - Elapsed time or legacy wall-clock arithmetic
//!
//! ## Usage
//!
//! ```rust,ignore
//! use maillog_sessions::{assemble_file, DurationMode};
//!
//! let assembler = assemble_file(Path::new("mail.log"), DurationMode::Elapsed)?;
//! for session in assembler.full_sessions() {
//!     println!("{} took {}", session.session_id, session.time.duration);
//! }
//! ```

pub mod assembler;
pub mod decoder;
pub mod duration;
pub mod error;
pub mod parser;
pub mod types;

pub use assembler::SessionAssembler;
pub use decoder::decode_line;
pub use duration::{compute_duration, parse_timestamp, DurationMode, TIMESTAMP_FORMAT};
pub use error::{AssembleError, DecodeError, DurationError};
pub use parser::{assemble, assemble_file};
pub use types::{Address, FieldKind, LogLine, SessionRecord, SessionTime};
