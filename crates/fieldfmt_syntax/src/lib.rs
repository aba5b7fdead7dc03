//! Template syntax for fieldfmt.
//!
//! Parses printf-style templates extended with named capture fields
//! (`%{name}`, `%{name:5.2f}`) into a stream of [`ParseEvent`]s. The parser
//! is a single-pass state machine: it never looks at argument values and
//! never aborts. A malformed directive becomes one [`ParseEvent::Error`]
//! and scanning resumes right after it.
//!
//! ```text
//! "user %{name} took %.2f ms"
//!   -> Text("user ")
//!   -> Token { verb: 'v', field: "name", flags: NAMED }
//!   -> Text(" took ")
//!   -> Token { verb: 'f', precision: 2, flags: HAS_PRECISION }
//!   -> Text(" ms")
//! ```
//!
//! This crate has no dependency on the interpreter so external tools
//! (template linters, editors) can use it on its own.

mod cursor;
mod error;
mod parser;
mod token;
mod verbs;

pub use cursor::Cursor;
pub use error::DirectiveError;
pub use parser::{parse, ParseConfig, ParseEvent, Parser};
pub use token::{Flags, FormatToken, MAX_WIDTH};
pub use verbs::VerbSet;
