//! Directive errors.
//!
//! None of these abort a call. Each one is caught at the directive that
//! caused it, replaced by an inline marker in the output, and scanning
//! resumes with the next character.

use std::fmt::Write;

use thiserror::Error;

/// Why a single directive could not be resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum DirectiveError {
    /// No verb before end of input (or before the closing `}`).
    #[error("no verb")]
    NoVerb,
    /// Verb is not supported by the active renderer.
    #[error("invalid verb")]
    InvalidVerb,
    /// `%{` was never closed.
    #[error("missing '}}'")]
    CloseMissing,
    /// `%{}` or `%{:verb}` while field names are required.
    #[error("field name missing")]
    NoFieldName,
    /// The directive asked for an argument past the end of the list.
    #[error("missing arg")]
    MissingArg,
}

impl DirectiveError {
    /// Append the inline marker for this error.
    ///
    /// `verb` is the directive's verb; it is part of the marker only for
    /// errors that have one (`%!a(INVALID)`, `%!d(MISSING)`).
    pub fn write_marker(self, verb: char, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match self {
            Self::NoVerb => out.write_str("%!(NOVERB)"),
            Self::InvalidVerb => write!(out, "%!{verb}(INVALID)"),
            Self::CloseMissing => out.write_str("%!(NOCLOSE)"),
            Self::NoFieldName => out.write_str("%!(NONAME)"),
            Self::MissingArg => write!(out, "%!{verb}(MISSING)"),
        };
    }

    /// The inline marker as an owned string.
    pub fn marker(self, verb: char) -> String {
        let mut out = String::new();
        self.write_marker(verb, &mut out);
        out
    }
}
