//! Printf-style formatting that reports every substituted field.
//!
//! A template is ordinary printf syntax plus named capture fields:
//!
//! ```
//! use fieldfmt::{sprintf, values, Collector};
//!
//! let mut seen = Collector::new();
//! let args = values!["ada", 12.5];
//! let out = sprintf(&mut seen, "user %{name} took %{ms:.1f}ms", &args);
//!
//! assert_eq!(out.text, "user ada took 12.5ms");
//! assert_eq!(seen.named().count(), 2);
//! ```
//!
//! Every directive, named or not, consumes the next positional argument.
//! The callback sees `(field, index, value)` for each one, so a log line
//! and its structured fields come out of the same call. Malformed
//! directives never abort: they render as inline markers such as
//! `%!(NOVERB)` and scanning carries on.
//!
//! The template syntax lives in [`fieldfmt_syntax`]; this crate adds the
//! argument cursor, the [`Render`] seam with its standard implementation,
//! the output [`Printer`], and the [`Interpreter`] that ties them together.

pub mod args;
pub mod callback;
pub mod interp;
pub mod printer;
pub mod render;
pub mod value;

use std::io;
use std::sync::Once;

pub use args::ArgState;
pub use callback::{Collector, NoCallback, Record, ValueCallback};
pub use fieldfmt_syntax::{
    parse, DirectiveError, Flags, FormatToken, ParseConfig, ParseEvent, Parser, VerbSet,
};
pub use interp::{InterpretConfig, InterpretError, Interpreter};
pub use printer::{FmtSink, IoSink, PrintError, Printer, Sink};
pub use render::{Render, StdRenderer};
pub use value::{Argument, ErrorValue, Value};

/// Result of [`sprintf`].
#[derive(Clone, Debug, PartialEq)]
pub struct Formatted<'v> {
    /// The rendered text.
    pub text: String,
    /// Arguments no directive consumed.
    pub rest: &'v [Value],
}

/// Format into a new string with the standard renderer.
pub fn sprintf<'v, C>(callback: &mut C, template: &str, args: &'v [Value]) -> Formatted<'v>
where
    C: ValueCallback<Value> + ?Sized,
{
    let mut printer = Printer::new(String::new());
    let result = Interpreter::new(StdRenderer).interpret(template, args, callback, &mut printer);
    // A String sink only fails on invalid UTF-8, and the interpreter writes
    // str data only.
    let rest = match result {
        Ok(rest) => rest,
        Err(err) => err.rest,
    };
    Formatted {
        text: printer.into_inner(),
        rest,
    }
}

/// Format into `writer` with the standard renderer.
///
/// Returns the unused arguments, or the first write error together with the
/// unused arguments. Callbacks run to completion even when the writer fails.
pub fn fprintf<'v, W, C>(
    writer: W,
    callback: &mut C,
    template: &str,
    args: &'v [Value],
) -> Result<&'v [Value], InterpretError<'v, Value>>
where
    W: io::Write,
    C: ValueCallback<Value> + ?Sized,
{
    let mut printer = Printer::new(IoSink(writer));
    Interpreter::new(StdRenderer).interpret(template, args, callback, &mut printer)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only runs once per process.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
