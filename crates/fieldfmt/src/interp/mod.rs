//! The interpreter.
//!
//! One call walks the parse events of a template exactly once:
//!
//! - literal text is written verbatim;
//! - a token takes the next argument, renders it, and reports
//!   `(field, index, value)` to the callback. With no argument left it
//!   renders `%!<verb>(MISSING)` and reports nothing;
//! - a malformed directive renders its marker, consumes the next argument
//!   (if any) as `(type=value)`, and reports both the error and the value.
//!   An unclosed or empty field name reports the value with an empty field.
//!
//! Arguments left over are returned to the caller. Error-like leftovers are
//! also reported, with an empty field name.
//!
//! Once the sink fails, rendering and writing stop but parsing and callbacks
//! run to the end, so observations never depend on sink health. The unused
//! arguments travel with the failure in [`InterpretError`].

use std::fmt;

use fieldfmt_syntax::{DirectiveError, FormatToken, ParseConfig, ParseEvent, Parser};
use thiserror::Error;
use tracing::{debug, trace};

use crate::args::ArgState;
use crate::callback::ValueCallback;
use crate::printer::{PrintError, Printer, Sink};
use crate::render::Render;
use crate::value::Argument;

/// Interpreter settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterpretConfig {
    /// Parser settings. The verb set is always replaced by the renderer's.
    pub parse: ParseConfig,
    /// Report unnamed directives to the callback (with an empty field).
    pub report_unnamed: bool,
}

impl Default for InterpretConfig {
    fn default() -> Self {
        Self {
            parse: ParseConfig::default(),
            report_unnamed: true,
        }
    }
}

impl InterpretConfig {
    /// Report named directives only.
    pub fn named_only() -> Self {
        Self {
            report_unnamed: false,
            ..Self::default()
        }
    }

    /// Default settings with the given parser settings.
    pub fn with_parse(parse: ParseConfig) -> Self {
        Self {
            parse,
            ..Self::default()
        }
    }
}

/// A sink failure, together with the arguments no directive consumed.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{error}")]
pub struct InterpretError<'v, V: fmt::Debug> {
    /// Unused arguments, exactly as on success.
    pub rest: &'v [V],
    #[source]
    pub error: PrintError,
}

/// Drives a renderer over templates.
#[derive(Clone, Debug, Default)]
pub struct Interpreter<R> {
    renderer: R,
    config: InterpretConfig,
}

impl<R> Interpreter<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_config(renderer, InterpretConfig::default())
    }

    pub fn with_config(renderer: R, config: InterpretConfig) -> Self {
        Self { renderer, config }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &InterpretConfig {
        &self.config
    }

    /// Format `template` with `args` into `printer`.
    ///
    /// Returns the arguments no directive consumed. On a sink failure the
    /// error carries the same arguments. A failed sink does not stop
    /// callbacks.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(template_len = template.len(), args = args.len())
    )]
    pub fn interpret<'v, V, S, C>(
        &self,
        template: &str,
        args: &'v [V],
        callback: &mut C,
        printer: &mut Printer<S>,
    ) -> Result<&'v [V], InterpretError<'v, V>>
    where
        R: Render<V>,
        V: Argument + fmt::Debug,
        S: Sink,
        C: ValueCallback<V> + ?Sized,
    {
        let parse = ParseConfig {
            verbs: self.renderer.verbs(),
            ..self.config.parse
        };
        let mut args = ArgState::new(args);
        let mut scratch = String::new();

        for event in Parser::with_config(template, parse) {
            match event {
                ParseEvent::Text(text) => {
                    trace!(len = text.len(), "text");
                    if !printer.is_failed() {
                        // A failure is kept by the printer and reported below.
                        let _ = printer.write_str(text);
                    }
                }
                ParseEvent::Token(token) => {
                    trace!(verb = %token.verb, field = token.field, "directive");
                    scratch.clear();
                    self.directive(&token, &mut args, callback, printer, &mut scratch);
                }
                ParseEvent::Error { token, error } => {
                    debug!(%error, field = token.field, "malformed directive");
                    callback.on_error(&token, error);
                    scratch.clear();
                    self.malformed(&token, error, &mut args, callback, printer, &mut scratch);
                }
            }
        }

        let rest = args.rest();
        if !rest.is_empty() {
            debug!(unused = rest.len(), "arguments left over");
        }
        for (index, value) in args {
            if value.is_error() {
                callback.on_value("", index, value);
            }
        }

        match printer.error() {
            Some(err) => Err(InterpretError {
                rest,
                error: err.clone(),
            }),
            None => Ok(rest),
        }
    }

    fn directive<'v, V, S, C>(
        &self,
        token: &FormatToken<'_>,
        args: &mut ArgState<'v, V>,
        callback: &mut C,
        printer: &mut Printer<S>,
        scratch: &mut String,
    ) where
        R: Render<V>,
        S: Sink,
        C: ValueCallback<V> + ?Sized,
    {
        let Some((index, value)) = args.next() else {
            debug!(verb = %token.verb, field = token.field, "missing argument");
            if !printer.is_failed() {
                self.renderer
                    .render_error(token, DirectiveError::MissingArg, scratch);
                let _ = printer.write_str(scratch);
            }
            return;
        };
        if !printer.is_failed() {
            self.renderer.render(token, value, scratch);
            let _ = printer.write_str(scratch);
        }
        self.report(token.is_named(), token.field, index, value, callback);
    }

    fn malformed<'v, V, S, C>(
        &self,
        token: &FormatToken<'_>,
        error: DirectiveError,
        args: &mut ArgState<'v, V>,
        callback: &mut C,
        printer: &mut Printer<S>,
        scratch: &mut String,
    ) where
        R: Render<V>,
        S: Sink,
        C: ValueCallback<V> + ?Sized,
    {
        let next = args.next();
        if !printer.is_failed() {
            self.renderer.render_error(token, error, scratch);
            if let Some((_, value)) = next {
                scratch.push('(');
                self.renderer.describe(value, scratch);
                scratch.push(')');
            }
            let _ = printer.write_str(scratch);
        }
        if let Some((index, value)) = next {
            // The name of an unclosed or empty field is not a name.
            match error {
                DirectiveError::CloseMissing | DirectiveError::NoFieldName => {
                    self.report(false, "", index, value, callback);
                }
                _ => self.report(token.is_named(), token.field, index, value, callback),
            }
        }
    }

    fn report<V, C>(&self, named: bool, field: &str, index: usize, value: &V, callback: &mut C)
    where
        C: ValueCallback<V> + ?Sized,
    {
        if named || self.config.report_unnamed {
            callback.on_value(field, index, value);
        }
    }
}
