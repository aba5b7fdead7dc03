//! Template parser.
//!
//! A single-pass state machine that turns a template into [`ParseEvent`]s.
//! The parser is an [`Iterator`]: each call to `next` yields one literal
//! run, one token, or one error. Errors are terminal for the directive that
//! produced them only; the machine returns to `Text` and keeps scanning.
//!
//! # States
//!
//! ```text
//! Text ──'%'──> PercentSeen ──'{'──> NamedFieldName ──':'──> NamedFieldBody
//!                    │                     │                       │
//!                    └──> FlagsWidthPrecision                      │
//!                              │           └──'}'──> Text <────'}'─┘
//!                              └──verb──> Text
//! any state ──malformed──> Error ──> Text
//! ```
//!
//! `%%` never reaches `PercentSeen`: the text run is extended through the
//! first `%` and scanning resumes after the second.

use crate::cursor::Cursor;
use crate::error::DirectiveError;
use crate::token::{Flags, FormatToken, MAX_WIDTH};
use crate::verbs::VerbSet;

/// One unit of parser output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseEvent<'a> {
    /// Literal text, to be written verbatim.
    Text(&'a str),
    /// A well-formed directive.
    Token(FormatToken<'a>),
    /// A malformed directive, with the partial token built before the
    /// error was detected.
    Error {
        token: FormatToken<'a>,
        error: DirectiveError,
    },
}

/// Parser configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseConfig {
    /// Verbs accepted by the parser; anything else is `InvalidVerb`.
    pub verbs: VerbSet,
    /// Whether `%{}` and `%{:verb}` are errors (`NoFieldName`).
    /// When `false` they parse as named directives with an empty name.
    pub require_field_name: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            verbs: VerbSet::STANDARD,
            require_field_name: true,
        }
    }
}

impl ParseConfig {
    /// Default config accepting `verbs`.
    pub fn with_verbs(verbs: VerbSet) -> Self {
        Self {
            verbs,
            ..Default::default()
        }
    }

    /// Default config accepting empty field names.
    pub fn allow_empty_field_names() -> Self {
        Self {
            require_field_name: false,
            ..Default::default()
        }
    }
}

/// Parse `template` with the default configuration.
pub fn parse(template: &str) -> Parser<'_> {
    Parser::new(template)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Text,
    PercentSeen,
    FlagsWidthPrecision,
    NamedFieldName,
    NamedFieldBody,
    Error(DirectiveError),
}

/// Iterator over the [`ParseEvent`]s of one template.
#[derive(Clone, Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: ParseConfig,
    /// Directive event held back while the text run before it is yielded.
    pending: Option<ParseEvent<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(template: &'a str) -> Self {
        Self::with_config(template, ParseConfig::default())
    }

    pub fn with_config(template: &'a str, config: ParseConfig) -> Self {
        Self {
            cursor: Cursor::new(template),
            config,
            pending: None,
        }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Run the directive state machine from just after a `%`.
    ///
    /// Always consumes at least the characters that make up the directive
    /// and always returns to `Text`.
    fn directive(&mut self) -> ParseEvent<'a> {
        let mut tok = FormatToken::default();
        let mut state = State::PercentSeen;
        let mut event = None;

        while state != State::Text {
            state = match state {
                State::PercentSeen => {
                    if self.cursor.eat('{') {
                        tok.flags |= Flags::NAMED;
                        State::NamedFieldName
                    } else {
                        State::FlagsWidthPrecision
                    }
                }
                State::FlagsWidthPrecision => {
                    self.verb_prefix(&mut tok);
                    match self.verb(&mut tok) {
                        Ok(()) => {
                            event = Some(ParseEvent::Token(tok));
                            State::Text
                        }
                        Err(error) => State::Error(error),
                    }
                }
                State::NamedFieldName => self.field_name(&mut tok, &mut event),
                State::NamedFieldBody => self.field_body(&mut tok, &mut event),
                State::Error(error) => {
                    event = Some(ParseEvent::Error { token: tok, error });
                    State::Text
                }
                State::Text => State::Text,
            };
        }

        event.unwrap_or(ParseEvent::Error {
            token: tok,
            error: DirectiveError::NoVerb,
        })
    }

    /// Flags, width and precision, in that order. All optional.
    fn verb_prefix(&mut self, tok: &mut FormatToken<'a>) {
        loop {
            let flag = match self.cursor.current() {
                Some('+') => Flags::PLUS,
                Some('-') => Flags::MINUS,
                Some(' ') => Flags::SPACE,
                Some('#') => Flags::SHARP,
                Some('0') => Flags::ZERO,
                _ => break,
            };
            *tok = tok.with_flags(flag);
            self.cursor.advance();
        }

        if let Some(width) = self.cursor.eat_number(MAX_WIDTH) {
            *tok = tok.with_width(width);
        }

        if self.cursor.eat('.') {
            let precision = self.cursor.eat_number(MAX_WIDTH).unwrap_or(0);
            *tok = tok.with_precision(precision);
        }
    }

    /// Consume the verb character and validate it against the verb set.
    fn verb(&mut self, tok: &mut FormatToken<'a>) -> Result<(), DirectiveError> {
        let verb = self.cursor.current().ok_or(DirectiveError::NoVerb)?;
        self.cursor.advance();
        tok.verb = verb;
        if !self.config.verbs.contains(verb) {
            return Err(DirectiveError::InvalidVerb);
        }
        tok.settle_value_flags();
        Ok(())
    }

    /// `%{` seen: optional `+`/`#`, then the name up to `:` or `}`.
    fn field_name(
        &mut self,
        tok: &mut FormatToken<'a>,
        event: &mut Option<ParseEvent<'a>>,
    ) -> State {
        loop {
            match self.cursor.current() {
                Some('+') => tok.flags |= Flags::PLUS,
                Some('#') => tok.flags |= Flags::SHARP,
                _ => break,
            }
            self.cursor.advance();
        }

        let start = self.cursor.pos();
        while let Some(c) = self.cursor.current() {
            if c == ':' || c == '}' {
                break;
            }
            self.cursor.advance();
        }
        tok.field = self.cursor.slice_from(start);
        let missing_name = tok.field.is_empty() && self.config.require_field_name;

        match self.cursor.current() {
            Some('}') => {
                self.cursor.advance();
                if missing_name {
                    return State::Error(DirectiveError::NoFieldName);
                }
                tok.verb = 'v';
                tok.settle_value_flags();
                *event = Some(ParseEvent::Token(*tok));
                State::Text
            }
            Some(':') => {
                self.cursor.advance();
                if missing_name {
                    return self.close_with(DirectiveError::NoFieldName);
                }
                State::NamedFieldBody
            }
            _ => State::Error(DirectiveError::CloseMissing),
        }
    }

    /// `%{name:` seen: verb spec, then the closing `}`.
    fn field_body(
        &mut self,
        tok: &mut FormatToken<'a>,
        event: &mut Option<ParseEvent<'a>>,
    ) -> State {
        self.verb_prefix(tok);

        match self.cursor.current() {
            None => return State::Error(DirectiveError::CloseMissing),
            Some('}') => {
                self.cursor.advance();
                return State::Error(DirectiveError::NoVerb);
            }
            Some(_) => {}
        }

        let verb = self.verb(tok);
        if !self.cursor.eat('}') {
            // Trailing garbage after the verb: blame its first character,
            // unless the verb itself was already bad.
            if let (Ok(()), Some(c)) = (verb, self.cursor.current()) {
                tok.verb = c;
            }
            return self.close_with(DirectiveError::InvalidVerb);
        }
        match verb {
            Ok(()) => {
                *event = Some(ParseEvent::Token(*tok));
                State::Text
            }
            Err(error) => State::Error(error),
        }
    }

    /// Skip through the closing `}` and report `error`, or report
    /// `CloseMissing` if the block never closes.
    fn close_with(&mut self, error: DirectiveError) -> State {
        if self.cursor.skip_to(b'}') {
            self.cursor.advance();
            State::Error(error)
        } else {
            State::Error(DirectiveError::CloseMissing)
        }
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = ParseEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }
        if self.cursor.is_eof() {
            return None;
        }

        let start = self.cursor.pos();
        if !self.cursor.skip_to(b'%') {
            return Some(ParseEvent::Text(self.cursor.slice_from(start)));
        }

        if self.cursor.peek() == Some('%') {
            // `%%`: keep one `%` in the text run, drop the other.
            self.cursor.advance();
            let text = self.cursor.slice_from(start);
            self.cursor.advance();
            return Some(ParseEvent::Text(text));
        }

        let text = self.cursor.slice_from(start);
        self.cursor.advance();
        let event = self.directive();
        if text.is_empty() {
            Some(event)
        } else {
            self.pending = Some(event);
            Some(ParseEvent::Text(text))
        }
    }
}

impl std::iter::FusedIterator for Parser<'_> {}

#[cfg(test)]
mod tests;
