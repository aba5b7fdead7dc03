//! Value callbacks.
//!
//! A [`ValueCallback`] observes every argument the interpreter renders, in
//! template order, as `(field, index, value)`. Unnamed directives report an
//! empty field. It is an observer only: it cannot change the output.
//!
//! Any `FnMut(&str, usize, &V)` closure is a callback. [`NoCallback`]
//! ignores everything and [`Collector`] records owned copies.

use fieldfmt_syntax::{DirectiveError, FormatToken};

/// Observer of rendered arguments.
pub trait ValueCallback<V: ?Sized> {
    /// Called once per rendered argument, and once per error-like argument
    /// left unused at the end of the call.
    fn on_value(&mut self, field: &str, index: usize, value: &V);

    /// Called for each malformed directive. Ignored by default.
    fn on_error(&mut self, token: &FormatToken<'_>, error: DirectiveError) {
        let _ = (token, error);
    }
}

impl<V: ?Sized, F> ValueCallback<V> for F
where
    F: FnMut(&str, usize, &V),
{
    fn on_value(&mut self, field: &str, index: usize, value: &V) {
        self(field, index, value);
    }
}

/// A callback that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCallback;

impl<V: ?Sized> ValueCallback<V> for NoCallback {
    fn on_value(&mut self, _: &str, _: usize, _: &V) {}
}

/// One observation made by a [`Collector`].
#[derive(Clone, Debug, PartialEq)]
pub struct Record<V> {
    pub field: String,
    pub index: usize,
    pub value: V,
}

impl<V> Record<V> {
    pub fn new(field: impl Into<String>, index: usize, value: V) -> Self {
        Self {
            field: field.into(),
            index,
            value,
        }
    }
}

/// Collects every observation, and every directive error, in order.
#[derive(Clone, Debug)]
pub struct Collector<V> {
    pub records: Vec<Record<V>>,
    pub errors: Vec<DirectiveError>,
}

impl<V> Default for Collector<V> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<V> Collector<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(field, value)` pairs for named directives only.
    pub fn named(&self) -> impl Iterator<Item = (&str, &V)> {
        self.records
            .iter()
            .filter(|r| !r.field.is_empty())
            .map(|r| (r.field.as_str(), &r.value))
    }
}

impl<V: Clone> ValueCallback<V> for Collector<V> {
    fn on_value(&mut self, field: &str, index: usize, value: &V) {
        self.records.push(Record::new(field, index, value.clone()));
    }

    fn on_error(&mut self, _: &FormatToken<'_>, error: DirectiveError) {
        self.errors.push(error);
    }
}
