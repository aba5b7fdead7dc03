use pretty_assertions::assert_eq;

use super::*;

fn events(src: &str) -> Vec<ParseEvent<'_>> {
    parse(src).collect()
}

fn events_with(src: &str, config: ParseConfig) -> Vec<ParseEvent<'_>> {
    Parser::with_config(src, config).collect()
}

fn text(s: &str) -> ParseEvent<'_> {
    ParseEvent::Text(s)
}

fn tok(t: FormatToken<'_>) -> ParseEvent<'_> {
    ParseEvent::Token(t)
}

/// Only the error kinds, for cases where the partial token is incidental.
fn kinds(src: &str) -> Vec<Result<String, DirectiveError>> {
    parse(src)
        .map(|ev| match ev {
            ParseEvent::Text(s) => Ok(s.to_owned()),
            ParseEvent::Token(t) => Ok(format!("<{}>", t.verb)),
            ParseEvent::Error { error, .. } => Err(error),
        })
        .collect()
}

// === Literal text ===

#[test]
fn empty_template() {
    assert_eq!(events(""), vec![]);
}

#[test]
fn simple_string() {
    assert_eq!(events("simple string"), vec![text("simple string")]);
}

#[test]
fn double_percent_in_middle() {
    assert_eq!(
        events("double %% in middle"),
        vec![text("double %"), text(" in middle")]
    );
}

#[test]
fn double_percent_at_end() {
    assert_eq!(events("double %%"), vec![text("double %")]);
}

#[test]
fn double_percent_alone() {
    assert_eq!(events("%%"), vec![text("%")]);
    assert_eq!(events("%%%%"), vec![text("%"), text("%")]);
}

// === Unnamed directives ===

#[test]
fn plain_verb() {
    assert_eq!(events("%v"), vec![tok(FormatToken::new('v'))]);
}

#[test]
fn verb_after_text() {
    assert_eq!(
        events("verb %v"),
        vec![text("verb "), tok(FormatToken::new('v'))]
    );
}

#[test]
fn verb_in_middle() {
    assert_eq!(
        events("verb %v in middle"),
        vec![text("verb "), tok(FormatToken::new('v')), text(" in middle")]
    );
}

#[test]
fn plus_and_sharp_on_v_become_value_flags() {
    assert_eq!(
        events("%+v"),
        vec![tok(FormatToken::new('v').with_flags(Flags::PLUS_V))]
    );
    assert_eq!(
        events("%#v"),
        vec![tok(FormatToken::new('v').with_flags(Flags::SHARP_V))]
    );
}

#[test]
fn plus_and_sharp_on_other_verbs_stay() {
    assert_eq!(
        events("%+#x"),
        vec![tok(FormatToken::new('x').with_flags(Flags::PLUS | Flags::SHARP))]
    );
}

#[test]
fn minus_wins_over_zero() {
    let minus = tok(FormatToken::new('v').with_flags(Flags::MINUS));
    assert_eq!(events("%-v"), vec![minus]);
    assert_eq!(events("%-0v"), vec![minus]);
    assert_eq!(events("%0-v"), vec![minus]);
    assert_eq!(
        events("%0v"),
        vec![tok(FormatToken::new('v').with_flags(Flags::ZERO))]
    );
}

#[test]
fn space_flag() {
    assert_eq!(
        events("% v"),
        vec![tok(FormatToken::new('v').with_flags(Flags::SPACE))]
    );
}

#[test]
fn repeated_flags() {
    assert_eq!(
        events("%++  d"),
        vec![tok(FormatToken::new('d').with_flags(Flags::PLUS | Flags::SPACE))]
    );
}

#[test]
fn width_and_precision() {
    assert_eq!(
        events("%5d"),
        vec![tok(FormatToken::new('d').with_width(5))]
    );
    assert_eq!(
        events("%.3f"),
        vec![tok(FormatToken::new('f').with_precision(3))]
    );
    assert_eq!(
        events("%5.3f"),
        vec![tok(FormatToken::new('f').with_width(5).with_precision(3))]
    );
}

#[test]
fn empty_precision_is_zero() {
    assert_eq!(
        events("%.d"),
        vec![tok(FormatToken::new('d').with_precision(0))]
    );
}

#[test]
fn huge_width_saturates() {
    assert_eq!(
        events("%184467440737095516170v"),
        vec![tok(FormatToken::new('v').with_width(MAX_WIDTH))]
    );
}

// === Unnamed errors ===

#[test]
fn unknown_verb() {
    assert_eq!(
        kinds("unknown verb %a"),
        vec![Ok("unknown verb ".into()), Err(DirectiveError::InvalidVerb)]
    );
}

#[test]
fn unknown_verb_keeps_scanning() {
    assert_eq!(
        kinds("%a then %d"),
        vec![
            Err(DirectiveError::InvalidVerb),
            Ok(" then ".into()),
            Ok("<d>".into()),
        ]
    );
}

#[test]
fn invalid_verb_carries_the_verb() {
    assert_eq!(
        events("%-5☠"),
        vec![ParseEvent::Error {
            token: FormatToken {
                verb: '☠',
                ..FormatToken::default().with_flags(Flags::MINUS).with_width(5)
            },
            error: DirectiveError::InvalidVerb,
        }]
    );
}

#[test]
fn no_verb_at_end() {
    assert_eq!(
        events("no verb %"),
        vec![
            text("no verb "),
            ParseEvent::Error {
                token: FormatToken::default(),
                error: DirectiveError::NoVerb,
            },
        ]
    );
}

#[test]
fn digits_without_verb() {
    assert_eq!(kinds("%12"), vec![Err(DirectiveError::NoVerb)]);
    assert_eq!(kinds("%.2"), vec![Err(DirectiveError::NoVerb)]);
    assert_eq!(kinds("%-"), vec![Err(DirectiveError::NoVerb)]);
}

#[test]
fn percent_after_flags_is_invalid() {
    assert_eq!(
        kinds("%5%x"),
        vec![Err(DirectiveError::InvalidVerb), Ok("x".into())]
    );
}

// === Named directives ===

#[test]
fn named_field() {
    assert_eq!(
        events("%{field}"),
        vec![tok(FormatToken::named("field", 'v'))]
    );
}

#[test]
fn named_field_positions() {
    assert_eq!(
        events("at end %{field}"),
        vec![text("at end "), tok(FormatToken::named("field", 'v'))]
    );
    assert_eq!(
        events("%{field} at the beginning"),
        vec![tok(FormatToken::named("field", 'v')), text(" at the beginning")]
    );
    assert_eq!(
        events("field %{name} in the middle"),
        vec![
            text("field "),
            tok(FormatToken::named("name", 'v')),
            text(" in the middle"),
        ]
    );
}

#[test]
fn named_field_with_verb() {
    assert_eq!(
        events("%{field:d}"),
        vec![tok(FormatToken::named("field", 'd'))]
    );
    assert_eq!(
        events("%{field:+d}"),
        vec![tok(FormatToken::named("field", 'd').with_flags(Flags::PLUS))]
    );
    assert_eq!(
        events("%{field:#d}"),
        vec![tok(FormatToken::named("field", 'd').with_flags(Flags::SHARP))]
    );
}

#[test]
fn named_field_width_precision() {
    assert_eq!(
        events("%{field:5d}"),
        vec![tok(FormatToken::named("field", 'd').with_width(5))]
    );
    assert_eq!(
        events("%{field:.3d}"),
        vec![tok(FormatToken::named("field", 'd').with_precision(3))]
    );
    assert_eq!(
        events("%{field:5.3d}"),
        vec![tok(
            FormatToken::named("field", 'd')
                .with_width(5)
                .with_precision(3)
        )]
    );
    assert_eq!(
        events("%{field:.d}"),
        vec![tok(FormatToken::named("field", 'd').with_precision(0))]
    );
}

#[test]
fn named_field_value_flags() {
    assert_eq!(
        events("%{+field}"),
        vec![tok(FormatToken::named("field", 'v').with_flags(Flags::PLUS_V))]
    );
    assert_eq!(
        events("%{#field}"),
        vec![tok(FormatToken::named("field", 'v').with_flags(Flags::SHARP_V))]
    );
    assert_eq!(
        events("%{field:+v}"),
        vec![tok(FormatToken::named("field", 'v').with_flags(Flags::PLUS_V))]
    );
    assert_eq!(
        events("%{+field:x}"),
        vec![tok(FormatToken::named("field", 'x').with_flags(Flags::PLUS))]
    );
}

#[test]
fn named_field_keeps_unicode_name() {
    assert_eq!(
        events("%{日本}"),
        vec![tok(FormatToken::named("日本", 'v'))]
    );
}

// === Named errors ===

#[test]
fn close_missing() {
    assert_eq!(kinds("%{"), vec![Err(DirectiveError::CloseMissing)]);
    assert_eq!(kinds("%{oops"), vec![Err(DirectiveError::CloseMissing)]);
    assert_eq!(kinds("%{oops:v"), vec![Err(DirectiveError::CloseMissing)]);
    assert_eq!(kinds("%{oops:5"), vec![Err(DirectiveError::CloseMissing)]);
}

#[test]
fn close_missing_swallows_rest() {
    // Nothing after the unterminated `{` becomes a new directive.
    assert_eq!(
        kinds("a %{oops %d %v"),
        vec![Ok("a ".into()), Err(DirectiveError::CloseMissing)]
    );
}

#[test]
fn close_missing_keeps_partial_name() {
    assert_eq!(
        events("%{oops"),
        vec![ParseEvent::Error {
            token: FormatToken {
                field: "oops",
                flags: Flags::NAMED,
                ..FormatToken::default()
            },
            error: DirectiveError::CloseMissing,
        }]
    );
}

#[test]
fn named_invalid_verb() {
    assert_eq!(kinds("%{field:a}"), vec![Err(DirectiveError::InvalidVerb)]);
}

#[test]
fn named_trailing_garbage_is_invalid() {
    assert_eq!(
        kinds("%{field:dx} next"),
        vec![Err(DirectiveError::InvalidVerb), Ok(" next".into())]
    );
}

#[test]
fn named_trailing_garbage_blames_first_extra_char() {
    let verb_of = |src: &str| match events(src).first() {
        Some(ParseEvent::Error { token, error }) => (token.verb, *error),
        other => panic!("expected an error event, got {other:?}"),
    };
    assert_eq!(verb_of("%{field:dx}"), ('x', DirectiveError::InvalidVerb));
    assert_eq!(verb_of("%{field:d5y}"), ('5', DirectiveError::InvalidVerb));
    // A bad verb keeps the blame even with junk behind it.
    assert_eq!(verb_of("%{field:ax}"), ('a', DirectiveError::InvalidVerb));
}

#[test]
fn named_without_verb() {
    assert_eq!(
        kinds("%{field:5} next"),
        vec![Err(DirectiveError::NoVerb), Ok(" next".into())]
    );
}

#[test]
fn empty_name_is_rejected_by_default() {
    assert_eq!(
        kinds("%{} x"),
        vec![Err(DirectiveError::NoFieldName), Ok(" x".into())]
    );
    assert_eq!(
        kinds("%{:d} x"),
        vec![Err(DirectiveError::NoFieldName), Ok(" x".into())]
    );
    assert_eq!(kinds("%{:d"), vec![Err(DirectiveError::CloseMissing)]);
}

#[test]
fn empty_name_allowed_by_config() {
    let config = ParseConfig::allow_empty_field_names();
    assert_eq!(
        events_with("%{}", config),
        vec![tok(FormatToken::named("", 'v'))]
    );
    assert_eq!(
        events_with("%{:d}", config),
        vec![tok(FormatToken::named("", 'd'))]
    );
}

// === Configuration ===

#[test]
fn custom_verb_set() {
    let config = ParseConfig::with_verbs(VerbSet::from_chars("va"));
    let got: Vec<_> = Parser::with_config("%a %d", config)
        .map(|ev| matches!(ev, ParseEvent::Token(_)))
        .collect();
    assert_eq!(got, vec![true, false, false]);
}

#[test]
fn error_recovery_across_many_directives() {
    assert_eq!(
        kinds("%d %☠ %{x:q} %{y %v"),
        vec![
            Ok("<d>".into()),
            Ok(" ".into()),
            Err(DirectiveError::InvalidVerb),
            Ok(" ".into()),
            Ok("<q>".into()),
            Ok(" ".into()),
            Err(DirectiveError::CloseMissing),
        ]
    );
}

// === Properties ===

mod properties {
    use proptest::prelude::*;

    use super::super::*;

    proptest! {
        #[test]
        fn text_without_directives_is_one_event(src in "[^%]{1,64}") {
            let events: Vec<_> = parse(&src).collect();
            prop_assert_eq!(events, vec![ParseEvent::Text(&src)]);
        }

        #[test]
        fn arbitrary_input_terminates(src in ".{0,64}") {
            let events: Vec<_> = parse(&src).collect();
            prop_assert!(events.len() <= src.len() + 1);
            for ev in events {
                match ev {
                    ParseEvent::Text(t) => {
                        // `%` only ever ends a run, where `%%` was collapsed.
                        let body = t.strip_suffix('%').unwrap_or(t);
                        prop_assert!(!body.contains('%'));
                    }
                    ParseEvent::Token(t) => prop_assert!(VerbSet::STANDARD.contains(t.verb)),
                    ParseEvent::Error { .. } => {}
                }
            }
        }
    }
}
