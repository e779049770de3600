use pretty_assertions::assert_eq;
use yaml_scan::{Scanner, ScannerConfig, TokenKind};

fn scan_kinds(input: &str) -> Vec<TokenKind> {
    let scanner = Scanner::new(input.chars());
    let kinds: Vec<TokenKind> = scanner.map(|tok| tok.kind).collect();
    kinds
}

fn plain(s: &str) -> TokenKind {
    TokenKind::Scalar {
        value: s.to_owned(),
        style: yaml_scan::ScalarStyle::Plain,
    }
}

#[test]
fn scenario_a_simple_mapping() {
    assert_eq!(
        scan_kinds("a: 1\n"),
        vec![
            TokenKind::StreamStart,
            TokenKind::BlockMappingStart,
            TokenKind::Key,
            plain("a"),
            TokenKind::Value,
            plain("1"),
            TokenKind::BlockEnd,
            TokenKind::StreamEnd,
        ]
    );
}

#[test]
fn scenario_b_block_sequence() {
    assert_eq!(
        scan_kinds("- x\n- y\n"),
        vec![
            TokenKind::StreamStart,
            TokenKind::BlockSequenceStart,
            TokenKind::BlockEntry,
            plain("x"),
            TokenKind::BlockEntry,
            plain("y"),
            TokenKind::BlockEnd,
            TokenKind::StreamEnd,
        ]
    );
}

#[test]
fn scenario_c_flow_sequence() {
    assert_eq!(
        scan_kinds("[a, b]\n"),
        vec![
            TokenKind::StreamStart,
            TokenKind::FlowSequenceStart,
            plain("a"),
            TokenKind::FlowEntry,
            plain("b"),
            TokenKind::FlowSequenceEnd,
            TokenKind::StreamEnd,
        ]
    );
}

#[test]
fn scenario_d_directives_and_document_markers() {
    assert_eq!(
        scan_kinds("%YAML 1.1\n---\nnull\n...\n"),
        vec![
            TokenKind::StreamStart,
            TokenKind::VersionDirective { major: 1, minor: 1 },
            TokenKind::DocumentStart,
            plain("null"),
            TokenKind::DocumentEnd,
            TokenKind::StreamEnd,
        ]
    );
}

#[test]
fn scenario_e_double_quoted_scalar_with_escaped_newline() {
    assert_eq!(
        scan_kinds("\"a\\nb\""),
        vec![
            TokenKind::StreamStart,
            TokenKind::Scalar {
                value: "a\nb".to_owned(),
                style: yaml_scan::ScalarStyle::DoubleQuoted,
            },
            TokenKind::StreamEnd,
        ]
    );
}

#[test]
fn scenario_f_literal_block_scalar() {
    assert_eq!(
        scan_kinds("|\n  hello\n  world\n"),
        vec![
            TokenKind::StreamStart,
            TokenKind::Scalar {
                value: "hello\nworld\n".to_owned(),
                style: yaml_scan::ScalarStyle::Literal,
            },
            TokenKind::StreamEnd,
        ]
    );
}

#[test]
fn folded_block_scalar_joins_lines_with_spaces() {
    assert_eq!(
        scan_kinds(">\n  hello\n  world\n"),
        vec![
            TokenKind::StreamStart,
            TokenKind::Scalar {
                value: "hello world\n".to_owned(),
                style: yaml_scan::ScalarStyle::Folded,
            },
            TokenKind::StreamEnd,
        ]
    );
}

#[test]
fn nested_block_collections_balance_block_end() {
    let kinds = scan_kinds("a:\n  - 1\n  - 2\nb: 3\n");
    let starts = kinds
        .iter()
        .filter(|k| {
            matches!(
                k,
                TokenKind::BlockSequenceStart | TokenKind::BlockMappingStart
            )
        })
        .count();
    let ends = kinds
        .iter()
        .filter(|k| matches!(k, TokenKind::BlockEnd))
        .count();
    assert_eq!(starts, ends);
    assert_eq!(starts, 2);
}

#[test]
fn flow_collections_balance_their_end_tokens() {
    let kinds = scan_kinds("{a: [1, 2], b: {c: 3}}\n");
    let opens = kinds
        .iter()
        .filter(|k| {
            matches!(
                k,
                TokenKind::FlowSequenceStart | TokenKind::FlowMappingStart
            )
        })
        .count();
    let closes = kinds
        .iter()
        .filter(|k| {
            matches!(
                k,
                TokenKind::FlowSequenceEnd | TokenKind::FlowMappingEnd
            )
        })
        .count();
    assert_eq!(opens, closes);
    assert_eq!(opens, 3);
}

#[test]
fn every_value_is_preceded_by_a_key() {
    let kinds = scan_kinds("a: 1\nb:\n  c: 2\n");
    let mut pending_keys = 0i32;
    for k in &kinds {
        match k {
            TokenKind::Key => pending_keys += 1,
            TokenKind::Value => pending_keys -= 1,
            _ => {}
        }
    }
    assert_eq!(pending_keys, 0);
}

#[test]
fn marks_are_non_decreasing_and_well_ordered() {
    let scanner = Scanner::new("a: [1, 2]\nb: 3\n".chars());
    let mut last_start = None;
    for tok in scanner {
        assert!(tok.start.index() <= tok.end.index());
        if let Some(prev) = last_start {
            assert!(tok.start >= prev);
        }
        last_start = Some(tok.start);
    }
}

#[test]
fn total_consumption_reaches_end_of_input() {
    let input = "a: [1, 2]\nb: 3\n";
    let mut scanner = Scanner::new(input.chars());
    let mut last_end = 0;
    while let Some(tok) = scanner.next() {
        last_end = tok.end.index();
    }
    assert!(scanner.get_error().is_none());
    assert_eq!(last_end, input.chars().count());
}

// Boundary behavior (10): a simple key longer than the configured
// same-line distance limit is invalidated. With no intervening
// whitespace the scalar itself leaves simple keys disallowed, so the
// immediately following ':' is then rejected as a mapping value in an
// invalid context, rather than silently forming `Key`/`Value`.
#[test]
fn overlong_simple_key_is_staled_not_accepted() {
    let config = ScannerConfig {
        simple_key_max_distance: 8,
        ..ScannerConfig::default()
    };
    let input = format!("{}: 1\n", "a".repeat(20));
    let mut scanner = Scanner::new_with_config(input.chars(), config);
    let kinds: Vec<TokenKind> = (&mut scanner).map(|t| t.kind).collect();
    assert!(!kinds.contains(&TokenKind::Key));
    assert!(scanner.get_error().is_some());
}

// Boundary behavior (11): a simple key crossing a line break is staled.
#[test]
fn simple_key_cannot_cross_a_line_break() {
    let kinds = scan_kinds("a\n: 1\n");
    // Without ':' directly after 'a' on the same line, 'a' is just a
    // plain scalar; the ':' on the next line starts its own, unrelated
    // plain scalar token sequence instead of forming a mapping key.
    assert!(!kinds.contains(&TokenKind::Key));
}

// Boundary behavior (12): an over-long version number is fatal.
#[test]
fn overlong_version_number_is_fatal() {
    let mut scanner = Scanner::new("%YAML 1111111111.1\n".chars());
    let collected: Vec<_> = (&mut scanner).collect();
    assert!(collected.iter().all(|t| t.kind != TokenKind::DocumentStart));
    assert!(scanner.get_error().is_some());
}

// Boundary behavior (13): an unpaired UTF-16 surrogate escape is fatal.
#[test]
fn unicode_escape_surrogate_is_fatal() {
    let mut scanner = Scanner::new("\"\\uD800\"\n".chars());
    let _: Vec<_> = (&mut scanner).collect();
    let err = scanner.get_error().expect("surrogate escape must be rejected");
    assert!(err.message().contains("Unicode"));
}

// Boundary behavior (14): a tab at column < indent inside a block
// scalar body is fatal.
#[test]
fn tab_before_indentation_in_block_scalar_is_fatal() {
    let mut scanner = Scanner::new("a: |2\n\tx\n".chars());
    let _: Vec<_> = (&mut scanner).collect();
    assert!(scanner.get_error().is_some());
}

#[test]
fn anchor_and_alias_names_are_word_characters() {
    let kinds = scan_kinds("a: &anchor_1 hello\nb: *anchor_1\n");
    assert!(kinds.iter().any(|k| matches!(k, TokenKind::Anchor(name) if name == "anchor_1")));
    assert!(kinds
        .iter()
        .any(|k| matches!(k, TokenKind::AnchorAlias(name) if name == "anchor_1")));
}

#[test]
fn tag_handle_and_suffix_are_split() {
    let kinds = scan_kinds("!!str hello\n");
    assert!(kinds.iter().any(|k| matches!(
        k,
        TokenKind::Tag { handle, suffix } if handle == "!!" && suffix == "str"
    )));
}

// An un-delimited ':' inside a flow plain scalar, not followed by
// blank/break/NUL or a flow indicator, is fatal (spec.md §4, plain
// scalar termination rules; §7's error list).
#[test]
fn undelimited_colon_in_flow_plain_scalar_is_fatal() {
    let mut scanner = Scanner::new("[a:b]\n".chars());
    let _: Vec<_> = (&mut scanner).collect();
    assert!(scanner.get_error().is_some());
}

// The same ':' is perfectly legal as part of a block-context plain
// scalar (only flow context disallows it).
#[test]
fn colon_inside_block_plain_scalar_is_allowed() {
    let kinds = scan_kinds("- a:b\n");
    assert!(kinds.contains(&plain("a:b")));
}
