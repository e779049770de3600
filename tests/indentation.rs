//! Indentation-engine regression tests over realistic, multi-line
//! fixtures (nested block sequences/mappings, sibling dedents).

use indoc::indoc;
use yaml_scan::{Scanner, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    Scanner::new(input.chars()).map(|t| t.kind).collect()
}

#[test]
fn nested_sequence_under_mapping_key_unrolls_cleanly() {
    let _ = env_logger::builder().is_test(true).try_init();

    let input = indoc! {"
        a:
          - 1
          - 2
        b: 3
    "};
    let k = kinds(input);
    let block_ends = k.iter().filter(|t| **t == TokenKind::BlockEnd).count();
    let block_starts = k
        .iter()
        .filter(|t| matches!(t, TokenKind::BlockSequenceStart | TokenKind::BlockMappingStart))
        .count();
    assert_eq!(block_ends, block_starts);
    assert_eq!(block_starts, 2, "one outer mapping, one nested sequence");
    assert_eq!(k.last(), Some(&TokenKind::StreamEnd));
}

#[test]
fn sibling_mappings_at_decreasing_indent_each_close_their_own_block() {
    let _ = env_logger::builder().is_test(true).try_init();

    let input = indoc! {"
        outer:
          inner:
            leaf: 1
          sibling: 2
        top: 3
    "};
    let k = kinds(input);
    let block_ends = k.iter().filter(|t| **t == TokenKind::BlockEnd).count();
    let block_starts = k
        .iter()
        .filter(|t| matches!(t, TokenKind::BlockMappingStart))
        .count();
    assert_eq!(block_ends, block_starts);
    assert_eq!(block_starts, 3);
}

#[test]
fn deeply_nested_sequence_of_mappings_balances() {
    let input = indoc! {"
        - name: a
          children:
            - name: b
            - name: c
        - name: d
    "};
    let k = kinds(input);
    let starts = k
        .iter()
        .filter(|t| matches!(t, TokenKind::BlockSequenceStart | TokenKind::BlockMappingStart))
        .count();
    let ends = k.iter().filter(|t| **t == TokenKind::BlockEnd).count();
    assert_eq!(starts, ends);
}
