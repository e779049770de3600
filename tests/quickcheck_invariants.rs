//! Property tests over small, structurally-valid block YAML fragments.
//!
//! Generates nested sequences/mappings (bounded depth) out of
//! plain-scalar-safe identifiers, then checks the stream-bracketing and
//! mark invariants from spec.md §8 hold regardless of shape.

use quickcheck::{Arbitrary, Gen, TestResult};
use yaml_scan::{Scanner, TokenKind};

const MAX_DEPTH: u32 = 3;
const IDENT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, Debug)]
enum Node {
    Scalar(String),
    Seq(Vec<Node>),
    Map(Vec<(String, Node)>),
}

fn arbitrary_ident(g: &mut Gen) -> String {
    let letters: Vec<char> = IDENT_ALPHABET.chars().collect();
    let len = (usize::arbitrary(g) % 5) + 1;
    (0..len).map(|_| *g.choose(&letters).unwrap()).collect()
}

impl Node {
    fn arbitrary_at_depth(g: &mut Gen, depth: u32) -> Node {
        let choices: &[u8] = if depth >= MAX_DEPTH { &[0] } else { &[0, 1, 2] };
        match *g.choose(choices).unwrap() {
            0 => Node::Scalar(arbitrary_ident(g)),
            1 => {
                let n = (usize::arbitrary(g) % 3) + 1;
                Node::Seq((0..n).map(|_| Node::arbitrary_at_depth(g, depth + 1)).collect())
            }
            _ => {
                let n = (usize::arbitrary(g) % 3) + 1;
                Node::Map(
                    (0..n)
                        .map(|_| (arbitrary_ident(g), Node::arbitrary_at_depth(g, depth + 1)))
                        .collect(),
                )
            }
        }
    }

    fn render(&self, indent: usize, out: &mut String) {
        match self {
            Node::Scalar(s) => {
                out.push_str(s);
                out.push('\n');
            }
            Node::Seq(items) => {
                for item in items {
                    out.push_str(&" ".repeat(indent));
                    out.push_str("- ");
                    match item {
                        Node::Scalar(s) => {
                            out.push_str(s);
                            out.push('\n');
                        }
                        _ => {
                            out.push('\n');
                            item.render(indent + 2, out);
                        }
                    }
                }
            }
            Node::Map(entries) => {
                for (k, v) in entries {
                    out.push_str(&" ".repeat(indent));
                    out.push_str(k);
                    out.push_str(": ");
                    match v {
                        Node::Scalar(s) => {
                            out.push_str(s);
                            out.push('\n');
                        }
                        _ => {
                            out.push('\n');
                            v.render(indent + 2, out);
                        }
                    }
                }
            }
        }
    }
}

/// A structurally-valid block YAML document, rendered to text.
#[derive(Clone, Debug)]
struct YamlFragment(String);

impl Arbitrary for YamlFragment {
    fn arbitrary(g: &mut Gen) -> Self {
        let root = Node::arbitrary_at_depth(g, 0);
        let mut text = String::new();
        match &root {
            Node::Scalar(s) => {
                text.push_str(s);
                text.push('\n');
            }
            _ => root.render(0, &mut text),
        }
        YamlFragment(text)
    }
}

quickcheck::quickcheck! {
    /// Invariant (1): the stream begins with `StreamStart` and ends with
    /// `StreamEnd`.
    fn stream_is_bracketed(frag: YamlFragment) -> TestResult {
        let tokens: Vec<_> = Scanner::new(frag.0.chars()).collect();
        if tokens.is_empty() {
            return TestResult::discard();
        }
        TestResult::from_bool(
            matches!(tokens.first().unwrap().kind, TokenKind::StreamStart)
                && matches!(tokens.last().unwrap().kind, TokenKind::StreamEnd),
        )
    }

    /// Invariant (2): every `BlockSequenceStart`/`BlockMappingStart` has
    /// exactly one matching `BlockEnd`, properly nested (the running
    /// depth never goes negative and ends at zero).
    fn block_collections_are_balanced(frag: YamlFragment) -> TestResult {
        let mut depth = 0i32;
        for tok in Scanner::new(frag.0.chars()) {
            match tok.kind {
                TokenKind::BlockSequenceStart | TokenKind::BlockMappingStart => depth += 1,
                TokenKind::BlockEnd => {
                    depth -= 1;
                    if depth < 0 {
                        return TestResult::failed();
                    }
                }
                _ => {}
            }
        }
        TestResult::from_bool(depth == 0)
    }

    /// Invariant (4): every `Value` is preceded by a `Key` at the same
    /// nesting level (tracked here as a simple running balance, since
    /// these fragments never nest a mapping value directly under another
    /// without an intervening `BlockMappingStart`).
    fn every_value_has_a_key(frag: YamlFragment) -> TestResult {
        let mut pending = 0i32;
        for tok in Scanner::new(frag.0.chars()) {
            match tok.kind {
                TokenKind::Key => pending += 1,
                TokenKind::Value => {
                    pending -= 1;
                    if pending < 0 {
                        return TestResult::failed();
                    }
                }
                _ => {}
            }
        }
        TestResult::from_bool(pending == 0)
    }

    /// Invariant (6): every token's `start.index() <= end.index()`, and
    /// `start.index()` never decreases across the stream.
    fn marks_are_well_ordered(frag: YamlFragment) -> TestResult {
        let mut last_index = 0usize;
        for tok in Scanner::new(frag.0.chars()) {
            if tok.start.index() > tok.end.index() {
                return TestResult::failed();
            }
            if tok.start.index() < last_index {
                return TestResult::failed();
            }
            last_index = tok.start.index();
        }
        TestResult::passed()
    }

    /// Invariant (7): on successful scans, the last token's `end.index()`
    /// equals the input's character count.
    fn total_consumption_matches_input(frag: YamlFragment) -> TestResult {
        let char_count = frag.0.chars().count();
        let mut scanner = Scanner::new(frag.0.chars());
        let mut last_end = 0usize;
        while let Some(tok) = scanner.next() {
            last_end = tok.end.index();
        }
        if scanner.get_error().is_some() {
            return TestResult::discard();
        }
        TestResult::from_bool(last_end == char_count)
    }
}
