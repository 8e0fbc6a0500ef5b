//! Whole-pipeline tests for the parsing module.
//!
//! Every parse here is also run through the snapshot invariant checks, so a
//! passing test implies spans are ordered, uncovered bytes are whitespace and
//! unknown cells round-trip their source text.

use pretty_assertions::assert_eq;
use rstest::rstest;
use xi_rope::Rope;

use crate::parsing::{
    CellBody, Metadata, ParseOptions, ParsedLesson, UnknownData, parse_lesson, parse_lesson_rope,
    parse_lesson_with, rope::Span, segment_blocks, snapshot,
};

fn parse_checked(src: &str) -> ParsedLesson {
    let lesson = parse_lesson(src);
    snapshot::invariants(&Rope::from(src), &lesson);
    lesson
}

fn bodies(lesson: &ParsedLesson) -> Vec<CellBody> {
    lesson.cells.iter().map(|c| c.body.clone()).collect()
}

fn text(content: &str) -> CellBody {
    CellBody::Text {
        content: content.to_string(),
    }
}

fn code(language: &str, content: &str) -> CellBody {
    CellBody::Code {
        language: language.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn empty_input_has_no_cells() {
    assert_eq!(parse_checked(""), ParsedLesson::default());
}

#[test]
fn metadata_only_has_no_cells() {
    let lesson = parse_checked("---\ntitle: X\nauthor: Y\n---\n");
    let expected: Metadata = [("title", "X"), ("author", "Y")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(lesson.metadata, expected);
    assert!(lesson.cells.is_empty());
}

#[test]
fn python_code_block() {
    let lesson = parse_checked("```python\nprint(1)\n```\n");
    assert_eq!(bodies(&lesson), vec![code("python", "print(1)")]);
}

#[test]
fn quiz_with_answer_marker() {
    let lesson = parse_checked("```quiz\n2+2?\n- 3\n- 4\n- 5\nanswer: 4\n```\n");
    assert_eq!(
        bodies(&lesson),
        vec![CellBody::Quiz {
            question: "2+2?".to_string(),
            options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
            correct_answer: 1,
        }]
    );
}

#[test]
fn quiz_without_answer_is_unknown_with_raw_block() {
    let src = "```quiz\n2+2?\n- 3\n- 4\n- 5\n```";
    let lesson = parse_checked(src);
    assert_eq!(
        bodies(&lesson),
        vec![CellBody::Unknown {
            data: UnknownData::declared("quiz"),
            raw_content: src.to_string(),
        }]
    );
}

#[test]
fn text_code_and_unterminated_fence() {
    let src = "Intro text\n\n```python\nprint(1)\n```\n\n```js\nlet x = 1;\n";
    let lesson = parse_checked(src);
    assert_eq!(
        bodies(&lesson),
        vec![
            text("Intro text"),
            code("python", "print(1)"),
            text("```js\nlet x = 1;"),
        ]
    );
}

#[test]
fn header_cells_after_front_matter() {
    let src = "---\ntitle: A\n---\ntype: markdown\n---\n# Hi\n";
    let lesson = parse_checked(src);
    assert_eq!(lesson.metadata.get("title").map(String::as_str), Some("A"));
    assert_eq!(bodies(&lesson), vec![text("# Hi")]);
    assert_eq!(lesson.cells[0].span, Span::new(13, 40));
}

#[test]
fn unknown_type_keeps_header_and_attributes() {
    let src = "---\ntype: video\nurl: https://example.com/v\n---\nWatch this.\n";
    let lesson = parse_checked(src);
    let cell = &lesson.cells[0];
    assert_eq!(
        cell.body,
        CellBody::Unknown {
            data: UnknownData::declared("video"),
            raw_content: src.trim_end().to_string(),
        }
    );
    assert_eq!(
        cell.attributes.get("url").map(String::as_str),
        Some("https://example.com/v")
    );
    assert_eq!(lesson.unknown_cells().count(), 1);
}

#[test]
fn cells_follow_source_order() {
    let src = "one\n```\ntwo\n```\nthree\n---\ntype: code\n---\nfour\n---\ntype: text\n---\nfive\n";
    let lesson = parse_checked(src);
    let kinds: Vec<_> = lesson.cells.iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec!["text", "code", "text", "code", "text"]);
}

#[rstest]
#[case::whitespace_only("  \n\t\n\n")]
#[case::crlf("---\r\ntitle: A\r\n---\r\nhello\r\n")]
#[case::lone_delimiters("---\n---\n---\n")]
#[case::unclosed_front_matter("---\ntitle: A\n")]
#[case::unclosed_header("text\n---\ntype: code\n")]
#[case::empty_header_body("---\ntype: quiz\n---\n")]
#[case::nested_fences("````\n```\ninner\n```\n````\n")]
#[case::tilde_fence("~~~quiz\nQ\n- a\n~~~\n")]
#[case::unicode("# Ünïcödé ✓\n```\nλ\n```\n")]
#[case::no_trailing_newline("text")]
fn parsing_is_total(#[case] src: &str) {
    let lesson = parse_checked(src);
    assert_eq!(parse_lesson(src), lesson);
}

#[rstest]
#[case::nul_byte("a\0b\n", "a\0b")]
#[case::lone_cr("one\rtwo\n", "one\rtwo")]
#[case::lone_cr_rules("---\rtitle: A\r---\nbody\n", "---\rtitle: A\r---\nbody")]
#[case::byte_order_mark(
    "\u{feff}---\ntitle: A\n---\nbody\n",
    "\u{feff}---\ntitle: A\n---\nbody"
)]
#[case::lone_delimiters("---\n---\n---\n", "---\n---\n---")]
#[case::prose_between_rules(
    "---\nIntro paragraph the student wrote.\n\nMore prose.\n\n---\nBelow the rule.\n",
    "---\nIntro paragraph the student wrote.\n\nMore prose.\n\n---\nBelow the rule."
)]
fn odd_input_is_kept_as_text(#[case] src: &str, #[case] expected: &str) {
    let lesson = parse_checked(src);
    assert!(lesson.metadata.is_empty());
    assert_eq!(bodies(&lesson), vec![text(expected)]);
}

#[test]
fn unclosed_fence_does_not_swallow_later_cells() {
    let src = "Intro\n```js\nlet x\n---\ntype: quiz\n---\nQ?\n- a\n- b\nanswer: a\n---\ntype: code\n---\n```\nx\n```\n";
    let lesson = parse_checked(src);
    assert_eq!(
        bodies(&lesson),
        vec![
            text("Intro\n```js\nlet x"),
            CellBody::Quiz {
                question: "Q?".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer: 0,
            },
            code("", "```\nx\n```"),
        ]
    );
}

#[test]
fn reparsing_is_idempotent() {
    let src = "---\ntitle: A\n---\n\nIntro\n\n```quiz\nQ?\n- [x] yes\n- [ ] no\n```\n";
    assert_eq!(parse_lesson(src), parse_lesson(src));
}

#[test]
fn rope_and_str_entry_points_agree() {
    let src = "Intro\n```rust\nfn main() {}\n```\n";
    let options = ParseOptions::default();
    assert_eq!(
        parse_lesson_rope(&Rope::from(src), &options),
        parse_lesson_with(src, &options)
    );
}

#[test]
fn fenced_cells_can_be_disabled() {
    let options = ParseOptions {
        fenced_cells: false,
        ..ParseOptions::default()
    };
    let lesson = parse_lesson_with("Intro\n```python\nprint(1)\n```\n", &options);
    assert_eq!(
        bodies(&lesson),
        vec![text("Intro\n```python\nprint(1)\n```")]
    );
}

#[test]
fn segment_blocks_spans_are_body_relative() {
    let blocks = segment_blocks("\n```js\nx\n```\n", &ParseOptions::default());
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].span, Span::new(1, 12));
    assert_eq!(blocks[0].content, "x");
}
