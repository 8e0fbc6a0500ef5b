// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_fenced_lesson(size: usize) -> String {
    let base = "# Title\n\nParagraph with some content.\n\n```python\nfor i in range(3):\n    print(i)\n```\n\n```quiz\nHow many lines print?\n- 2\n- 3\nanswer: 3\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_header_lesson(cells: usize) -> String {
    let mut content = String::from("---\ntitle: Benchmark Lesson\nobjectives:\n  - Parse quickly\n---\n");

    for cell in 0..cells {
        match cell % 3 {
            0 => content.push_str(&format!(
                "---\ntype: markdown\norder: {cell}\n---\n# Section {cell}\n\nSome paragraph content with multiple sentences.\n\n"
            )),
            1 => content.push_str(&format!(
                "---\ntype: code\nlanguage: python\norder: {cell}\n---\nvalue = {cell}\nprint(value)\n\n"
            )),
            _ => content.push_str(&format!(
                "---\ntype: quiz\ncorrect_answer_id: a-{cell}\n---\nWhich option is {cell}?\n\n- id: a-{cell}\n  text: This one\n- id: b-{cell}\n  text: Not this one\n\n"
            )),
        }
    }

    content
}
