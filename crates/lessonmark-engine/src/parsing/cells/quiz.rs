use crate::parsing::blocks::kinds::CellHeader;

use super::{
    error::CellError,
    types::{Attributes, CellBody},
};

/// Quiz body syntax. Delimiters live here, not in the parsing loop.
pub struct Quiz;

impl Quiz {
    pub const OPTION_MARKERS: [&'static str; 2] = ["- ", "* "];
    pub const ANSWER_KEY: &'static str = "answer";
    pub const CHECKED: [&'static str; 2] = ["[x]", "[X]"];
    pub const UNCHECKED: &'static str = "[ ]";
    pub const ID_KEY: &'static str = "id";
    pub const TEXT_KEY: &'static str = "text";
    /// Header attributes that designate the correct option, in precedence order.
    pub const HEADER_ANSWER_KEYS: [&'static str; 2] = ["correct_answer_id", "answer"];

    /// The rest of a column-0 option line, after its `- ` / `* ` marker.
    fn option_rest(line: &str) -> Option<&str> {
        if line == "-" || line == "*" {
            return Some("");
        }
        Self::OPTION_MARKERS
            .iter()
            .find_map(|m| line.strip_prefix(m))
    }

    /// The value of a column-0 `answer:` line, key matched case-insensitively.
    fn answer_value(line: &str) -> Option<String> {
        CellHeader::entry(line)
            .filter(|e| e.key.eq_ignore_ascii_case(Self::ANSWER_KEY))
            .map(|e| e.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DraftOption {
    id: Option<String>,
    text: String,
    checked: bool,
    line: usize,
}

impl DraftOption {
    fn parse(rest: &str, line: usize) -> Self {
        let rest = rest.trim();
        let mut option = DraftOption {
            id: None,
            text: String::new(),
            checked: false,
            line,
        };

        if let Some(text) = Quiz::CHECKED.iter().find_map(|m| rest.strip_prefix(m)) {
            option.checked = true;
            option.text = text.trim().to_string();
        } else if let Some(text) = rest.strip_prefix(Quiz::UNCHECKED) {
            option.text = text.trim().to_string();
        } else {
            match CellHeader::entry(rest) {
                Some(e) if e.key == Quiz::ID_KEY => option.id = Some(e.value),
                Some(e) if e.key == Quiz::TEXT_KEY => option.text = e.value,
                _ => option.text = rest.to_string(),
            }
        }
        option
    }

    /// An `id:` option still waiting for its indented `text:` line.
    fn awaiting_text(&self) -> bool {
        self.id.is_some() && self.text.is_empty()
    }
}

/// A quiz as read from its body, before the answer is resolved.
#[derive(Debug, Default)]
struct QuizDraft {
    question: Option<String>,
    options: Vec<DraftOption>,
    /// `(line, reference)` of the body's answer marker.
    answer: Option<(usize, String)>,
}

impl QuizDraft {
    fn parse(content: &str) -> Result<Self, CellError> {
        let mut draft = QuizDraft::default();

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end();
            if line.trim().is_empty() {
                continue;
            }

            if let Some(value) = Quiz::answer_value(line) {
                if draft.question.is_none() {
                    return Err(CellError::MissingQuestion);
                }
                if draft.answer.is_some() {
                    return Err(CellError::DuplicateAnswer { line: line_no });
                }
                draft.answer = Some((line_no, value));
                continue;
            }

            if let Some(rest) = Quiz::option_rest(line) {
                if draft.question.is_none() {
                    return Err(CellError::MissingQuestion);
                }
                draft.options.push(DraftOption::parse(rest, line_no));
                continue;
            }

            if draft.question.is_none() {
                draft.question = Some(line.trim().to_string());
                continue;
            }

            // Continuation of an `- id: x` option: an indented `text: y` line.
            if line.starts_with([' ', '\t'])
                && let Some(last) = draft.options.last_mut()
                && last.awaiting_text()
                && let Some(entry) = CellHeader::entry(line.trim_start())
                && entry.key == Quiz::TEXT_KEY
            {
                last.text = entry.value;
                continue;
            }

            return Err(CellError::UnexpectedLine {
                line: line_no,
                text: line.trim().to_string(),
            });
        }

        if draft.question.is_none() {
            return Err(CellError::MissingQuestion);
        }
        if draft.options.is_empty() {
            return Err(CellError::NoOptions);
        }
        if let Some(empty) = draft.options.iter().find(|o| o.text.is_empty()) {
            return Err(CellError::EmptyOption { line: empty.line });
        }
        Ok(draft)
    }

    /// Resolves an answer reference against option ids, then exact option
    /// text, then a 1-based number, then a single letter (`a` = first).
    fn resolve(&self, reference: &str) -> Result<usize, CellError> {
        let reference = reference.trim();
        let options = &self.options;

        if let Some(i) = options.iter().position(|o| o.id.as_deref() == Some(reference)) {
            return Ok(i);
        }
        if let Some(i) = options.iter().position(|o| o.text == reference) {
            return Ok(i);
        }
        if let Ok(n) = reference.parse::<usize>()
            && (1..=options.len()).contains(&n)
        {
            return Ok(n - 1);
        }
        let mut chars = reference.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && c.is_ascii_alphabetic()
        {
            let i = (c.to_ascii_lowercase() as u8 - b'a') as usize;
            if i < options.len() {
                return Ok(i);
            }
        }
        Err(CellError::UnresolvedAnswer(reference.to_string()))
    }

    /// Collects every answer designation (checked option, body marker,
    /// header attribute) and requires them to agree on exactly one option.
    fn correct_answer(&self, attributes: &Attributes) -> Result<usize, CellError> {
        let checked: Vec<usize> = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.checked)
            .map(|(i, _)| i)
            .collect();
        if checked.len() > 1 {
            return Err(CellError::MultipleChecked);
        }

        let mut designated = checked;
        if let Some((_, reference)) = &self.answer {
            designated.push(self.resolve(reference)?);
        }
        if let Some(reference) = Quiz::HEADER_ANSWER_KEYS
            .iter()
            .find_map(|k| attributes.get(*k))
        {
            designated.push(self.resolve(reference)?);
        }

        let first = *designated.first().ok_or(CellError::MissingAnswer)?;
        if let Some(&second) = designated.iter().find(|&&i| i != first) {
            return Err(CellError::ConflictingAnswers { first, second });
        }
        Ok(first)
    }
}

/// Builds a quiz cell, or reports the first structural problem found.
pub(crate) fn build(content: &str, attributes: &Attributes) -> Result<CellBody, CellError> {
    let draft = QuizDraft::parse(content)?;
    let correct_answer = draft.correct_answer(attributes)?;

    Ok(CellBody::Quiz {
        question: draft.question.unwrap_or_default(),
        options: draft.options.into_iter().map(|o| o.text).collect(),
        correct_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn quiz(question: &str, options: &[&str], correct_answer: usize) -> CellBody {
        CellBody::Quiz {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer,
        }
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn answer_line_by_option_text() {
        let body = build("2+2?\n- 3\n- 4\n- 5\nanswer: 4", &Attributes::new());
        assert_eq!(body, Ok(quiz("2+2?", &["3", "4", "5"], 1)));
    }

    #[test]
    fn checkbox_marks_answer() {
        let body = build("Pick one\n\n- [ ] red\n- [x] green\n* [ ] blue\n", &Attributes::new());
        assert_eq!(body, Ok(quiz("Pick one", &["red", "green", "blue"], 1)));
    }

    #[test]
    fn id_options_with_header_answer() {
        let content = "What type of learning predicts house prices?\n\n\
                       - id: a-unsupervised\n  text: Unsupervised learning\n\
                       - id: a-supervised\n  text: Supervised learning\n";
        let body = build(content, &attrs(&[("correct_answer_id", "a-supervised")]));
        assert_eq!(
            body,
            Ok(quiz(
                "What type of learning predicts house prices?",
                &["Unsupervised learning", "Supervised learning"],
                1
            ))
        );
    }

    #[rstest]
    #[case("answer: b", 1)]
    #[case("answer: C", 2)]
    #[case("answer: 1", 0)]
    #[case("Answer: Paris", 0)]
    fn answer_reference_forms(#[case] marker: &str, #[case] expected: usize) {
        let content = format!("Capital of France?\n- Paris\n- Lyon\n- Nice\n{marker}");
        let body = build(&content, &Attributes::new()).unwrap();
        assert_eq!(body, quiz("Capital of France?", &["Paris", "Lyon", "Nice"], expected));
    }

    #[test]
    fn option_text_beats_numeric_position() {
        let body = build("Pick\n- 2\n- 1\nanswer: 1", &Attributes::new());
        assert_eq!(body, Ok(quiz("Pick", &["2", "1"], 1)));
    }

    #[test]
    fn agreeing_markers_are_accepted() {
        let body = build("Q\n- [x] a\n- b\nanswer: a", &Attributes::new());
        assert_eq!(body, Ok(quiz("Q", &["a", "b"], 0)));
    }

    #[rstest]
    #[case("", CellError::MissingQuestion)]
    #[case("\n\n", CellError::MissingQuestion)]
    #[case("- 3\n- 4\nanswer: 4", CellError::MissingQuestion)]
    #[case("2+2?\nanswer: 4", CellError::NoOptions)]
    #[case("2+2?\n- 3\n- 4", CellError::MissingAnswer)]
    #[case("2+2?\n- 3\n- 4\nanswer: 7", CellError::UnresolvedAnswer("7".to_string()))]
    #[case("2+2?\n- 3\n- 4\nanswer: 4\nanswer: 3", CellError::DuplicateAnswer { line: 5 })]
    #[case("2+2?\n- [x] 3\n- [x] 4", CellError::MultipleChecked)]
    #[case("2+2?\n- [x] 3\n- 4\nanswer: 4", CellError::ConflictingAnswers { first: 0, second: 1 })]
    #[case("2+2?\n- 3\n-\nanswer: 3", CellError::EmptyOption { line: 3 })]
    #[case("2+2?\n- id: a\n- id: b\nanswer: a", CellError::EmptyOption { line: 2 })]
    #[case("2+2?\nstray words\n- 4\nanswer: 4", CellError::UnexpectedLine { line: 2, text: "stray words".to_string() })]
    fn malformed_quizzes(#[case] content: &str, #[case] expected: CellError) {
        assert_eq!(build(content, &Attributes::new()), Err(expected));
    }

    #[test]
    fn header_answer_must_resolve() {
        let body = build("Q\n- a\n- b", &attrs(&[("correct_answer_id", "zzz")]));
        assert_eq!(body, Err(CellError::UnresolvedAnswer("zzz".to_string())));
    }

    #[test]
    fn crlf_bodies_parse() {
        let body = build("2+2?\r\n- 3\r\n- 4\r\nanswer: 4\r\n", &Attributes::new());
        assert_eq!(body, Ok(quiz("2+2?", &["3", "4"], 1)));
    }
}
