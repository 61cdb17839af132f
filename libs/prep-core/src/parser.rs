//! Parser for question-set files.
//!
//! # Format
//! ```text
//! BLOCK: quant
//! SECTION: mental-math
//! TITLE: Mental Math Drills
//!
//! N: 1
//! KIND: mental_math
//! Q: What is 17 × 23?
//! A: 391
//! E: 17 × 20 = 340, plus 17 × 3 = 51.
//! ```
//!
//! `Q:`, `A:` and `E:` bodies may continue over following lines until the
//! next marker. Behavioral questions carry no `A:`; their `E:` text is
//! surfaced as guidance.

use std::collections::HashSet;

use crate::error::{ParseError, Result};
use crate::types::{BlockType, GradedQuestion, OpenQuestion, Question, QuestionSet};

/// Parse question-set file content.
pub fn parse(content: &str) -> Result<QuestionSet> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let mut parser = Parser::new();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finalize()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Prompt,
    Answer,
    Explanation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GradedKind {
    MentalMath,
    Probability,
    Trading,
    MachineLearning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KindTag {
    Graded(GradedKind),
    Behavioral,
}

impl KindTag {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "mental_math" => Some(Self::Graded(GradedKind::MentalMath)),
            "probability" => Some(Self::Graded(GradedKind::Probability)),
            "trading" => Some(Self::Graded(GradedKind::Trading)),
            "machine_learning" => Some(Self::Graded(GradedKind::MachineLearning)),
            "behavioral" => Some(Self::Behavioral),
            _ => None,
        }
    }
}

struct QuestionBuilder {
    number: u32,
    kind: Option<KindTag>,
    prompt: Option<String>,
    answer: Option<String>,
    explanation: Option<String>,
}

impl QuestionBuilder {
    fn new(number: u32) -> Self {
        Self {
            number,
            kind: None,
            prompt: None,
            answer: None,
            explanation: None,
        }
    }

    fn build(self) -> Result<Question> {
        let kind = self.kind.ok_or(ParseError::MissingKind {
            number: self.number,
        })?;
        let prompt = self.prompt.ok_or(ParseError::MissingPrompt {
            number: self.number,
        })?;

        match kind {
            KindTag::Behavioral => Ok(Question::Behavioral(OpenQuestion {
                number: self.number,
                prompt,
                guidance: self.explanation,
            })),
            KindTag::Graded(graded) => {
                let answer = self.answer.ok_or(ParseError::MissingAnswer {
                    number: self.number,
                })?;
                let inner = GradedQuestion {
                    number: self.number,
                    prompt,
                    answer,
                    explanation: self.explanation,
                };
                Ok(match graded {
                    GradedKind::MentalMath => Question::MentalMath(inner),
                    GradedKind::Probability => Question::Probability(inner),
                    GradedKind::Trading => Question::Trading(inner),
                    GradedKind::MachineLearning => Question::MachineLearning(inner),
                })
            }
        }
    }
}

enum LineType<'a> {
    Block(&'a str),
    Section(&'a str),
    Title(&'a str),
    Number(&'a str),
    Kind(&'a str),
    Prompt(&'a str),
    Answer(&'a str),
    Explanation(&'a str),
    Text(&'a str),
    Empty,
}

struct Parser {
    block: Option<BlockType>,
    section: Option<String>,
    title: Option<String>,
    current: Option<QuestionBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
    questions: Vec<Question>,
    seen_numbers: HashSet<u32>,
}

impl Parser {
    fn new() -> Self {
        Self {
            block: None,
            section: None,
            title: None,
            current: None,
            current_field: None,
            buffer: Vec::new(),
            questions: Vec::new(),
            seen_numbers: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Block(value) if self.in_header() => {
                let block = BlockType::from_str(value).ok_or_else(|| ParseError::UnknownBlock {
                    value: value.to_string(),
                })?;
                self.block = Some(block);
            }
            LineType::Section(value) if self.in_header() => {
                self.section = Some(value.to_string());
            }
            LineType::Title(value) if self.in_header() => {
                self.title = Some(value.to_string());
            }
            LineType::Number(value) => self.handle_number(value, line_num)?,
            LineType::Kind(value) => self.handle_kind(value, line_num)?,
            LineType::Prompt(text) => self.handle_field(Field::Prompt, text, line_num)?,
            LineType::Answer(text) => self.handle_field(Field::Answer, text, line_num)?,
            LineType::Explanation(text) => self.handle_field(Field::Explanation, text, line_num)?,
            LineType::Empty => self.buffer.push(String::new()),
            // Header markers after the first question read as plain text,
            // like any other continuation line.
            LineType::Block(_)
            | LineType::Section(_)
            | LineType::Title(_)
            | LineType::Text(_) => self.buffer.push(line.to_string()),
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("BLOCK:") {
            LineType::Block(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("SECTION:") {
            LineType::Section(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("TITLE:") {
            LineType::Title(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("N:") {
            LineType::Number(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("KIND:") {
            LineType::Kind(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Prompt(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Answer(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("E:") {
            LineType::Explanation(rest.trim())
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(line)
        }
    }

    fn in_header(&self) -> bool {
        self.current.is_none() && self.questions.is_empty()
    }

    fn handle_number(&mut self, value: &str, line_num: usize) -> Result<()> {
        self.flush_question()?;

        let number = value.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
            line: line_num,
            value: value.to_string(),
        })?;
        if !self.seen_numbers.insert(number) {
            return Err(ParseError::DuplicateNumber {
                number,
                line: line_num,
            });
        }

        self.current = Some(QuestionBuilder::new(number));
        self.current_field = None;
        Ok(())
    }

    fn handle_kind(&mut self, value: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();

        let kind = KindTag::parse(value).ok_or_else(|| ParseError::UnknownKind {
            line: line_num,
            value: value.to_string(),
        })?;
        let current = self.current.as_mut().ok_or(ParseError::OrphanField {
            marker: "KIND:",
            line: line_num,
        })?;
        current.kind = Some(kind);
        self.current_field = None;
        Ok(())
    }

    fn handle_field(&mut self, field: Field, text: &str, line_num: usize) -> Result<()> {
        if self.current.is_none() {
            let marker = match field {
                Field::Prompt => "Q:",
                Field::Answer => "A:",
                Field::Explanation => "E:",
            };
            return Err(ParseError::OrphanField {
                marker,
                line: line_num,
            });
        }

        self.flush_buffer();
        self.current_field = Some(field);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n").trim().to_string();
        self.buffer.clear();
        if content.is_empty() {
            return;
        }

        if let Some(ref mut builder) = self.current {
            match self.current_field {
                Some(Field::Prompt) => builder.prompt = Some(content),
                Some(Field::Answer) => builder.answer = Some(content),
                Some(Field::Explanation) => builder.explanation = Some(content),
                None => {}
            }
        }
    }

    fn flush_question(&mut self) -> Result<()> {
        self.flush_buffer();
        if let Some(builder) = self.current.take() {
            self.questions.push(builder.build()?);
        }
        self.current_field = None;
        Ok(())
    }

    fn finalize(mut self) -> Result<QuestionSet> {
        self.flush_question()?;

        let block = self.block.ok_or(ParseError::MissingHeader { field: "BLOCK" })?;
        let section = self
            .section
            .ok_or(ParseError::MissingHeader { field: "SECTION" })?;
        let title = self
            .title
            .ok_or(ParseError::MissingHeader { field: "TITLE" })?;

        Ok(QuestionSet {
            block,
            section,
            title,
            questions: self.questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const HEADER: &str = "BLOCK: quant\nSECTION: mental-math\nTITLE: Mental Math\n";

    fn set(body: &str) -> QuestionSet {
        parse(&format!("{HEADER}\n{body}")).unwrap()
    }

    #[test]
    fn parse_single_graded_question() {
        let set = set("N: 1\nKIND: mental_math\nQ: What is 17 × 23?\nA: 391");
        assert_eq!(set.block, BlockType::Quant);
        assert_eq!(set.section, "mental-math");
        assert_eq!(set.len(), 1);

        let question = set.question(1).unwrap();
        assert_eq!(question.prompt(), "What is 17 × 23?");
        assert_eq!(question.canonical_answer(), Some("391"));
    }

    #[test]
    fn parse_multiline_prompt_and_explanation() {
        let set = set(
            "N: 1\nKIND: probability\nQ: A fair coin is flipped 3 times.\nWhat is P(exactly 2 heads)?\nA: 3/8\nE: C(3,2) = 3 outcomes\nout of 8 total.",
        );
        let question = set.question(1).unwrap();
        assert_eq!(
            question.prompt(),
            "A fair coin is flipped 3 times.\nWhat is P(exactly 2 heads)?"
        );
        assert_eq!(question.notes(), Some("C(3,2) = 3 outcomes\nout of 8 total."));
    }

    #[test]
    fn parse_behavioral_without_answer() {
        let set = set("N: 1\nKIND: behavioral\nQ: Why trading?\nE: Keep it under two minutes.");
        let question = set.question(1).unwrap();
        assert_eq!(question.kind_str(), "behavioral");
        assert_eq!(question.canonical_answer(), None);
        assert_eq!(question.notes(), Some("Keep it under two minutes."));
    }

    #[test]
    fn parse_multiple_questions() {
        let set = set(
            "N: 1\nKIND: mental_math\nQ: 2+2?\nA: 4\n\nN: 2\nKIND: trading\nQ: Spread?\nA: ask minus bid",
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.question(2).unwrap().kind_str(), "trading");
    }

    #[test]
    fn reject_graded_without_answer() {
        let result = parse(&format!("{HEADER}\nN: 1\nKIND: mental_math\nQ: 2+2?"));
        assert!(matches!(result, Err(ParseError::MissingAnswer { number: 1 })));
    }

    #[test]
    fn reject_duplicate_numbers() {
        let result = parse(&format!(
            "{HEADER}\nN: 1\nKIND: mental_math\nQ: a?\nA: 1\n\nN: 1\nKIND: mental_math\nQ: b?\nA: 2"
        ));
        assert!(matches!(
            result,
            Err(ParseError::DuplicateNumber { number: 1, .. })
        ));
    }

    #[test]
    fn reject_unknown_kind() {
        let result = parse(&format!("{HEADER}\nN: 1\nKIND: riddle\nQ: a?\nA: 1"));
        assert!(matches!(result, Err(ParseError::UnknownKind { .. })));
    }

    #[test]
    fn reject_unknown_block() {
        let result = parse("BLOCK: crypto\nSECTION: s\nTITLE: t\n\nN: 1\nKIND: behavioral\nQ: a?");
        assert!(matches!(result, Err(ParseError::UnknownBlock { .. })));
    }

    #[test]
    fn reject_missing_header() {
        let result = parse("N: 1\nKIND: behavioral\nQ: a?");
        assert!(matches!(
            result,
            Err(ParseError::MissingHeader { field: "BLOCK" })
        ));
    }

    #[test]
    fn reject_field_before_number() {
        let result = parse(&format!("{HEADER}\nKIND: mental_math\nQ: a?\nA: 1"));
        assert!(matches!(result, Err(ParseError::OrphanField { .. })));
    }

    #[test]
    fn reject_empty_content() {
        assert!(matches!(parse("   \n  "), Err(ParseError::EmptyFile)));
    }
}
