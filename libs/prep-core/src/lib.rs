//! Core library shared by the QuantDrill backend.
//!
//! Provides:
//! - Free-text answer equivalence checking (numeric extraction with
//!   tolerance-based comparison, text fallbacks)
//! - Question-set file parser
//! - Shared types (Question, QuestionSet, BlockType)

pub mod checker;
pub mod error;
pub mod numeric;
pub mod parser;
pub mod types;

pub use checker::check_answer;
pub use error::{ParseError, Result};
pub use numeric::extract_number;
pub use parser::parse;
pub use types::{BlockType, GradedQuestion, OpenQuestion, Question, QuestionSet};
