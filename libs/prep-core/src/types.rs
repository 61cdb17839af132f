//! Core types for the interview prep question bank.

use serde::{Deserialize, Serialize};

/// Top-level practice track, used to namespace progress and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Sales,
    Trading,
    Quant,
}

impl BlockType {
    /// Get the block name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Trading => "trading",
            Self::Quant => "quant",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sales" => Some(Self::Sales),
            "trading" => Some(Self::Trading),
            "quant" => Some(Self::Quant),
            _ => None,
        }
    }
}

/// A question graded automatically against a canonical answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedQuestion {
    pub number: u32,
    pub prompt: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A free-response question with no canonical answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenQuestion {
    pub number: u32,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

/// Question variants, discriminated by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    MentalMath(GradedQuestion),
    Probability(GradedQuestion),
    Trading(GradedQuestion),
    MachineLearning(GradedQuestion),
    Behavioral(OpenQuestion),
}

impl Question {
    /// Position of the question within its set.
    pub fn number(&self) -> u32 {
        match self {
            Self::MentalMath(q)
            | Self::Probability(q)
            | Self::Trading(q)
            | Self::MachineLearning(q) => q.number,
            Self::Behavioral(q) => q.number,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Self::MentalMath(q)
            | Self::Probability(q)
            | Self::Trading(q)
            | Self::MachineLearning(q) => &q.prompt,
            Self::Behavioral(q) => &q.prompt,
        }
    }

    /// The canonical answer, when the question is auto-graded.
    pub fn canonical_answer(&self) -> Option<&str> {
        match self {
            Self::MentalMath(q)
            | Self::Probability(q)
            | Self::Trading(q)
            | Self::MachineLearning(q) => Some(&q.answer),
            Self::Behavioral(_) => None,
        }
    }

    /// Explanation (graded) or guidance (behavioral), if any.
    pub fn notes(&self) -> Option<&str> {
        match self {
            Self::MentalMath(q)
            | Self::Probability(q)
            | Self::Trading(q)
            | Self::MachineLearning(q) => q.explanation.as_deref(),
            Self::Behavioral(q) => q.guidance.as_deref(),
        }
    }

    /// The discriminant as it appears in files and API payloads.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::MentalMath(_) => "mental_math",
            Self::Probability(_) => "probability",
            Self::Trading(_) => "trading",
            Self::MachineLearning(_) => "machine_learning",
            Self::Behavioral(_) => "behavioral",
        }
    }
}

/// An ordered set of questions for one section of a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub block: BlockType,
    pub section: String,
    pub title: String,
    pub questions: Vec<Question>,
}

impl QuestionSet {
    /// Look up a question by its number.
    pub fn question(&self, number: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.number() == number)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
