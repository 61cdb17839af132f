//! Test fixtures and factory functions for creating test data.

use serde_json::json;

/// Quant question set used by practice tests.
///
/// Question 1 has a plain numeric answer, question 2 a fraction, question 3
/// is behavioral (ungraded).
const QUANT_SET: &str = "\
BLOCK: quant
SECTION: mental-math
TITLE: Mental Math

N: 1
KIND: mental_math
Q: What is 17 x 23?
A: 391

N: 2
KIND: probability
Q: What is 37.5% as a fraction?
A: 3/8

N: 3
KIND: behavioral
Q: Why quant?
E: Keep it short.
";

const TRADING_SET: &str = "\
BLOCK: trading
SECTION: order-basics
TITLE: Order Basics

N: 1
KIND: trading
Q: Bid 99.50, ask 99.54. Spread in ticks of 0.01?
A: 4
";

/// Question-set sources used to build the in-memory test bank.
pub fn bank_sources() -> Vec<(String, String)> {
    vec![
        ("mental-math.txt".to_string(), QUANT_SET.to_string()),
        ("order-basics.txt".to_string(), TRADING_SET.to_string()),
    ]
}

/// Create a register request body.
pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "display_name": n }),
        None => json!({}),
    }
}

/// Create a submit answer request body.
pub fn submit_answer_request(
    section: &str,
    question_number: u32,
    answer: &str,
) -> serde_json::Value {
    json!({
        "section": section,
        "question_number": question_number,
        "answer": answer
    })
}

/// Create an article request body.
pub fn create_article_request(title: &str, body: &str) -> serde_json::Value {
    json!({ "title": title, "body": body })
}

/// Create a comment request body.
pub fn create_comment_request(body: &str) -> serde_json::Value {
    json!({ "body": body })
}
