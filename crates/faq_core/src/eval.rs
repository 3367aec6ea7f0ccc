use std::time::Instant;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::Decision;
use crate::retrieval::QueryMatcher;

/// What a labelled case expects from the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    AnyHit,
    Hit(String),
    Miss,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvalCase {
    pub case_id: String,
    pub question: String,
    // absent -> any hit, null -> miss, "text" -> hit on that phrasing
    #[serde(default, deserialize_with = "deserialize_present_nullable")]
    pub expected_phrasing: Option<Option<String>>,
}

fn deserialize_present_nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

impl EvalCase {
    pub fn expectation(&self) -> Expectation {
        match &self.expected_phrasing {
            None => Expectation::AnyHit,
            Some(None) => Expectation::Miss,
            Some(Some(p)) => Expectation::Hit(p.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalOutcome {
    pub case_id: String,
    pub passed: bool,
    pub decision: Decision,
    pub phrasing: Option<String>,
    pub score: f32,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f32,
    pub outcomes: Vec<EvalOutcome>,
}

impl EvalSummary {
    pub fn meets(&self, required_pass_rate: f32) -> bool {
        self.pass_rate >= required_pass_rate
    }
}

pub fn evaluate_cases(matcher: &QueryMatcher, cases: &[EvalCase]) -> EvalSummary {
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let start = Instant::now();
        let result = matcher.decide(&case.question);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let passed = match (case.expectation(), result.hit()) {
            (Expectation::AnyHit, hit) => hit.is_some(),
            (Expectation::Miss, hit) => hit.is_none(),
            (Expectation::Hit(expected), hit) => hit == Some(expected.as_str()),
        };

        outcomes.push(EvalOutcome {
            case_id: case.case_id.clone(),
            passed,
            decision: result.decision,
            phrasing: result.phrasing,
            score: result.score,
            latency_ms,
        });
    }

    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = total.saturating_sub(passed);
    let pass_rate = if total == 0 {
        0.0
    } else {
        passed as f32 / total as f32
    };

    EvalSummary {
        total,
        passed,
        failed,
        pass_rate,
        outcomes,
    }
}
