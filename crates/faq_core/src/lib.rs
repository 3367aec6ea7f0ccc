pub mod error;
pub mod eval;
pub mod language;
pub mod model;
pub mod responder;
pub mod retrieval;
pub mod speech;
pub mod storage;
pub mod tfidf;

pub use error::{FaqError, Result};
pub use eval::{evaluate_cases, EvalCase, EvalOutcome, EvalSummary, Expectation};
pub use language::{localized_text, Language, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
pub use model::{Answer, Decision, FaqData, FaqEntry, MatchOutcome};
pub use responder::{QueryRequest, QueryResponse, Responder};
pub use retrieval::{best_index, passes_threshold, QueryMatcher, DEFAULT_SIMILARITY_THRESHOLD};
pub use speech::SpeechSynthesizer;
pub use storage::load_faq_file;
pub use tfidf::{cosine_similarity, tokenize, SparseVector, TfidfVectorizer};
