use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use faq_core::{
    evaluate_cases, load_faq_file, localized_text, EvalCase, QueryMatcher,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use std::fs::File;
use std::path::{Path, PathBuf};

const DEFAULT_REQUIRED_PASS_RATE: f32 = 0.85;

#[derive(Debug, Parser)]
#[command(name = "faq")]
#[command(about = "Offline tooling for the FAQ question matcher")]
struct Cli {
    /// FAQ data file ({"faqs": [{"questions": [...], "answer": {...}}]}).
    #[arg(long, global = true, default_value = "faq_data.json")]
    faq_path: PathBuf,

    #[arg(long, global = true, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    threshold: f32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Query {
        #[arg(long)]
        question: String,
        #[arg(long, default_value = "en")]
        language: String,
    },
    Eval {
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, default_value_t = DEFAULT_REQUIRED_PASS_RATE)]
        min_pass_rate: f32,
    },
}

fn read_eval_cases_json(path: &Path) -> Result<Vec<EvalCase>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let cases: Vec<EvalCase> = serde_json::from_reader(file).context("parse eval cases json")?;
    Ok(cases)
}

fn load_matcher(cli: &Cli) -> Result<QueryMatcher> {
    let data = load_faq_file(&cli.faq_path)
        .with_context(|| format!("load {}", cli.faq_path.display()))?;
    QueryMatcher::build(&data.faqs, cli.threshold).context("build question index")
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Query { question, language } => {
            let language: faq_core::Language = language.parse()?;
            let matcher = load_matcher(&cli)?;
            let result = matcher.decide(question);

            println!(
                "decision={:?} score={:.4} phrasing={}",
                result.decision,
                result.score,
                result.phrasing.as_deref().unwrap_or("null")
            );
            let text = match result.hit().and_then(|p| matcher.answer_for(p)) {
                Some(answer) => localized_text(answer, language)?,
                None => language.not_found_message(),
            };
            println!("answer={text}");
        }
        Commands::Eval {
            cases,
            min_pass_rate,
        } => {
            let matcher = load_matcher(&cli)?;
            let cases = read_eval_cases_json(cases)?;
            let summary = evaluate_cases(&matcher, &cases);

            println!(
                "total={} passed={} failed={} pass_rate={:.4} required={:.4} threshold={:.2}",
                summary.total,
                summary.passed,
                summary.failed,
                summary.pass_rate,
                min_pass_rate,
                matcher.threshold()
            );

            for o in &summary.outcomes {
                println!(
                    "case={} passed={} decision={:?} phrasing={} score={:.4} latency={:.3}ms",
                    o.case_id,
                    o.passed,
                    o.decision,
                    o.phrasing.as_deref().unwrap_or("null"),
                    o.score,
                    o.latency_ms
                );
            }

            if !summary.meets(*min_pass_rate) {
                anyhow::bail!(
                    "pass rate {:.4} below required {:.4}",
                    summary.pass_rate,
                    min_pass_rate
                );
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
