//! score-cli: score one or many symbols from JSON fundamentals and technicals.
//!
//! Usage:
//!   score-cli --input aapl.json
//!   cat watchlist.json | score-cli --summary
//!   score-cli --input watchlist.json --pretty
//!
//! Input is a single `ComprehensiveInput` object or an array of them.

mod config;

use anyhow::Context;
use composite_scoring::{rank_by_total, CompositeScoringEngine};
use config::CliConfig;
use scoring_core::{ComprehensiveInput, CompositeScore};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScoreRequest {
    Batch(Vec<ComprehensiveInput>),
    Single(ComprehensiveInput),
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "score_cli=info,composite_scoring=warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = CliConfig::from_env_and_args(&args);

    let raw = read_input(&config)?;
    let request = parse_request(&raw)?;
    let engine = CompositeScoringEngine::new();

    let output = match request {
        ScoreRequest::Single(input) => {
            tracing::info!("Scoring {}", input.symbol);
            let score = engine.score(&input);
            if config.summary {
                println!("{}", summary_line(&score));
                return Ok(());
            }
            to_json(&score, config.pretty)?
        }
        ScoreRequest::Batch(inputs) => {
            if inputs.is_empty() {
                tracing::warn!("Input array is empty, nothing to score");
            }
            let mut scores = engine.score_batch(&inputs);
            if config.summary {
                rank_by_total(&mut scores);
                for score in &scores {
                    println!("{}", summary_line(score));
                }
                return Ok(());
            }
            to_json(&scores, config.pretty)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn read_input(config: &CliConfig) -> anyhow::Result<String> {
    match &config.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_request(raw: &str) -> anyhow::Result<ScoreRequest> {
    serde_json::from_str(raw)
        .context("Input must be a ComprehensiveInput object or an array of them")
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize scores")
}

fn summary_line(score: &CompositeScore) -> String {
    format!("{:<8}  {:>5.1}  {}", score.symbol, score.total_score, score.grade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::Grade;

    #[test]
    fn test_parse_single_object() {
        let raw = r#"{
            "symbol": "AAPL",
            "quality": {"roe": 22.0, "debtToEquity": "None"},
            "value": {"peRatio": "28.5", "sector": "Technology"}
        }"#;
        match parse_request(raw).unwrap() {
            ScoreRequest::Single(input) => {
                assert_eq!(input.symbol, "AAPL");
                assert_eq!(input.quality.roe, Some(22.0));
                assert_eq!(input.quality.debt_to_equity, None);
                assert_eq!(input.value.pe_ratio, Some(28.5));
                assert_eq!(input.momentum.rsi, None);
            }
            other => panic!("expected single input, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_batch() {
        let raw = r#"[{"symbol": "AAPL"}, {"symbol": "MSFT", "momentum": {"rsi": 55}}]"#;
        match parse_request(raw).unwrap() {
            ScoreRequest::Batch(inputs) => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(inputs[1].momentum.rsi, Some(55.0));
            }
            other => panic!("expected batch input, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse_request("not json").is_err());
        assert!(parse_request(r#"{"quality": {}}"#).is_err());
    }

    #[test]
    fn test_summary_line() {
        let score = CompositeScoringEngine::new().score(&ComprehensiveInput {
            symbol: "NULL".to_string(),
            ..Default::default()
        });
        let line = summary_line(&score);
        assert!(line.starts_with("NULL"));
        assert!(line.contains(&format!("{:.1}", score.total_score)));
        assert!(line.ends_with(Grade::F.as_str()));
    }

    #[test]
    fn test_to_json_shapes() {
        let score = CompositeScoringEngine::new().score(&ComprehensiveInput {
            symbol: "NULL".to_string(),
            ..Default::default()
        });
        let compact = to_json(&score, false).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains("\"totalScore\""));
        assert!(to_json(&vec![score], true).unwrap().starts_with("[\n"));
    }
}
