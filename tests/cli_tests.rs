//! Additional tests for CLI argument handling and format selection

use chatview::cli::Args;
use chatview::format::OutputFormat;
use clap::Parser;
use std::str::FromStr;

#[test]
fn test_output_format_from_str_all_variants() {
    assert_eq!(OutputFormat::from_str("json"), Ok(OutputFormat::Json));
    assert_eq!(OutputFormat::from_str("jsonl"), Ok(OutputFormat::Jsonl));
    assert_eq!(OutputFormat::from_str("ndjson"), Ok(OutputFormat::Jsonl));

    // Case variations
    assert!(OutputFormat::from_str("JSON").is_ok());
    assert!(OutputFormat::from_str("Jsonl").is_ok());
    assert!(OutputFormat::from_str("NDJSON").is_ok());
}

#[test]
fn test_output_format_from_str_errors() {
    assert!(OutputFormat::from_str("").is_err());
    assert!(OutputFormat::from_str("csv").is_err());
    assert!(OutputFormat::from_str("xml").is_err());

    let err = OutputFormat::from_str("yaml").unwrap_err();
    assert!(err.contains("yaml"));
    assert!(err.contains("jsonl"));
}

#[test]
fn test_output_format_from_path() {
    assert_eq!(OutputFormat::from_path("out/chat.json"), Ok(OutputFormat::Json));
    assert_eq!(OutputFormat::from_path("CHAT.JSONL"), Ok(OutputFormat::Jsonl));
    assert!(OutputFormat::from_path("chat").is_err());
}

#[test]
fn test_output_format_metadata() {
    for format in OutputFormat::all() {
        assert!(!format.extension().is_empty());
        assert!(format.mime_type().starts_with("application/"));
        assert!(OutputFormat::all_names().contains(&format.extension()));
    }
    assert_eq!(OutputFormat::default(), OutputFormat::Json);
    assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
}

#[test]
fn test_args_output_follows_format() {
    let args = Args::parse_from(["chatview", "export.zip", "--format", "ndjson"]);
    assert_eq!(args.format, OutputFormat::Jsonl);
    assert_eq!(args.output_path(), "chat.jsonl");
}

#[test]
fn test_args_explicit_output_wins() {
    let args = Args::parse_from(["chatview", "chat.txt", "-o", "elsewhere.json", "-f", "jsonl"]);
    assert_eq!(args.output_path(), "elsewhere.json");
}

#[test]
fn test_args_reject_unknown_format() {
    assert!(Args::try_parse_from(["chatview", "chat.txt", "-f", "csv"]).is_err());
}

#[test]
fn test_args_require_input() {
    assert!(Args::try_parse_from(["chatview"]).is_err());
}

#[test]
fn test_args_self_override() {
    let args = Args::parse_from(["chatview", "chat.txt", "--self", "Zoë"]);
    assert_eq!(args.self_name.as_deref(), Some("Zoë"));
    assert!(args.from.is_none());
}
