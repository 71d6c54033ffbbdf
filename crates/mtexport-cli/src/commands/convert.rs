//! The convert command
//!
//! Layers configuration (defaults, then the config file, then flags),
//! runs the batch, and prints a summary of written and skipped entries.

use std::path::PathBuf;

use colored::Colorize;
use serde_json::{Value, json};

use mtexport_hugo::{ConversionReport, ConvertConfig, Converter};

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Arguments of the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub source: SourceArgs,
    pub output_dir: Option<PathBuf>,
    pub timezone: Option<String>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
}

/// Build the effective configuration for a run
pub fn resolve_config(args: &ConvertArgs) -> Result<ConvertConfig> {
    let mut config = match &args.config {
        Some(path) => ConvertConfig::load(path)?,
        None => ConvertConfig::default(),
    };

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(timezone) = &args.timezone {
        config.timezone = timezone.clone();
    }
    config
        .extra_multiline_keys
        .extend(args.source.multiline_keys.iter().cloned());

    tracing::debug!(?config, "Resolved config");
    Ok(config)
}

/// Run the convert command
pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let input = &args.source.input;
    if !input.is_file() {
        return Err(CliError::user(format!(
            "Input file not found: {}",
            input.display()
        )));
    }

    let config = resolve_config(args)?;
    let converter = Converter::new(config)?.dry_run(args.dry_run);

    if !args.json {
        println!(
            "{} Converting {}...",
            "=>".blue().bold(),
            input.display()
        );
    }

    let report = converter.convert_file(input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn report_json(report: &ConversionReport) -> Value {
    let entries: Vec<Value> = report
        .outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(path) => json!({
                "index": outcome.index,
                "basename": outcome.basename,
                "status": "written",
                "path": path.display().to_string(),
            }),
            Err(e) => json!({
                "index": outcome.index,
                "basename": outcome.basename,
                "status": "failed",
                "error": e.to_string(),
            }),
        })
        .collect();

    json!({
        "dry_run": report.dry_run,
        "written": report.written().count(),
        "failed": report.failed().count(),
        "entries": entries,
    })
}

fn print_summary(report: &ConversionReport) {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    for path in report.written() {
        println!("   {} {} {}", "+".green(), verb, path.display().to_string().cyan());
    }

    let failed: Vec<_> = report.failed().collect();
    for (outcome, e) in &failed {
        println!(
            "   {} entry #{} ({}): {}",
            "!".red(),
            outcome.index + 1,
            outcome.basename.as_deref().unwrap_or("no basename").dimmed(),
            e
        );
    }

    println!();
    let written = report.written().count();
    if failed.is_empty() {
        println!("{} {} written.", "OK".green().bold(), written);
    } else {
        println!(
            "{} {} written, {} skipped.",
            "PARTIAL".yellow().bold(),
            written,
            failed.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: PathBuf) -> ConvertArgs {
        ConvertArgs {
            source: SourceArgs {
                input,
                multiline_keys: Vec::new(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("mtexport.toml");
        fs::write(
            &config_path,
            "output_dir = \"from-file\"\ntimezone = \"UTC\"\n",
        )
        .unwrap();

        let mut args = args(PathBuf::from("export.txt"));
        args.config = Some(config_path);
        args.timezone = Some("Europe/Paris".to_string());
        args.source.multiline_keys = vec!["GALLERY".to_string()];

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("from-file"));
        assert_eq!(config.timezone, "Europe/Paris");
        assert_eq!(config.extra_multiline_keys, vec!["IMAGE", "GALLERY"]);
    }

    #[test]
    fn test_missing_input_is_user_error() {
        let temp = TempDir::new().unwrap();
        let err = run_convert(&args(temp.path().join("missing.txt"))).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }

    #[test]
    fn test_report_json_shape() {
        let temp = TempDir::new().unwrap();
        let config = ConvertConfig {
            output_dir: temp.path().to_path_buf(),
            timezone: "UTC".to_string(),
            ..Default::default()
        };
        let input = "BASENAME: a\nDATE: 01/01/2020 00:00:00\n--------\nSTATUS: ?\n--------\n";
        let report = Converter::new(config)
            .unwrap()
            .convert_reader(input.as_bytes())
            .unwrap();

        let value = report_json(&report);
        assert_eq!(value["written"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["entries"][0]["status"], "written");
        assert_eq!(value["entries"][1]["status"], "failed");
        assert_eq!(value["entries"][1]["basename"], Value::Null);
    }
}
