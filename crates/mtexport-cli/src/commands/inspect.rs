//! The inspect command: dump the parsed entries as JSON.

use std::fs::File;
use std::path::Path;

use mtexport_parser::{MultilineKeys, parse};

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Run the inspect command
pub fn run_inspect(source: &SourceArgs) -> Result<()> {
    let json = inspect_to_string(&source.input, &source.multiline_keys)?;
    println!("{}", json);
    Ok(())
}

fn inspect_to_string(input: &Path, extra_keys: &[String]) -> Result<String> {
    let file = File::open(input).map_err(|e| {
        CliError::user(format!("Cannot open {}: {}", input.display(), e))
    })?;
    let keys = MultilineKeys::builtin().with_extra(extra_keys.iter().cloned());
    let entries = parse(file, &keys)?;
    Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_outputs_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("export.txt");
        fs::write(&path, "TITLE: a\nIMAGE:\n<img>\n-----\n--------\n").unwrap();

        let json = inspect_to_string(&path, &["IMAGE".to_string()]).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let sections = &value[0]["sections"];
        assert_eq!(sections[0]["kind"], "normal");
        assert_eq!(sections[0]["fields"][0]["key"], "TITLE");
        assert_eq!(sections[1]["kind"], "multiline");
        assert_eq!(sections[1]["body"], "<img>");
    }

    #[test]
    fn test_inspect_structural_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("export.txt");
        fs::write(&path, "BODY:\nopen\n").unwrap();

        let err = inspect_to_string(&path, &[]).unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[test]
    fn test_inspect_missing_input_is_user_error() {
        let temp = TempDir::new().unwrap();
        let err = inspect_to_string(&temp.path().join("absent.txt"), &[]).unwrap_err();
        assert!(matches!(err, CliError::User { ref message } if message.starts_with("Cannot open")));
    }
}
