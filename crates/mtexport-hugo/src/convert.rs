//! Batch conversion of an export into content files.
//!
//! The export is parsed in full first; a structural error aborts the run and
//! nothing is written. Entries are then converted one by one, and each one
//! gets its own [`EntryOutcome`] so a bad entry never stops the rest.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use mtexport_parser::{EntryStmt, MultilineKeys, parse};

use crate::config::ConvertConfig;
use crate::post::{Post, PostContext};
use crate::{EntryError, Error, Result, front_matter, output};

/// Result of converting one entry.
#[derive(Debug)]
pub struct EntryOutcome {
    /// 0-based position of the entry in the export.
    pub index: usize,
    /// The entry's `BASENAME`, when it has one.
    pub basename: Option<String>,
    /// Path of the written (or, in dry-run mode, planned) file.
    pub result: std::result::Result<PathBuf, EntryError>,
}

/// Per-entry results of a conversion run, in export order.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub outcomes: Vec<EntryOutcome>,
    pub dry_run: bool,
}

impl ConversionReport {
    /// Paths of every successfully converted entry.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().map(PathBuf::as_path))
    }

    /// Every entry that was skipped, with its error.
    pub fn failed(&self) -> impl Iterator<Item = (&EntryOutcome, &EntryError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|e| (outcome, e)))
    }

    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Converts exports according to one [`ConvertConfig`].
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConvertConfig,
    keys: MultilineKeys,
    context: PostContext,
    dry_run: bool,
}

impl Converter {
    /// Create a converter. Fails if the configured time zone is unknown.
    pub fn new(config: ConvertConfig) -> Result<Self> {
        let time_zone = config.time_zone()?;
        let context = PostContext::new(time_zone, config.ignored_sections.iter().cloned());
        let keys = config.multiline_keys();
        Ok(Self {
            config,
            keys,
            context,
            dry_run: false,
        })
    }

    /// Render entries without writing any files.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert the export file at `input`.
    pub fn convert_file(&self, input: &Path) -> Result<ConversionReport> {
        tracing::debug!(?input, "Opening export");
        let file = File::open(input).map_err(|e| Error::io(input, e))?;
        self.convert_reader(file)
    }

    /// Convert an export read from `reader`.
    pub fn convert_reader<R: Read>(&self, reader: R) -> Result<ConversionReport> {
        let entries = parse(reader, &self.keys)?;
        Ok(self.convert_entries(&entries))
    }

    /// Convert already-parsed entries.
    pub fn convert_entries(&self, entries: &[EntryStmt]) -> ConversionReport {
        let outcomes = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let basename = entry.field("BASENAME").map(|b| b.trim().to_string());
                let result = self.convert_entry(entry);
                if let Err(e) = &result {
                    tracing::warn!(index, basename = ?basename, "got error: {}", e);
                }
                EntryOutcome {
                    index,
                    basename,
                    result,
                }
            })
            .collect();

        ConversionReport {
            outcomes,
            dry_run: self.dry_run,
        }
    }

    /// Convert a single entry and write its content file.
    pub fn convert_entry(&self, entry: &EntryStmt) -> std::result::Result<PathBuf, EntryError> {
        let post = Post::from_entry(entry, &self.context)?;
        let rendered = front_matter::render(&post)?;
        let path = output::markdown_path(&self.config.output_dir, &post.basename);

        if self.dry_run {
            tracing::info!("[dry-run] Would write {}", path.display());
        } else {
            output::write_atomic(&path, rendered.as_bytes())?;
            tracing::info!("Wrote {}", path.display());
        }

        Ok(path)
    }
}
