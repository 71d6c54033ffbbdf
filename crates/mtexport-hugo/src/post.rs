//! Extraction of a [`Post`] from a parsed entry.
//!
//! This is where field values get meaning. Anything that does not fit is an
//! [`EntryError`] for this entry only.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use mtexport_parser::{EntryStmt, FieldStmt, MultilineSectionStmt, SectionStmt};

use crate::EntryError;

/// Multi-line section holding the post content.
pub const BODY_KEY: &str = "BODY";

/// Accepted `DATE` layouts, tried in order.
pub const DATE_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %I:%M:%S %p"];

/// Settings shared by every entry of a run.
#[derive(Debug, Clone)]
pub struct PostContext {
    pub time_zone: Tz,
    pub ignored_sections: BTreeSet<String>,
}

impl PostContext {
    pub fn new<I, S>(time_zone: Tz, ignored_sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            time_zone,
            ignored_sections: ignored_sections.into_iter().map(Into::into).collect(),
        }
    }
}

/// The data a content file is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub basename: String,
    pub tags: Vec<String>,
    pub draft: bool,
    pub title: String,
    pub date: DateTime<Tz>,
    pub content: String,
}

#[derive(Default)]
struct PostBuilder {
    basename: Option<String>,
    tags: Vec<String>,
    draft: bool,
    title: String,
    date: Option<DateTime<Tz>>,
    content: String,
}

impl Post {
    /// Build a post from one entry.
    pub fn from_entry(entry: &EntryStmt, ctx: &PostContext) -> Result<Self, EntryError> {
        let mut builder = PostBuilder::default();

        for section in &entry.sections {
            match section {
                SectionStmt::Normal(normal) => {
                    for field in &normal.fields {
                        builder.apply_field(field, ctx)?;
                    }
                }
                SectionStmt::Multiline(block) => builder.apply_block(block, ctx)?,
            }
        }

        builder.build()
    }
}

impl PostBuilder {
    fn apply_field(&mut self, field: &FieldStmt, ctx: &PostContext) -> Result<(), EntryError> {
        let value = field.value.trim();
        match field.key.as_str() {
            "TITLE" => self.title = value.to_string(),
            "STATUS" => self.draft = parse_status(value)?,
            "DATE" => self.date = Some(parse_date(value, ctx.time_zone)?),
            "BASENAME" => self.basename = Some(value.to_string()),
            "CATEGORY" => self.tags.push(value.to_string()),
            _ => {}
        }
        Ok(())
    }

    fn apply_block(
        &mut self,
        block: &MultilineSectionStmt,
        ctx: &PostContext,
    ) -> Result<(), EntryError> {
        match block.key.as_str() {
            BODY_KEY => self.content = block.body.clone(),
            key if ctx.ignored_sections.contains(key) => {
                tracing::info!(key, "{} is ignored", key);
            }
            key => {
                return Err(EntryError::UnsupportedSection {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    fn build(self) -> Result<Post, EntryError> {
        let basename = self
            .basename
            .filter(|b| !b.is_empty())
            .ok_or(EntryError::MissingField { key: "BASENAME" })?;
        check_basename(&basename)?;
        let date = self.date.ok_or(EntryError::MissingField { key: "DATE" })?;

        Ok(Post {
            basename,
            tags: self.tags,
            draft: self.draft,
            title: self.title,
            date,
            content: self.content,
        })
    }
}

/// `Draft` or `Publish`, case-insensitive. Returns the draft flag.
pub fn parse_status(value: &str) -> Result<bool, EntryError> {
    match value.to_lowercase().as_str() {
        "draft" => Ok(true),
        "publish" => Ok(false),
        _ => Err(EntryError::UnsupportedStatus {
            value: value.to_string(),
        }),
    }
}

/// Parse a `DATE` value as local time in `tz`.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
pub fn parse_date(value: &str, tz: Tz) -> Result<DateTime<Tz>, EntryError> {
    let naive = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| EntryError::InvalidDate {
            value: value.to_string(),
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| EntryError::NonexistentLocalTime {
            value: value.to_string(),
            zone: tz.name().to_string(),
        })
}

fn check_basename(basename: &str) -> Result<(), EntryError> {
    let path = Path::new(basename);
    let safe = path.is_relative()
        && !basename.ends_with('/')
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

    if safe {
        Ok(())
    } else {
        Err(EntryError::UnsafeBasename {
            basename: basename.to_string(),
        })
    }
}
