//! Statement tree produced by the parser.
//!
//! The tree is plain data: an export is a sequence of [`EntryStmt`], each
//! holding its sections in the order they appeared in the input.

use serde::Serialize;

/// One exported record (usually one blog post).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryStmt {
    pub sections: Vec<SectionStmt>,
}

/// A contiguous run of fields, or one multi-line block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionStmt {
    Normal(NormalSectionStmt),
    Multiline(MultilineSectionStmt),
}

/// Plain `KEY: value` lines. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalSectionStmt {
    pub fields: Vec<FieldStmt>,
}

/// A `KEY:` block and its verbatim body, sentinels excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultilineSectionStmt {
    pub key: String,
    pub body: String,
}

/// A single `KEY: value` line. The value is untrimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldStmt {
    pub key: String,
    pub value: String,
}

impl EntryStmt {
    pub fn new(sections: Vec<SectionStmt>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All fields across every normal section, in input order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldStmt> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                SectionStmt::Normal(normal) => Some(normal),
                SectionStmt::Multiline(_) => None,
            })
            .flat_map(|normal| normal.fields.iter())
    }

    /// The value of the first field with the given key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    /// Every multi-line section, in input order.
    pub fn multiline_sections(&self) -> impl Iterator<Item = &MultilineSectionStmt> {
        self.sections.iter().filter_map(|section| match section {
            SectionStmt::Multiline(multiline) => Some(multiline),
            SectionStmt::Normal(_) => None,
        })
    }

    /// The first multi-line section with the given key.
    pub fn multiline(&self, key: &str) -> Option<&MultilineSectionStmt> {
        self.multiline_sections().find(|section| section.key == key)
    }
}

impl NormalSectionStmt {
    pub fn new(fields: Vec<FieldStmt>) -> Self {
        Self { fields }
    }
}

impl MultilineSectionStmt {
    pub fn new(key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
        }
    }
}

impl FieldStmt {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<NormalSectionStmt> for SectionStmt {
    fn from(section: NormalSectionStmt) -> Self {
        Self::Normal(section)
    }
}

impl From<MultilineSectionStmt> for SectionStmt {
    fn from(section: MultilineSectionStmt) -> Self {
        Self::Multiline(section)
    }
}
