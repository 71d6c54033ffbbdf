//! Hugo content generation from Movable Type exports.
//!
//! Turns the entries produced by `mtexport-parser` into Markdown files with
//! TOML front matter, one file per entry:
//!
//! ```text
//! +++
//! date = "2015-03-14T09:26:53+09:00"
//! draft = false
//! title = "Hello"
//! tags = ["rust"]
//! +++
//! <p>Body</p>
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod front_matter;
pub mod output;
pub mod post;

pub use config::ConvertConfig;
pub use convert::{ConversionReport, Converter, EntryOutcome};
pub use error::{EntryError, Error, Result};
pub use post::{Post, PostContext};
