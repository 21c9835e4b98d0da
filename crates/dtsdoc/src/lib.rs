#![deny(clippy::all)]
// dtsdoc reads declaration sources and writes Markdown through std::fs
#![allow(clippy::disallowed_methods)]

//! API documentation generation for TypeScript declaration files.
//!
//! This crate provides:
//! - A documentation model ([`DocEntry`]) for declared symbols.
//! - A parser that extracts JSDoc comments and declaration shapes using OXC.
//! - A tree walker over declaration directories.
//! - A merger that folds declaration fragments sharing a name into one record.
//! - Generators for Markdown pages and JSON dumps.
//! - A writer and the end-to-end [`generate`] pipeline.

pub mod error;
pub mod extractor;
pub mod generators;
pub mod jsdoc;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod platform;
pub mod walker;
pub mod writer;

pub use error::{DocsError, Result};
pub use extractor::{DocsExtractor, ExtractOptions};
pub use generators::markdown::{render_markdown, RenderedDoc};
pub use merge::merge;
pub use model::{DocEntry, EntryFlags, EntryKind, JsTag};
pub use pipeline::{generate, DocsOptions, GenerateReport, OutputFormat};
pub use platform::{default_platforms, Platform, DEFAULT_PLATFORMS};
pub use walker::{walk, WalkOptions, DEFAULT_EXCLUDES};

#[cfg(feature = "json")]
pub use generators::json::render_json;
