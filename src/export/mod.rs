//! Export pipeline: one validated record, three output formats.
//!
//! - [`text`]: EES-ready plain text with per-block character ceilings
//! - [`pdf`]: paginated letter-size PDF
//! - [`docx`]: editable Word document
//!
//! The PDF and DOCX renderers share section order and field selection;
//! each exposes `section_labels()` so tests can hold them equal.

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::generate_docx;
pub use pdf::generate_pdf;
pub use text::{character_budget, generate_compact_ees_text, generate_ees_text};
