//! Rendering for human-facing surfaces (Markdown summaries).

#![forbid(unsafe_code)]

mod markdown;

pub use markdown::{render_audit_markdown, render_batch_markdown, render_record_markdown};
