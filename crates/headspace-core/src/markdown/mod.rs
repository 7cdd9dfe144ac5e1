//! Markdown-to-HTML rendering for agent output panels.
//!
//! Converts the restricted markdown dialect used by agent transcripts into
//! sanitized HTML. The whole input is HTML-escaped before any structural
//! tags are reintroduced, so user-controlled text can never smuggle markup
//! into the page.

pub mod escape;
pub mod links;
mod options;
mod render;

pub use links::is_safe_url;
pub use options::{LinkHandler, RenderOptions};
pub use render::render;
