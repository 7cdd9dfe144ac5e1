//! Renderer configuration.

/// Escape hatch for internal routing: receives the (already escaped) link
/// text and the decoded target, and returns replacement HTML or `None` to
/// fall back to the default anchor rendering.
pub type LinkHandler = Box<dyn Fn(&str, &str) -> Option<String> + Send + Sync>;

/// Options recognized by [`render`](super::render).
#[derive(Default)]
pub struct RenderOptions {
    /// Derive slug ids for `#`/`##`/`###` headers so they can be anchor-linked.
    pub header_ids: bool,
    /// Wrap fenced code blocks in a container with a copy action.
    pub copy_buttons: bool,
    /// Optional override for `[text](url)` rendering.
    pub link_handler: Option<LinkHandler>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables header slug ids.
    pub fn with_header_ids(mut self, enabled: bool) -> Self {
        self.header_ids = enabled;
        self
    }

    /// Enables copy buttons on fenced code blocks.
    pub fn with_copy_buttons(mut self, enabled: bool) -> Self {
        self.copy_buttons = enabled;
        self
    }

    /// Installs a link handler consulted before the default anchor rendering.
    pub fn with_link_handler(mut self, handler: LinkHandler) -> Self {
        self.link_handler = Some(handler);
        self
    }
}
