//! Viewport host-service contracts.

/// Host service for viewport side effects requested by navigation.
pub trait ViewportService {
    /// Scrolls the document to the top.
    fn scroll_to_top(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op viewport service for headless targets.
pub struct NoopViewportService;

impl ViewportService for NoopViewportService {
    fn scroll_to_top(&self) {}
}
