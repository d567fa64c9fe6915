//! Viewport adapter.

use platform_host::ViewportService;

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Viewport adapter backed by `window.scrollTo`.
pub struct WebViewportService;

impl ViewportService for WebViewportService {
    fn scroll_to_top(&self) {
        bridge::scroll_to_top();
    }
}
