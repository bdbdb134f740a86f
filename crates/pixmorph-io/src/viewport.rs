//! Viewport helpers.

/// Scroll the page back to the top, as after selecting a new file.
///
/// Silently does nothing outside a browser window.
pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
