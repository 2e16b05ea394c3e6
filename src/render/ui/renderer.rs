//! Frame output seam.
//!
//! The render loop only ever hands a finished [`ViewState`] to a `UIRenderer`; it never touches
//! the terminal directly. Tests swap in a recording renderer.

use crate::error::Result;
use crate::render::ui::state::ViewState;

/// Draws browser frames and owns the terminal while the app runs.
pub trait UIRenderer {
    /// Draw one frame: filters, search box, the visible slice of the table, the status line,
    /// and the notice popup if one is open.
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Take over the terminal before the first frame.
    fn initialize(&mut self) -> Result<()>;

    /// Give the terminal back. Called even when the session ended with an error.
    fn cleanup(&mut self) -> Result<()>;

    /// Current `(width, height)` in cells.
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
