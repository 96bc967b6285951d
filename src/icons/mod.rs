//! Icons and glyph constants used throughout the UI.

// Spinner animation frames (braille characters)
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// Selection/Navigation indicators
pub const SELECTOR: &str = "▶ ";

// Cursor
pub const CURSOR: &str = "█";

// List/UI elements
pub const BULLET: &str = "•";
