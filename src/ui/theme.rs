//! Color theme constants for the Mala Junta UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for the brand, selection and focused inputs
pub const COLOR_ACCENT: Color = Color::Rgb(230, 126, 34);

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Active nav link / liked heart
pub const COLOR_ACTIVE: Color = Color::LightRed;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Success toast / info lines - green
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Inline error lines
pub const COLOR_ERROR: Color = Color::Red;

/// Tag chips
pub const COLOR_TAG: Color = Color::Cyan;

// ============================================================================
// Dialog Colors
// ============================================================================

/// Background color for dialog boxes (confirm, upload, comments)
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);
