//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the save shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
///
/// Ctrl+S works everywhere; this is the fallback modifier for `W`.
#[cfg(target_os = "macos")]
pub const SAVE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SAVE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display for hints
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Fallback save shortcut display
/// - macOS: "Cmd+W"
/// - Linux/Windows: "Ctrl+W"
#[cfg(target_os = "macos")]
pub const SAVE_FALLBACK_SHORTCUT: &str = "Cmd+W";

#[cfg(not(target_os = "macos"))]
pub const SAVE_FALLBACK_SHORTCUT: &str = "Ctrl+W";
