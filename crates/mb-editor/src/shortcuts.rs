//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser bridge and native tests share one table.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Delete,
    Duplicate,
    Rotate,
    AddText,
    ArrangeGrid,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ZoomReset,

    // ── UI ──
    /// End a text edit, or drop the selection.
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"Delete"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if key == "Escape" {
            return Some(ShortcutAction::Deselect);
        }

        if cmd {
            return match key {
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" | "_" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ZoomReset),
                _ => None,
            };
        }

        // Letter keys stay free for typing with Shift/Alt.
        if shift || alt {
            return None;
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "r" | "R" => Some(ShortcutAction::Rotate),
            "g" | "G" => Some(ShortcutAction::ArrangeGrid),
            "t" | "T" => Some(ShortcutAction::AddText),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_combos() {
        assert_eq!(ShortcutMap::resolve("d", true, false, false, false), Some(ShortcutAction::Duplicate));
        assert_eq!(ShortcutMap::resolve("d", false, false, false, true), Some(ShortcutAction::Duplicate));
        assert_eq!(ShortcutMap::resolve("=", true, false, false, false), Some(ShortcutAction::ZoomIn));
        assert_eq!(ShortcutMap::resolve("-", false, false, false, true), Some(ShortcutAction::ZoomOut));
        assert_eq!(ShortcutMap::resolve("0", true, false, false, false), Some(ShortcutAction::ZoomReset));
        assert_eq!(ShortcutMap::resolve("r", true, false, false, false), None);
    }

    #[test]
    fn single_keys() {
        assert_eq!(ShortcutMap::resolve("Backspace", false, false, false, false), Some(ShortcutAction::Delete));
        assert_eq!(ShortcutMap::resolve("R", false, false, false, false), Some(ShortcutAction::Rotate));
        assert_eq!(ShortcutMap::resolve("g", false, false, false, false), Some(ShortcutAction::ArrangeGrid));
        assert_eq!(ShortcutMap::resolve("t", false, false, false, false), Some(ShortcutAction::AddText));
        assert_eq!(ShortcutMap::resolve("T", false, true, false, false), None);
    }

    #[test]
    fn escape_always_deselects() {
        assert_eq!(ShortcutMap::resolve("Escape", false, false, false, false), Some(ShortcutAction::Deselect));
        assert_eq!(ShortcutMap::resolve("Escape", true, true, false, false), Some(ShortcutAction::Deselect));
    }

    #[test]
    fn unbound_key() {
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
    }
}
