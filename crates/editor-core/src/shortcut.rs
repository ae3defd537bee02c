#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub control: bool,
    /// Command on macOS, Windows key elsewhere.
    pub platform: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn secondary() -> Self {
        Self {
            control: true,
            ..Self::default()
        }
    }

    pub fn secondary_shift() -> Self {
        Self {
            control: true,
            shift: true,
            ..Self::default()
        }
    }

    /// Either Ctrl or Cmd, the editing modifier on every platform.
    pub fn is_secondary(&self) -> bool {
        self.control || self.platform
    }
}

/// A key press as seen by the editor. `key` uses lowercase names such as
/// `"b"`, `"up"`, `"enter"` and `"escape"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    pub fn plain(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::none())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    Undo,
    Redo,
}

impl Shortcut {
    pub fn from_key(input: &KeyInput) -> Option<Self> {
        let modifiers = input.modifiers;
        // Alt combinations type characters on some layouts (AltGr).
        if !modifiers.is_secondary() || modifiers.alt {
            return None;
        }
        match (input.key.to_ascii_lowercase().as_str(), modifiers.shift) {
            ("b", false) => Some(Shortcut::ToggleBold),
            ("i", false) => Some(Shortcut::ToggleItalic),
            ("u", false) => Some(Shortcut::ToggleUnderline),
            ("z", false) => Some(Shortcut::Undo),
            ("z", true) => Some(Shortcut::Redo),
            _ => None,
        }
    }
}

/// Whether the host should suppress its own handling of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

impl KeyOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, KeyOutcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_modifier_combos_map_to_shortcuts() {
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("b", Modifiers::secondary())),
            Some(Shortcut::ToggleBold)
        );
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("Z", Modifiers::secondary_shift())),
            Some(Shortcut::Redo)
        );
        assert_eq!(Shortcut::from_key(&KeyInput::plain("b")), None);
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("s", Modifiers::secondary())),
            None
        );
    }

    #[test]
    fn shift_and_alt_variants_are_not_shortcuts() {
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("i", Modifiers::secondary_shift())),
            None
        );
        let alt = Modifiers {
            alt: true,
            ..Modifiers::secondary()
        };
        assert_eq!(Shortcut::from_key(&KeyInput::new("z", alt)), None);
        assert_eq!(Shortcut::from_key(&KeyInput::new("b", alt)), None);
    }

    #[test]
    fn platform_modifier_counts_as_secondary() {
        let modifiers = Modifiers {
            platform: true,
            ..Modifiers::default()
        };
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("u", modifiers)),
            Some(Shortcut::ToggleUnderline)
        );
    }
}
