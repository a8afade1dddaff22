use super::action::Action;
use crate::app::persistence;
use crate::domain::transcript_layout::PointStep;
use crate::theme::PaletteType;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub profile: String,
    pub theme: Option<PaletteType>,
    pub custom: Option<HashMap<String, String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            profile: "vim".to_string(),
            theme: None,
            custom: None,
        }
    }
}

impl KeyConfig {
    /// Read `~/.config/riposte/config.toml`, falling back to the defaults
    /// when the file is missing or malformed.
    #[must_use]
    pub fn load() -> Self {
        persistence::config_file("config.toml")
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }
}

/// Bindings for transcript focus. Composer focus feeds keys to the text
/// area instead and never consults this table.
#[derive(Debug, PartialEq)]
pub struct KeyMap {
    pub transcript: HashMap<KeyEvent, Action>,
}

impl KeyMap {
    #[must_use]
    pub fn from_config(config: &KeyConfig) -> Self {
        let mut transcript = HashMap::new();

        transcript.insert(key(KeyCode::Char('q')), Action::Quit);
        transcript.insert(key(KeyCode::Char('?')), Action::ToggleHelp);
        transcript.insert(key(KeyCode::Char('t')), Action::EnterThemeSelection);
        transcript.insert(key(KeyCode::Tab), Action::FocusComposer);
        transcript.insert(key(KeyCode::Enter), Action::ActivateFollowUp);
        transcript.insert(key(KeyCode::Esc), Action::CancelMode);

        transcript.insert(key(KeyCode::Char('j')), Action::ScrollTranscript(1));
        transcript.insert(key(KeyCode::Down), Action::ScrollTranscript(1));
        transcript.insert(key(KeyCode::Char('k')), Action::ScrollTranscript(-1));
        transcript.insert(key(KeyCode::Up), Action::ScrollTranscript(-1));
        transcript.insert(key(KeyCode::PageDown), Action::ScrollTranscript(10));
        transcript.insert(key(KeyCode::PageUp), Action::ScrollTranscript(-10));

        transcript.insert(
            shifted(KeyCode::Left),
            Action::ExtendSelection(PointStep::CharLeft),
        );
        transcript.insert(
            shifted(KeyCode::Right),
            Action::ExtendSelection(PointStep::CharRight),
        );
        transcript.insert(
            shifted(KeyCode::Up),
            Action::ExtendSelection(PointStep::RowUp),
        );
        transcript.insert(
            shifted(KeyCode::Down),
            Action::ExtendSelection(PointStep::RowDown),
        );

        if let Some(custom) = &config.custom {
            for (key_str, action_str) in custom {
                if let (Some(event), Some(action)) = (parse_key(key_str), parse_action(action_str))
                {
                    transcript.insert(event, action);
                }
            }
        }

        Self { transcript }
    }

    #[must_use]
    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        if let Some(action) = self.transcript.get(&event) {
            return Some(action.clone());
        }
        // Shifted symbols ('?') arrive with the modifier set; retry bare.
        if event.modifiers.contains(KeyModifiers::SHIFT)
            && matches!(event.code, KeyCode::Char(_))
        {
            let mut bare = event;
            bare.modifiers.remove(KeyModifiers::SHIFT);
            return self.transcript.get(&bare).cloned();
        }
        None
    }
}

fn key(code: impl Into<KeyCode>) -> KeyEvent {
    KeyEvent::new(code.into(), KeyModifiers::empty())
}

fn shifted(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

fn parse_key(binding: &str) -> Option<KeyEvent> {
    let binding = binding.to_lowercase();
    let (modifiers, name) = match binding.split_once('+') {
        Some(("shift", rest)) => (KeyModifiers::SHIFT, rest),
        Some(("ctrl", rest)) => (KeyModifiers::CONTROL, rest),
        Some(_) => return None,
        None => (KeyModifiers::empty(), binding.as_str()),
    };
    let code = match name {
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "enter" => KeyCode::Enter,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };
    Some(KeyEvent::new(code, modifiers))
}

fn parse_action(name: &str) -> Option<Action> {
    match name {
        "quit" => Some(Action::Quit),
        "help" => Some(Action::ToggleHelp),
        "theme" => Some(Action::EnterThemeSelection),
        "compose" => Some(Action::FocusComposer),
        "quote" => Some(Action::ActivateFollowUp),
        "cancel" => Some(Action::CancelMode),
        "scroll-down" => Some(Action::ScrollTranscript(1)),
        "scroll-up" => Some(Action::ScrollTranscript(-1)),
        "page-down" => Some(Action::ScrollTranscript(10)),
        "page-up" => Some(Action::ScrollTranscript(-10)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_binds_scrolling() {
        let map = KeyMap::from_config(&KeyConfig::default());
        assert_eq!(
            map.get_action(key(KeyCode::Char('j'))),
            Some(Action::ScrollTranscript(1))
        );
        assert_eq!(
            map.get_action(shifted(KeyCode::Up)),
            Some(Action::ExtendSelection(PointStep::RowUp))
        );
    }

    #[test]
    fn shifted_symbol_falls_back_to_bare_binding() {
        let map = KeyMap::from_config(&KeyConfig::default());
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(map.get_action(question), Some(Action::ToggleHelp));
    }

    #[test]
    fn custom_bindings_override_defaults() {
        let mut custom = HashMap::new();
        custom.insert("x".to_string(), "quit".to_string());
        custom.insert("ctrl+d".to_string(), "page-down".to_string());
        let config = KeyConfig {
            custom: Some(custom),
            ..KeyConfig::default()
        };
        let map = KeyMap::from_config(&config);
        assert_eq!(map.get_action(key(KeyCode::Char('x'))), Some(Action::Quit));
        assert_eq!(
            map.get_action(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Action::ScrollTranscript(10))
        );
    }

    #[test]
    fn unknown_custom_entries_are_ignored() {
        let mut custom = HashMap::new();
        custom.insert("hyper+q".to_string(), "quit".to_string());
        custom.insert("q".to_string(), "launch-missiles".to_string());
        let config = KeyConfig {
            custom: Some(custom),
            ..KeyConfig::default()
        };
        let map = KeyMap::from_config(&config);
        assert_eq!(map.get_action(key(KeyCode::Char('q'))), Some(Action::Quit));
    }
}
