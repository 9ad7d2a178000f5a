//! Persona/system prompt loading.
//!
//! The persona text itself is operator-supplied content, loaded from a file
//! path in config. A terse built-in style prompt is always present; the file
//! content is appended when available.

use tracing::warn;

/// Always-on style instruction, independent of any persona file.
const STYLE_PROMPT: &str = "keep your responses as short as possible. and human like.";

#[derive(Debug, Clone)]
pub struct PersonaPrompt {
    system: String,
}

impl PersonaPrompt {
    /// Load the persona from `path`, combining it with the built-in style
    /// prompt. A missing or unreadable file falls back to the style prompt
    /// alone.
    pub fn load(path: Option<&str>) -> Self {
        let persona = match path {
            Some(p) => match std::fs::read_to_string(p) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(path = %p, error = %e, "persona file unreadable — using built-in prompt");
                    None
                }
            },
            None => None,
        };

        let system = match persona {
            Some(text) if !text.trim().is_empty() => {
                format!("{STYLE_PROMPT}\n\n{}", text.trim())
            }
            _ => STYLE_PROMPT.to_string(),
        };

        Self { system }
    }

    pub fn system(&self) -> &str {
        &self.system
    }
}

impl Default for PersonaPrompt {
    fn default() -> Self {
        Self::load(None)
    }
}
