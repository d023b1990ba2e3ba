//! Configuration for a single game.

use crate::key::KeyModality;
use crate::locale::Locale;

/// Configuration for a game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible role and key draws.
    pub seed: u64,
    /// Whether larger rosters include a Blank.
    pub has_blank: bool,
    /// Whether keys are words or pictures.
    pub key_modality: KeyModality,
    /// Strings and markers used by the moderator and parsers.
    pub locale: Locale,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            has_blank: false,
            key_modality: KeyModality::Text,
            locale: Locale::english(),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable the Blank role.
    pub fn with_blank(mut self, has_blank: bool) -> Self {
        self.has_blank = has_blank;
        self
    }

    /// Deal text or image keys.
    pub fn with_modality(mut self, modality: KeyModality) -> Self {
        self.key_modality = modality;
        self
    }

    /// Language for moderator prompts and response markers.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}
