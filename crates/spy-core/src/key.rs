//! Secret keys and the paired key pools they are drawn from.

use std::fmt;
use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::{SpyError, SpyResult};

/// How keys are presented to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyModality {
    /// Written words.
    #[default]
    Text,
    /// Pictures, referenced by path or URL.
    Image,
}

impl fmt::Display for KeyModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// The clue shown to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Key {
    /// A word or phrase.
    Text {
        /// The key itself.
        text: String,
    },
    /// A picture.
    Image {
        /// Path or URL of the image.
        url: String,
    },
}

impl Key {
    /// A text key.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An image key at `url`.
    pub fn image(url: impl Into<String>) -> Self {
        Self::Image { url: url.into() }
    }

    /// Which pool this key belongs to.
    pub fn modality(&self) -> KeyModality {
        match self {
            Self::Text { .. } => KeyModality::Text,
            Self::Image { .. } => KeyModality::Image,
        }
    }

    /// Literal text a description must not contain. Image keys have none.
    pub fn leak_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text } => write!(f, "{text}"),
            Self::Image { url } => write!(f, "[image: {url}]"),
        }
    }
}

/// A matched civilian/spy pair: similar, never identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    /// Key dealt to Civilians.
    pub civilian: Key,
    /// Key dealt to Spies.
    pub spy: Key,
}

impl KeyPair {
    /// Build a pair, rejecting identical values.
    pub fn new(civilian: Key, spy: Key) -> SpyResult<Self> {
        if civilian == spy {
            return Err(SpyError::IdenticalKeyPair(civilian.to_string()));
        }
        Ok(Self { civilian, spy })
    }
}

/// One line of a JSON-lines key file.
#[derive(Debug, Deserialize)]
struct TextPairLine {
    #[serde(rename = "Civilian")]
    civilian: String,
    #[serde(rename = "Spy")]
    spy: String,
}

/// Built-in text pairs used when no key file is given.
const BUILTIN_TEXT_PAIRS: &[(&str, &str)] = &[
    ("apple", "pear"),
    ("coffee", "tea"),
    ("piano", "guitar"),
    ("butterfly", "moth"),
    ("dumpling", "wonton"),
    ("library", "bookstore"),
    ("moon", "sun"),
    ("bicycle", "motorcycle"),
    ("lion", "tiger"),
    ("sneakers", "sandals"),
    ("river", "lake"),
    ("pillow", "blanket"),
];

/// Pools of key pairs, one per modality.
#[derive(Debug, Clone, Default)]
pub struct KeySource {
    text: Vec<KeyPair>,
    image: Vec<KeyPair>,
}

impl KeySource {
    /// An empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source holding the built-in text pairs.
    pub fn builtin() -> Self {
        let text = BUILTIN_TEXT_PAIRS
            .iter()
            .map(|(c, s)| KeyPair {
                civilian: Key::text(*c),
                spy: Key::text(*s),
            })
            .collect();
        Self {
            text,
            image: Vec::new(),
        }
    }

    /// Add a pair to the pool of its civilian key's modality.
    pub fn add(&mut self, pair: KeyPair) {
        match pair.civilian.modality() {
            KeyModality::Text => self.text.push(pair),
            KeyModality::Image => self.image.push(pair),
        }
    }

    /// Pairs available for a modality.
    pub fn pairs(&self, modality: KeyModality) -> &[KeyPair] {
        match modality {
            KeyModality::Text => &self.text,
            KeyModality::Image => &self.image,
        }
    }

    /// Parse JSON lines of `{"Civilian": "...", "Spy": "..."}`. Blank lines are skipped.
    pub fn parse_text_pairs(source: &str, path: &str) -> SpyResult<Vec<KeyPair>> {
        let mut pairs = Vec::new();
        for (i, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let raw: TextPairLine =
                serde_json::from_str(line).map_err(|source| SpyError::KeyFormat {
                    path: path.to_string(),
                    line: i + 1,
                    source,
                })?;
            pairs.push(KeyPair::new(Key::text(raw.civilian), Key::text(raw.spy))?);
        }
        Ok(pairs)
    }

    /// Load text pairs from a JSON-lines file.
    pub fn load_text_file(&mut self, path: &Path) -> SpyResult<usize> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| SpyError::KeyIo {
            path: display.clone(),
            source,
        })?;
        let pairs = Self::parse_text_pairs(&content, &display)?;
        let count = pairs.len();
        self.text.extend(pairs);
        Ok(count)
    }

    /// Load image pairs: every subdirectory holding `Civilian.jpg` and `Spy.jpg`.
    pub fn load_image_dir(&mut self, dir: &Path) -> SpyResult<usize> {
        let io_err = |source| SpyError::KeyIo {
            path: dir.display().to_string(),
            source,
        };
        let mut subdirs: Vec<_> = std::fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        subdirs.sort();

        let mut count = 0;
        for sub in subdirs {
            let civilian = sub.join("Civilian.jpg");
            let spy = sub.join("Spy.jpg");
            if !civilian.is_file() || !spy.is_file() {
                tracing::debug!(dir = %sub.display(), "skipping incomplete image pair");
                continue;
            }
            self.image.push(KeyPair::new(
                Key::image(civilian.display().to_string()),
                Key::image(spy.display().to_string()),
            )?);
            count += 1;
        }
        Ok(count)
    }

    /// Draw one pair uniformly at random.
    pub fn draw<R: Rng + ?Sized>(&self, modality: KeyModality, rng: &mut R) -> SpyResult<KeyPair> {
        self.pairs(modality)
            .choose(rng)
            .cloned()
            .ok_or(SpyError::EmptyKeyPool(modality))
    }
}
