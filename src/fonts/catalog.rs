use std::collections::BTreeMap;
use std::fmt;

/// One entry of a CSS-style font family list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Named(String),
    Serif,
    SansSerif,
    Cursive,
    Fantasy,
    Monospace,
}

impl FontFamily {
    /// Parse one comma-separated item, stripping quotes. Generic keywords are only recognized
    /// unquoted, as in CSS.
    pub fn parse_one(item: &str) -> Option<Self> {
        let item = item.trim();
        if item.is_empty() {
            return None;
        }
        let quoted = (item.starts_with('"') && item.ends_with('"') && item.len() >= 2)
            || (item.starts_with('\'') && item.ends_with('\'') && item.len() >= 2);
        if quoted {
            let inner = item[1..item.len() - 1].trim();
            return (!inner.is_empty()).then(|| Self::Named(inner.to_owned()));
        }
        Some(match item.to_ascii_lowercase().as_str() {
            "serif" => Self::Serif,
            "sans-serif" => Self::SansSerif,
            "cursive" => Self::Cursive,
            "fantasy" => Self::Fantasy,
            "monospace" => Self::Monospace,
            _ => Self::Named(item.split_whitespace().collect::<Vec<_>>().join(" ")),
        })
    }

    pub fn is_generic(&self) -> bool {
        !matches!(self, Self::Named(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) if n.contains(char::is_whitespace) => write!(f, "'{n}'"),
            Self::Named(n) => f.write_str(n),
            Self::Serif => f.write_str("serif"),
            Self::SansSerif => f.write_str("sans-serif"),
            Self::Cursive => f.write_str("cursive"),
            Self::Fantasy => f.write_str("fantasy"),
            Self::Monospace => f.write_str("monospace"),
        }
    }
}

/// Ordered font family list handed to the rasterizer, e.g. `'Playfair Display', serif`.
///
/// Serializes as its CSS string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FontChain {
    families: Vec<FontFamily>,
}

impl FontChain {
    /// Parse a CSS family list. An empty list degrades to `sans-serif`.
    pub fn parse(css: &str) -> Self {
        let families: Vec<FontFamily> = css.split(',').filter_map(FontFamily::parse_one).collect();
        if families.is_empty() {
            return Self::generic_sans();
        }
        Self { families }
    }

    pub fn from_families(families: Vec<FontFamily>) -> Self {
        if families.is_empty() {
            return Self::generic_sans();
        }
        Self { families }
    }

    pub fn generic_sans() -> Self {
        Self {
            families: vec![FontFamily::SansSerif],
        }
    }

    pub fn families(&self) -> &[FontFamily] {
        &self.families
    }

    /// First entry of the chain, the face the user actually asked for.
    pub fn primary(&self) -> &FontFamily {
        // Constructors never produce an empty chain.
        &self.families[0]
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FontChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, family) in self.families.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{family}")?;
        }
        Ok(())
    }
}

impl From<String> for FontChain {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for FontChain {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<FontChain> for String {
    fn from(value: FontChain) -> Self {
        value.to_css()
    }
}

const DEFAULT_TABLE: &[(&str, &str)] = &[
    ("Inter", "Inter, sans-serif"),
    ("Roboto", "Roboto, sans-serif"),
    ("Open Sans", "'Open Sans', sans-serif"),
    ("Montserrat", "Montserrat, sans-serif"),
    ("Lato", "Lato, sans-serif"),
    ("Poppins", "Poppins, sans-serif"),
    ("Oswald", "Oswald, sans-serif"),
    ("Raleway", "Raleway, sans-serif"),
    ("Bebas Neue", "'Bebas Neue', sans-serif"),
    ("Arial", "Arial, Helvetica, sans-serif"),
    ("Helvetica", "Helvetica, Arial, sans-serif"),
    ("Verdana", "Verdana, Geneva, sans-serif"),
    ("Impact", "Impact, 'Arial Black', sans-serif"),
    ("Playfair Display", "'Playfair Display', serif"),
    ("Merriweather", "Merriweather, serif"),
    ("Lora", "Lora, serif"),
    ("Georgia", "Georgia, serif"),
    ("Times New Roman", "'Times New Roman', Times, serif"),
    ("Courier New", "'Courier New', Courier, monospace"),
    ("Roboto Mono", "'Roboto Mono', monospace"),
    ("Pacifico", "Pacifico, cursive"),
    ("Dancing Script", "'Dancing Script', cursive"),
    ("Lobster", "Lobster, cursive"),
    ("Comic Sans MS", "'Comic Sans MS', cursive"),
];

const DEFAULT_SAFE_FALLBACK: &str = "Arial, sans-serif";

/// Logical font name to family chain table.
///
/// The catalog is plain configuration: it is passed into a [`crate::FontResolver`] at
/// construction so different resolvers (and tests) can carry different tables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontCatalog {
    /// Known logical names and their preferred chains.
    pub entries: BTreeMap<String, FontChain>,
    /// Chain forced when the requested face is confirmed unusable.
    pub safe_fallback: FontChain,
    /// Chain used for names missing from `entries`.
    pub generic_fallback: FontChain,
}

impl Default for FontCatalog {
    fn default() -> Self {
        let entries = DEFAULT_TABLE
            .iter()
            .map(|(name, chain)| ((*name).to_owned(), FontChain::parse(chain)))
            .collect();
        Self {
            entries,
            safe_fallback: FontChain::parse(DEFAULT_SAFE_FALLBACK),
            generic_fallback: FontChain::generic_sans(),
        }
    }
}

impl FontCatalog {
    /// An empty table with the default fallbacks.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            ..Self::default()
        }
    }

    /// Add or replace an entry.
    pub fn with_entry(mut self, name: impl Into<String>, chain: impl Into<FontChain>) -> Self {
        self.entries.insert(name.into(), chain.into());
        self
    }

    pub fn with_safe_fallback(mut self, chain: impl Into<FontChain>) -> Self {
        self.safe_fallback = chain.into();
        self
    }

    /// Case-insensitive lookup of a logical name.
    pub fn lookup(&self, name: &str) -> Option<&FontChain> {
        let name = name.trim();
        if let Some(chain) = self.entries.get(name) {
            return Some(chain);
        }
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/catalog.rs"]
mod tests;
