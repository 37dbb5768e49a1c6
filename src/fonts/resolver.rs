use std::collections::BTreeSet;
use std::sync::Arc;

use crate::fonts::catalog::{FontCatalog, FontChain, FontFamily};

/// Capability answering whether a font family is usable right now.
///
/// Font loading itself happens elsewhere (a system font database, a web font loader, ...). The
/// resolver only consults this to decide which chain to hand the rasterizer.
pub trait FontAvailability: Send + Sync {
    /// Whether faces for `family` are loaded and ready to draw.
    fn is_loaded(&self, family: &str) -> bool;

    /// Whether loading `family` is already known to have failed.
    fn load_failed(&self, family: &str) -> bool {
        let _ = family;
        false
    }
}

/// Statically known font loading status, keyed case-insensitively by family name.
#[derive(Clone, Debug, Default)]
pub struct KnownFonts {
    loaded: BTreeSet<String>,
    failed: BTreeSet<String>,
}

impl KnownFonts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loaded(mut self, family: &str) -> Self {
        let key = family.trim().to_lowercase();
        self.failed.remove(&key);
        self.loaded.insert(key);
        self
    }

    pub fn with_failed(mut self, family: &str) -> Self {
        let key = family.trim().to_lowercase();
        self.loaded.remove(&key);
        self.failed.insert(key);
        self
    }
}

impl FontAvailability for KnownFonts {
    fn is_loaded(&self, family: &str) -> bool {
        self.loaded.contains(&family.trim().to_lowercase())
    }

    fn load_failed(&self, family: &str) -> bool {
        self.failed.contains(&family.trim().to_lowercase())
    }
}

/// Why a [`ResolvedFont`] carries the chain it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The logical name was found in the catalog.
    Catalog,
    /// The logical name is not in the catalog; the generic chain was used.
    UnknownName,
    /// The catalog chain's primary face is known to have failed loading; the safe fallback
    /// was pre-applied.
    LoadFailed,
}

/// Render-ready font description produced by [`FontResolver::resolve`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedFont {
    /// Family chain to hand the rasterizer.
    pub chain: FontChain,
    /// Whether the chain's primary face is known to be usable.
    pub is_available: bool,
    pub source: ResolutionSource,
}

impl ResolvedFont {
    /// The chain as a CSS `font-family` value.
    pub fn css(&self) -> String {
        self.chain.to_css()
    }
}

/// Maps logical font names to family chains using an injected catalog and availability
/// capability.
///
/// One resolver is shared by interactive and export rendering so preview and final output can
/// never disagree about fonts.
#[derive(Clone)]
pub struct FontResolver {
    catalog: FontCatalog,
    availability: Arc<dyn FontAvailability>,
}

impl std::fmt::Debug for FontResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResolver")
            .field("catalog_entries", &self.catalog.entries.len())
            .field("safe_fallback", &self.catalog.safe_fallback.to_css())
            .finish()
    }
}

impl FontResolver {
    pub fn new(catalog: FontCatalog, availability: Arc<dyn FontAvailability>) -> Self {
        Self {
            catalog,
            availability,
        }
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Chain forced when a requested face turns out to be unusable.
    pub fn safe_fallback(&self) -> &FontChain {
        &self.catalog.safe_fallback
    }

    /// Resolve a logical font name. Never fails.
    ///
    /// Resolution does not load anything. A catalog entry whose primary face is merely not
    /// loaded yet is still returned (with `is_available = false`) so the rasterizer gets a
    /// chance to use it; only a face whose loading is known to have failed is replaced by the
    /// safe fallback up front.
    pub fn resolve(&self, logical_name: &str) -> ResolvedFont {
        let Some(chain) = self.catalog.lookup(logical_name) else {
            return ResolvedFont {
                chain: self.catalog.generic_fallback.clone(),
                is_available: false,
                source: ResolutionSource::UnknownName,
            };
        };

        match chain.primary() {
            FontFamily::Named(name) if self.availability.load_failed(name) => ResolvedFont {
                chain: self.catalog.safe_fallback.clone(),
                is_available: false,
                source: ResolutionSource::LoadFailed,
            },
            FontFamily::Named(name) => ResolvedFont {
                chain: chain.clone(),
                is_available: self.availability.is_loaded(name),
                source: ResolutionSource::Catalog,
            },
            _ => ResolvedFont {
                chain: chain.clone(),
                is_available: true,
                source: ResolutionSource::Catalog,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/resolver.rs"]
mod tests;
