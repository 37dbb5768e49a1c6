use std::path::{Path, PathBuf};
use std::sync::Arc;

use usvg::fontdb;

use crate::fonts::catalog::FontFamily;
use crate::fonts::resolver::FontAvailability;
use crate::style::spec::FontStyle;

const SANS_CANDIDATES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Inter",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
];
const SERIF_CANDIDATES: &[&str] = &[
    "Times New Roman",
    "Times",
    "Liberation Serif",
    "DejaVu Serif",
    "Noto Serif",
];
const MONO_CANDIDATES: &[&str] = &[
    "Courier New",
    "Courier",
    "Liberation Mono",
    "DejaVu Sans Mono",
    "Noto Sans Mono",
];
const CURSIVE_CANDIDATES: &[&str] = &["Comic Sans MS", "Brush Script MT", "Pacifico"];
const FANTASY_CANDIDATES: &[&str] = &["Impact", "Papyrus"];

/// The set of font faces the rasterizer can actually draw with.
///
/// Backed by a `fontdb` database shared (via `Arc`) with every SVG text tree the compositor
/// builds. Generic families (`sans-serif`, `serif`, ...) are mapped onto whichever common
/// family is installed.
#[derive(Clone)]
pub struct FontInventory {
    db: Arc<fontdb::Database>,
}

impl std::fmt::Debug for FontInventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontInventory")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl Default for FontInventory {
    fn default() -> Self {
        Self::empty()
    }
}

impl FontInventory {
    /// An inventory without any faces. Text measurement falls back to estimates and nothing
    /// is drawn for text, but renders still complete.
    pub fn empty() -> Self {
        Self {
            db: Arc::new(fontdb::Database::new()),
        }
    }

    /// System fonts only.
    pub fn system() -> Self {
        Self::load(true, &[])
    }

    /// Build an inventory from system fonts (optionally) and font directories.
    pub fn load(load_system_fonts: bool, dirs: &[PathBuf]) -> Self {
        let mut db = fontdb::Database::new();
        if load_system_fonts {
            db.load_system_fonts();
        }
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir);
            load_fonts_from_dir(&mut db, &dir.join("fonts"));
        }
        configure_generic_families(&mut db);
        tracing::debug!(faces = db.len(), "font inventory loaded");
        Self { db: Arc::new(db) }
    }

    /// Build an inventory from in-memory font files.
    pub fn from_font_data(fonts: Vec<Vec<u8>>) -> Self {
        let mut db = fontdb::Database::new();
        for data in fonts {
            db.load_font_data(data);
        }
        configure_generic_families(&mut db);
        Self { db: Arc::new(db) }
    }

    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Sorted, de-duplicated family names.
    pub fn families(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Case-insensitive family lookup.
    pub fn has_family(&self, name: &str) -> bool {
        canonical_family(&self.db, name).is_some()
    }

    /// Family name of the face the rasterizer would pick for `family`, if any.
    pub fn match_family(&self, family: &FontFamily, weight: u16, style: FontStyle) -> Option<String> {
        let canonical;
        let query_family = match family {
            FontFamily::Named(name) => {
                canonical = canonical_family(&self.db, name)?;
                fontdb::Family::Name(&canonical)
            }
            FontFamily::Serif => fontdb::Family::Serif,
            FontFamily::SansSerif => fontdb::Family::SansSerif,
            FontFamily::Cursive => fontdb::Family::Cursive,
            FontFamily::Fantasy => fontdb::Family::Fantasy,
            FontFamily::Monospace => fontdb::Family::Monospace,
        };
        let families = [query_family];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight(weight),
            stretch: fontdb::Stretch::Normal,
            style: to_fontdb_style(style),
        };
        let id = self.db.query(&query)?;
        self.db
            .face(id)
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
    }

    /// usvg options whose font lookup walks the requested chain and, failing that, uses any
    /// installed face.
    pub(crate) fn svg_options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: Arc::clone(&self.db),
            font_resolver: chain_font_resolver(),
            ..Default::default()
        }
    }
}

impl FontAvailability for FontInventory {
    fn is_loaded(&self, family: &str) -> bool {
        self.has_family(family)
    }
}

fn canonical_family(db: &fontdb::Database, name: &str) -> Option<String> {
    let name = name.trim();
    db.faces()
        .flat_map(|face| face.families.iter())
        .find(|(family, _)| family.eq_ignore_ascii_case(name))
        .map(|(family, _)| family.clone())
}

fn configure_generic_families(db: &mut fontdb::Database) {
    fn pick(db: &fontdb::Database, candidates: &[&str]) -> Option<String> {
        candidates.iter().find_map(|c| canonical_family(db, c))
    }

    if let Some(f) = pick(db, SANS_CANDIDATES) {
        db.set_sans_serif_family(f);
    }
    if let Some(f) = pick(db, SERIF_CANDIDATES) {
        db.set_serif_family(f);
    }
    if let Some(f) = pick(db, MONO_CANDIDATES) {
        db.set_monospace_family(f);
    }
    if let Some(f) = pick(db, CURSIVE_CANDIDATES) {
        db.set_cursive_family(f);
    }
    if let Some(f) = pick(db, FANTASY_CANDIDATES) {
        db.set_fantasy_family(f);
    }
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

fn to_fontdb_style(style: FontStyle) -> fontdb::Style {
    match style {
        FontStyle::Normal => fontdb::Style::Normal,
        FontStyle::Italic => fontdb::Style::Italic,
    }
}

fn chain_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, db| {
            let mut families = Vec::<fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => fontdb::Family::Name(s),
                });
            }
            families.push(fontdb::Family::SansSerif);

            let style = match font.style() {
                usvg::FontStyle::Normal => fontdb::Style::Normal,
                usvg::FontStyle::Italic => fontdb::Style::Italic,
                usvg::FontStyle::Oblique => fontdb::Style::Oblique,
            };

            let query = fontdb::Query {
                families: &families,
                weight: fontdb::Weight(font.weight()),
                stretch: fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = db.query(&query) {
                return Some(id);
            }
            db.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/inventory.rs"]
mod tests;
