use super::*;

fn resolver(known: KnownFonts) -> FontResolver {
    FontResolver::new(FontCatalog::default(), Arc::new(known))
}

#[test]
fn known_and_loaded_name_is_available() {
    let r = resolver(KnownFonts::new().with_loaded("Inter"));
    let f = r.resolve("Inter");
    assert_eq!(f.css(), "Inter, sans-serif");
    assert!(f.is_available);
    assert_eq!(f.source, ResolutionSource::Catalog);
}

#[test]
fn known_but_pending_name_keeps_preferred_chain() {
    let r = resolver(KnownFonts::new());
    let f = r.resolve("Lobster");
    assert_eq!(f.css(), "Lobster, cursive");
    assert!(!f.is_available);
    assert_eq!(f.source, ResolutionSource::Catalog);
}

#[test]
fn failed_load_pre_applies_safe_fallback() {
    let r = resolver(KnownFonts::new().with_failed("lobster"));
    let f = r.resolve("Lobster");
    assert_eq!(f.chain, FontCatalog::default().safe_fallback);
    assert!(!f.is_available);
    assert_eq!(f.source, ResolutionSource::LoadFailed);
}

#[test]
fn unknown_name_degrades_to_generic_sans() {
    let r = resolver(KnownFonts::new().with_loaded("Inter"));
    let f = r.resolve("Definitely Not A Font");
    assert_eq!(f.chain, FontChain::generic_sans());
    assert!(!f.is_available);
    assert_eq!(f.source, ResolutionSource::UnknownName);
}

#[test]
fn generic_primary_counts_as_available() {
    let catalog = FontCatalog::empty().with_entry("System", "sans-serif");
    let r = FontResolver::new(catalog, Arc::new(KnownFonts::new()));
    assert!(r.resolve("system").is_available);
}

#[test]
fn resolution_is_deterministic_per_catalog() {
    let a = resolver(KnownFonts::new().with_loaded("Roboto"));
    let b = FontResolver::new(
        FontCatalog::empty().with_entry("Roboto", "'Roboto Slab', serif"),
        Arc::new(KnownFonts::new().with_loaded("Roboto")),
    );
    assert_eq!(a.resolve("Roboto"), a.resolve("Roboto"));
    assert_ne!(a.resolve("Roboto").chain, b.resolve("Roboto").chain);
}
