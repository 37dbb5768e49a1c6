use super::*;
use crate::fonts::catalog::FontChain;
use crate::foundation::core::{Point, Rect, RenderTarget};

fn output(width: u32, height: u32, fill: u8) -> RenderOutput {
    let mut surface = RasterSurface::new(RenderTarget::new(width, height)).unwrap();
    let layer = [fill, fill, fill, 255].repeat((width * height) as usize);
    surface.draw_layer(&layer, 1.0).unwrap();
    RenderOutput {
        surface,
        layout: ComputedLayout {
            font_size_px: f64::from(fill),
            anchor_px: Point::ZERO,
            bounds_px: Rect::ZERO,
            measured_width: 0.0,
            width_estimated: false,
            rotation_rad: 0.0,
            font_chain: FontChain::generic_sans(),
            substitution: None,
        },
        diagnostics: Vec::new(),
    }
}

#[test]
fn tickets_increase_monotonically() {
    let mut canvas = PreviewCanvas::new();
    let a = canvas.submit();
    let b = canvas.submit();
    assert!(b > a);
    assert_eq!(b.seq(), a.seq() + 1);
    assert!(canvas.is_latest(b));
    assert!(!canvas.is_latest(a));
}

#[test]
fn stale_completion_is_dropped() {
    let mut canvas = PreviewCanvas::new();
    let first = canvas.submit();
    let second = canvas.submit();

    assert!(canvas.present(second, output(2, 2, 200)));
    assert!(!canvas.present(first, output(2, 2, 10)));
    assert_eq!(canvas.presented(), Some(second));
    assert_eq!(canvas.surface().unwrap().pixel(0, 0), Some([200, 200, 200, 255]));
    assert_eq!(canvas.layout().unwrap().font_size_px, 200.0);
}

#[test]
fn in_order_completions_all_apply() {
    let mut canvas = PreviewCanvas::new();
    let a = canvas.submit();
    assert!(canvas.present(a, output(2, 2, 1)));
    let b = canvas.submit();
    assert!(canvas.present(b, output(2, 2, 2)));
    assert_eq!(canvas.surface().unwrap().pixel(1, 1), Some([2, 2, 2, 255]));
    // Re-presenting the shown ticket is a no-op.
    assert!(!canvas.present(b, output(2, 2, 3)));
}

#[test]
fn size_change_replaces_the_surface() {
    let mut canvas = PreviewCanvas::new();
    let a = canvas.submit();
    canvas.present(a, output(2, 2, 1));
    let b = canvas.submit();
    canvas.present(b, output(3, 1, 9));
    let s = canvas.surface().unwrap();
    assert_eq!((s.width(), s.height()), (3, 1));
    assert!(canvas.diagnostics().is_empty());
}
