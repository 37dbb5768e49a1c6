use crate::foundation::core::{MAX_SURFACE_DIM, NaturalSize, RenderTarget};

/// Display budget for interactive (on-screen) rendering.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InteractiveBudget {
    /// Fraction of the viewport the canvas may occupy.
    pub viewport_fraction: f64,
    pub max_width: u32,
    pub max_height: u32,
    /// Minimum length of the shorter output side.
    pub min_short_side: u32,
}

impl Default for InteractiveBudget {
    fn default() -> Self {
        Self {
            viewport_fraction: 0.9,
            max_width: 1000,
            max_height: 700,
            min_short_side: 300,
        }
    }
}

/// Caller-chosen bounds for a final export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportConstraints {
    pub max_width: u32,
    /// Optional secondary cap applied after the width-derived height.
    pub max_height: Option<u32>,
}

impl Default for ExportConstraints {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: None,
        }
    }
}

/// What a target size is being picked for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetMode {
    /// On-screen canvas inside a viewport of the given size.
    Interactive {
        viewport: NaturalSize,
        budget: InteractiveBudget,
    },
    /// Downloaded or regenerated output.
    Export(ExportConstraints),
}

/// Pick the raster size to render `natural` at. Pure; output aspect matches `natural` up to
/// rounding.
///
/// Whatever the mode, neither side exceeds [`MAX_SURFACE_DIM`], so the result always passes
/// [`RenderTarget::validate`].
pub fn pick_target_size(natural: NaturalSize, mode: &TargetMode) -> RenderTarget {
    let w = f64::from(natural.width.max(1));
    let h = f64::from(natural.height.max(1));

    let (tw, th) = match mode {
        TargetMode::Interactive { viewport, budget } => interactive(w, h, *viewport, budget),
        TargetMode::Export(constraints) => export(w, h, constraints),
    };
    let (tw, th) = fit_surface_limit(tw, th);
    RenderTarget::new(to_px(tw), to_px(th))
}

fn interactive(w: f64, h: f64, viewport: NaturalSize, budget: &InteractiveBudget) -> (f64, f64) {
    let fraction = if budget.viewport_fraction.is_finite() && budget.viewport_fraction > 0.0 {
        budget.viewport_fraction
    } else {
        1.0
    };
    let bw = (f64::from(viewport.width) * fraction).min(f64::from(budget.max_width));
    let bh = (f64::from(viewport.height) * fraction).min(f64::from(budget.max_height));

    // Never upscale for the budget; only the minimum short side may grow the canvas.
    let mut scale = (bw / w).min(bh / h).clamp(0.0, 1.0);
    let short = w.min(h);
    let min = f64::from(budget.min_short_side);
    // The minimum wins over the budget max; only the surface limit caps it.
    if short * scale < min {
        scale = min / short;
    }
    (w * scale, h * scale)
}

fn export(w: f64, h: f64, constraints: &ExportConstraints) -> (f64, f64) {
    let mut tw = w.min(f64::from(constraints.max_width.max(1)));
    let mut th = tw * h / w;
    if let Some(max_h) = constraints.max_height {
        let max_h = f64::from(max_h.max(1));
        if th > max_h {
            th = max_h;
            tw = th * w / h;
        }
    }
    (tw, th)
}

/// Shrink uniformly until the longer side fits the largest allocatable surface.
fn fit_surface_limit(w: f64, h: f64) -> (f64, f64) {
    let limit = f64::from(MAX_SURFACE_DIM);
    let long = w.max(h);
    if long <= limit {
        return (w, h);
    }
    let scale = limit / long;
    (w * scale, h * scale)
}

fn to_px(v: f64) -> u32 {
    if !v.is_finite() {
        return 1;
    }
    v.round().clamp(1.0, f64::from(MAX_SURFACE_DIM)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/adapt/resolution.rs"]
mod tests;
