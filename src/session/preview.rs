use crate::foundation::error::Diagnostic;
use crate::layout::engine::ComputedLayout;
use crate::render::compositor::RenderOutput;
use crate::render::surface::RasterSurface;

/// Sequence number handed out when an interactive render is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderTicket(u64);

impl RenderTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// The visible interactive canvas.
///
/// Renders may complete out of order. Each one is tagged with a [`RenderTicket`] at submission,
/// and a completed render is shown only if its ticket is newer than the one currently shown, so
/// the most recent request always wins. The surface is updated in place while its size is
/// unchanged.
#[derive(Debug, Default)]
pub struct PreviewCanvas {
    next_seq: u64,
    presented: Option<RenderTicket>,
    surface: Option<RasterSurface>,
    layout: Option<ComputedLayout>,
    diagnostics: Vec<Diagnostic>,
}

impl PreviewCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new render request.
    pub fn submit(&mut self) -> RenderTicket {
        self.next_seq += 1;
        RenderTicket(self.next_seq)
    }

    /// Offer a completed render. Returns whether it was applied.
    pub fn present(&mut self, ticket: RenderTicket, output: RenderOutput) -> bool {
        if self.presented.is_some_and(|shown| ticket <= shown) {
            tracing::debug!(
                ticket = ticket.0,
                shown = self.presented.map(|t| t.0),
                "dropping stale preview render"
            );
            return false;
        }

        let RenderOutput {
            surface,
            layout,
            diagnostics,
        } = output;
        let reused = self
            .surface
            .as_mut()
            .is_some_and(|current| current.copy_from(&surface));
        if !reused {
            self.surface = Some(surface);
        }
        self.layout = Some(layout);
        self.diagnostics = diagnostics;
        self.presented = Some(ticket);
        true
    }

    /// Ticket of the render currently shown.
    pub fn presented(&self) -> Option<RenderTicket> {
        self.presented
    }

    /// Whether `ticket` is the most recent request.
    pub fn is_latest(&self, ticket: RenderTicket) -> bool {
        ticket.0 == self.next_seq
    }

    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    pub fn layout(&self) -> Option<&ComputedLayout> {
        self.layout.as_ref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
