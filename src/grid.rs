//! The popup chooser grid: one painted swatch per palette entry, hit-tested
//! against the widget's cell records.
//!
//! The grid view exists from attach time but stays hidden (and untraversed)
//! until its widget opens; the cell records themselves are built lazily on
//! first activation. Cell clicks deliberately keep propagating so the
//! root-level dismissal layer observes them in the same dispatch.

use floem::kurbo::Point;
use floem::peniko::Color;
use floem::reactive::{RwSignal, SignalGet};
use floem::style::CursorStyle;
use floem::views::Decorators;
use floem::{
    View, ViewId,
    context::{EventCx, PaintCx},
    event::{Event, EventPropagation},
};
use floem_renderer::Renderer;

use crate::color;
use crate::constants;
use crate::dismissal;
use crate::widget::{cell_index_at, SwatchHandle};

pub(crate) struct ChooserGrid {
    id: ViewId,
    handle: SwatchHandle,
    hovered: Option<usize>,
}

/// Create the grid view for `handle`, shown while `visible` is set.
pub(crate) fn chooser_grid(handle: SwatchHandle, visible: RwSignal<bool>) -> ChooserGrid {
    let id = ViewId::new();
    let total_width = handle.shared.config.total_width as f32;
    let total_height = handle.shared.config.total_height as f32;
    let box_width = handle.shared.config.box_width as f32;
    let border_width = handle.shared.config.border_width as f32;
    let border_color =
        color::to_color(&handle.shared.config.border_color).unwrap_or(Color::BLACK);

    ChooserGrid {
        id,
        handle,
        hovered: None,
    }
    .style(move |s| {
        s.absolute()
            .inset_top(0.0)
            .inset_left(box_width)
            .margin_left(constants::CHOOSER_GAP)
            .width(total_width)
            .height(total_height)
            .border(border_width)
            .border_color(border_color)
            .background(Color::WHITE)
            .cursor(CursorStyle::Pointer)
            .z_index(10)
            .apply_if(!visible.get(), |s| s.hide())
    })
}

impl ChooserGrid {
    fn cell_at(&self, pos: Point) -> Option<usize> {
        let state = self.handle.shared.state.borrow();
        state
            .cells
            .as_ref()
            .and_then(|cells| cell_index_at(cells, pos))
    }
}

impl View for ChooserGrid {
    fn id(&self) -> ViewId {
        self.id
    }

    fn event_before_children(&mut self, _cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerMove(e) => {
                let hit = self.cell_at(e.pos);
                if hit != self.hovered {
                    self.hovered = hit;
                    if let Some(index) = hit {
                        self.handle.hover(index);
                    }
                }
                EventPropagation::Continue
            }
            Event::PointerDown(e) => {
                if let Some(index) = self.cell_at(e.pos) {
                    // Mark the hit before the event bubbles to the dismissal
                    // layer, which fires on this same dispatch.
                    dismissal::witness_cell(self.handle.shared.id);
                    self.handle.select(index);
                    self.hovered = None;
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let state = self.handle.shared.state.borrow();
        let Some(cells) = &state.cells else {
            return;
        };
        for cell in cells {
            if let Some(fill) = color::to_color(&cell.code) {
                cx.fill(&cell.rect, fill, 0.0);
            }
        }
    }
}
