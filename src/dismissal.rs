//! Outside-click dismissal: a single, process-wide listener slot owned by
//! whichever widget most recently opened its chooser.
//!
//! The slot is acquired on every activation and released the moment it fires,
//! whether or not the click was a genuine selection. Cells record a witness in
//! the same dispatch so the firing can tell a selection click from an outside
//! click. Floem has no document-level listener, so the host window routes
//! clicks here by wrapping its root view in [`dismissal_layer`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use floem::event::EventListener;
use floem::prelude::*;

use crate::widget::{SwatchHandle, WidgetShared};

struct Registration {
    widget_id: u64,
    widget: Weak<WidgetShared>,
}

thread_local! {
    /// The single-slot dismissal registration. At most one exists at a time.
    static ACTIVE: RefCell<Option<Registration>> = const { RefCell::new(None) };
    /// Every attached widget, for the defensive hide-all sweep on firing.
    static WIDGETS: RefCell<Vec<Weak<WidgetShared>>> = const { RefCell::new(Vec::new()) };
    /// Cell hit recorded during the current pointer dispatch, if any.
    static CLICKED_CELL: Cell<Option<u64>> = const { Cell::new(None) };
}

pub(crate) fn register_widget(shared: &Rc<WidgetShared>) {
    WIDGETS.with(|widgets| widgets.borrow_mut().push(Rc::downgrade(shared)));
}

/// Take the slot for `handle`, replacing any stale registration so it can
/// never double-fire.
pub(crate) fn acquire(handle: &SwatchHandle) {
    ACTIVE.with(|slot| {
        *slot.borrow_mut() = Some(Registration {
            widget_id: handle.shared.id,
            widget: Rc::downgrade(&handle.shared),
        });
    });
}

/// Record that the current click landed on a cell of widget `widget_id`.
/// Consumed by the firing that observes the same dispatch.
pub(crate) fn witness_cell(widget_id: u64) {
    CLICKED_CELL.with(|cell| cell.set(Some(widget_id)));
}

/// A pointer-down reached the root layer: release the slot and close.
pub(crate) fn fire() {
    let witnessed = CLICKED_CELL.with(Cell::take);
    let Some(registration) = ACTIVE.with(|slot| slot.borrow_mut().take()) else {
        return;
    };

    // Hide every open chooser, not just the active one: if two widgets raced,
    // the superseded one's grid was left open without a registration.
    let attached: Vec<Rc<WidgetShared>> = WIDGETS.with(|widgets| {
        let mut widgets = widgets.borrow_mut();
        widgets.retain(|widget| widget.strong_count() > 0);
        widgets.iter().filter_map(Weak::upgrade).collect()
    });
    for shared in attached {
        if shared.state.borrow().grid_visible {
            SwatchHandle { shared }.hide_grid();
        }
    }

    if let Some(shared) = registration.widget.upgrade() {
        let own_cell = witnessed == Some(registration.widget_id);
        SwatchHandle { shared }.dismiss(own_cell);
    }
}

/// Wrap a window's root view so clicks that no widget consumed close the open
/// chooser. Install once per window; the child renders unchanged and events
/// keep propagating to the host's own handlers.
pub fn dismissal_layer(child: impl IntoView + 'static) -> impl IntoView {
    container(child)
        .style(|s| s.size_full())
        .on_event_cont(EventListener::PointerDown, |_| fire())
}

#[cfg(test)]
fn active_widget_id() -> Option<u64> {
    ACTIVE.with(|slot| slot.borrow().as_ref().map(|r| r.widget_id))
}

#[cfg(test)]
fn reset() {
    ACTIVE.with(|slot| *slot.borrow_mut() = None);
    WIDGETS.with(|widgets| widgets.borrow_mut().clear());
    CLICKED_CELL.with(|cell| cell.set(None));
}
