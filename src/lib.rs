//! # floem-swatch
//!
//! A compact swatch-grid color picker widget for
//! [Floem](https://github.com/lapce/floem).
//!
//! Each widget binds one host text field to a "current color" display button.
//! Clicking the button reveals a popup grid of selectable color cells;
//! clicking a cell writes `#code` into the field and closes the grid, while a
//! click anywhere else closes it and reverts any unconfirmed live preview.
//! Any number of widgets can coexist in one window; a single shared
//! dismissal slot guarantees that at most one chooser stays open.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_swatch::{dismissal_layer, swatch_picker, HostField, SwatchOptions};
//!
//! let value = RwSignal::new(String::new());
//! let (handle, picker) = swatch_picker(HostField::new(value), &SwatchOptions::new());
//! // Wrap the window root once so outside clicks close the chooser.
//! let _root = dismissal_layer(picker);
//! # let _ = handle;
//! ```

mod color;
mod config;
mod constants;
mod dismissal;
mod grid;
mod palette;
mod picker;
mod widget;

pub use config::{CodeAlign, Insert, SwatchOptions};
pub use dismissal::dismissal_layer;
pub use palette::Palette;
pub use picker::HostField;
pub use widget::SwatchHandle;

use floem::prelude::IntoView;

/// Attach a swatch picker to one host field and build its view.
///
/// Knob precedence: `options` > the field's overrides > built-in defaults.
/// Attaching the same field twice is not detected; the result is two widgets
/// sharing one value (caller responsibility).
pub fn swatch_picker(field: HostField, options: &SwatchOptions) -> (SwatchHandle, impl IntoView) {
    picker::build_picker(field, options)
}

/// Hide the chooser grids of the given widgets without invoking `on_close`.
///
/// Safe on widgets that were never opened (no-op).
pub fn force_close<'a>(handles: impl IntoIterator<Item = &'a SwatchHandle>) {
    for handle in handles {
        handle.force_close();
    }
}
