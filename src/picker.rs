//! Widget factory: builds the display box and the container stacking it with
//! the popup grid, hides the raw host input, and wires the pointer handlers.

use std::rc::Rc;

use floem::event::EventListener;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};
use floem::style::CursorStyle;
use floem::taffy::AlignContent;

use crate::color;
use crate::config::{CodeAlign, Insert, SwatchOptions};
use crate::grid::chooser_grid;
use crate::widget::SwatchHandle;

/// One host input field: its value signal plus optional per-field overrides.
///
/// The signal plays the part of the input's value attribute: a non-empty
/// value at attach time becomes the initial committed color, and selections
/// are written back through it (the signal update is the change
/// notification).
pub struct HostField {
    pub(crate) value: RwSignal<String>,
    pub(crate) overrides: SwatchOptions,
}

impl HostField {
    pub fn new(value: RwSignal<String>) -> Self {
        Self {
            value,
            overrides: SwatchOptions::default(),
        }
    }

    /// Per-field knob overrides, lower precedence than per-call options.
    pub fn overrides(mut self, overrides: SwatchOptions) -> Self {
        self.overrides = overrides;
        self
    }
}

pub(crate) fn build_picker(
    field: HostField,
    options: &SwatchOptions,
) -> (SwatchHandle, impl IntoView) {
    let (config, mut hooks) = options.clone().or(&field.overrides).resolve();
    let value = field.value;
    hooks.on_value = Some(Rc::new(move |text: &str| value.set(text.to_string())));

    let initial = value.get_untracked();
    let handle = SwatchHandle::new(config, hooks, &initial);

    // View-facing mirrors of the widget state, refreshed after every
    // transition through the view-sync callback.
    let shown_color = RwSignal::new(handle.shared.state.borrow().shown_color.clone());
    let shown_text = RwSignal::new(initial);
    let grid_visible = RwSignal::new(false);
    {
        let weak = Rc::downgrade(&handle.shared);
        *handle.shared.view_sync.borrow_mut() = Some(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                let state = shared.state.borrow();
                shown_color.set(state.shown_color.clone());
                shown_text.set(state.shown_text.clone());
                grid_visible.set(state.grid_visible);
            }
        }));
    }

    let display = display_box(&handle, shown_color, shown_text);
    let grid = chooser_grid(handle.clone(), grid_visible);
    let swatch = stack((display, grid));

    // The raw input stays in the tree, hidden, so the host's own bindings
    // keep observing the signal; `insert` picks which side the widget lands
    // on.
    let input = text_input(value).style(|s| s.hide());
    let widget = match handle.shared.config.insert {
        Insert::Before => h_stack((swatch, input)),
        Insert::After => h_stack((input, swatch)),
    };

    (handle, widget)
}

/// The always-visible swatch button showing the current color and,
/// optionally, its code. Its own click never reaches the dismissal layer.
fn display_box(
    handle: &SwatchHandle,
    shown_color: RwSignal<String>,
    shown_text: RwSignal<String>,
) -> impl IntoView {
    let config = &handle.shared.config;
    let display_code = config.display_color_code;
    let box_width = config.box_width as f32;
    let box_height = config.box_height as f32;
    let border_width = config.border_width as f32;
    let border_color = color::to_color(&config.border_color).unwrap_or(Color::BLACK);
    let code_color = color::to_color(&config.code_color).unwrap_or(Color::WHITE);
    let justify = match config.code_align {
        CodeAlign::Left => AlignContent::Start,
        CodeAlign::Center => AlignContent::Center,
        CodeAlign::Right => AlignContent::End,
    };
    let extra = config.button_style.clone();
    let activate = handle.clone();

    container(
        label(move || {
            if display_code {
                shown_text.get()
            } else {
                String::new()
            }
        })
        .style(move |s| s.color(code_color)),
    )
    .style(move |mut s| {
        let background = color::to_color(&shown_color.get()).unwrap_or(Color::WHITE);
        s = s
            .width(box_width)
            .height(box_height)
            .border(border_width)
            .border_color(border_color)
            .background(background)
            .items_center()
            .justify_content(Some(justify))
            .cursor(CursorStyle::Pointer);
        if let Some(extra) = extra.clone() {
            s = s.apply(extra);
        }
        s
    })
    .on_event_stop(EventListener::PointerDown, move |_| activate.activate())
}
