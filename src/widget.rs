//! Widget instance state: the committed color, the hover preview, the
//! open/close state machine, and the lazily built chooser cells.
//!
//! Everything here is view-free so the interaction semantics can be tested
//! headlessly; `picker` and `grid` attach Floem views on top and mirror this
//! state into signals through the view-sync callback.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use floem::kurbo::{Point, Rect};

use crate::config::{SwatchConfig, SwatchHooks};
use crate::dismissal;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Chooser lifecycle. `Open` means the dismissal registration belongs to this
/// widget; the grid itself may still be toggled invisible by a re-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChooserPhase {
    Closed,
    Open,
}

/// One selectable swatch: its color code and its rect inside the grid.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cell {
    pub(crate) code: String,
    pub(crate) rect: Rect,
}

pub(crate) struct WidgetState {
    /// Last confirmed selection, as a paintable color string.
    pub(crate) committed: String,
    /// What the display box currently paints (preview or committed).
    pub(crate) shown_color: String,
    /// What the display box currently shows as text, when enabled.
    pub(crate) shown_text: String,
    pub(crate) phase: ChooserPhase,
    pub(crate) grid_visible: bool,
    /// Built on first activation, reused on every later open.
    pub(crate) cells: Option<Vec<Cell>>,
}

pub(crate) struct WidgetShared {
    pub(crate) id: u64,
    pub(crate) config: SwatchConfig,
    pub(crate) hooks: SwatchHooks,
    pub(crate) state: RefCell<WidgetState>,
    /// Copies state into the view layer's signals; absent until the views
    /// are built (and in headless tests).
    pub(crate) view_sync: RefCell<Option<Box<dyn Fn()>>>,
}

impl WidgetShared {
    pub(crate) fn sync_view(&self) {
        if let Some(sync) = &*self.view_sync.borrow() {
            sync();
        }
    }
}

/// Cheap, clonable handle to one attached widget.
///
/// Returned by [`swatch_picker`](crate::swatch_picker) alongside the view;
/// keeps working after the view has been moved into the host tree.
#[derive(Clone)]
pub struct SwatchHandle {
    pub(crate) shared: Rc<WidgetShared>,
}

impl SwatchHandle {
    pub(crate) fn new(config: SwatchConfig, hooks: SwatchHooks, initial_value: &str) -> Self {
        let committed = if initial_value.is_empty() {
            config.default_color.clone()
        } else {
            initial_value.to_string()
        };
        let shared = Rc::new(WidgetShared {
            id: NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed),
            config,
            hooks,
            state: RefCell::new(WidgetState {
                shown_color: committed.clone(),
                shown_text: initial_value.to_string(),
                committed,
                phase: ChooserPhase::Closed,
                grid_visible: false,
                cells: None,
            }),
            view_sync: RefCell::new(None),
        });
        dismissal::register_widget(&shared);
        Self { shared }
    }

    /// Display box clicked: open the chooser, or toggle its visibility if it
    /// is already open. Acquires the dismissal registration either way.
    pub(crate) fn activate(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            match state.phase {
                ChooserPhase::Closed => {
                    if state.cells.is_none() {
                        state.cells = Some(build_cells(&self.shared.config));
                    }
                    state.phase = ChooserPhase::Open;
                    state.grid_visible = true;
                }
                ChooserPhase::Open => {
                    state.grid_visible = !state.grid_visible;
                }
            }
        }
        dismissal::acquire(self);
        self.shared.sync_view();
    }

    /// Pointer entered cell `index`.
    pub(crate) fn hover(&self, index: usize) {
        let Some(code) = self.cell_code(index) else {
            return;
        };
        if let Some(on_cell_enter) = &self.shared.hooks.on_cell_enter {
            on_cell_enter(&code);
        }
        if self.shared.config.live_preview {
            let preview = format!("#{code}");
            let mut state = self.shared.state.borrow_mut();
            state.shown_color = preview.clone();
            state.shown_text = preview;
        }
        self.shared.sync_view();
    }

    /// Cell `index` clicked: commit the color into the host field and close.
    /// `on_close` is not invoked here; the dismissal coordinator observes
    /// the same click and fires it.
    pub(crate) fn select(&self, index: usize) {
        let Some(code) = self.cell_code(index) else {
            return;
        };
        let value = format!("#{code}");
        {
            let mut state = self.shared.state.borrow_mut();
            state.committed = value.clone();
            state.shown_color = value.clone();
            state.shown_text = value.clone();
            state.grid_visible = false;
            state.phase = ChooserPhase::Closed;
        }
        if let Some(on_value) = &self.shared.hooks.on_value {
            on_value(&value);
        }
        #[cfg(feature = "clipboard")]
        if self.shared.config.copy_on_select {
            copy_to_clipboard(&value);
        }
        if let Some(on_select) = &self.shared.hooks.on_select {
            on_select(&code);
        }
        self.shared.sync_view();
    }

    /// Dismissal firing reached this widget. `own_cell` is whether the click
    /// landed on one of this widget's cells; anything else reverts an
    /// unconfirmed preview.
    pub(crate) fn dismiss(&self, own_cell: bool) {
        {
            let mut state = self.shared.state.borrow_mut();
            if !own_cell {
                state.shown_color = state.committed.clone();
                state.shown_text = state.committed.clone();
            }
            state.grid_visible = false;
            state.phase = ChooserPhase::Closed;
        }
        if let Some(on_close) = &self.shared.hooks.on_close {
            on_close();
        }
        self.shared.sync_view();
    }

    /// Defensive hide used by the coordinator's global sweep: no callbacks,
    /// no revert.
    pub(crate) fn hide_grid(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            state.grid_visible = false;
            state.phase = ChooserPhase::Closed;
        }
        self.shared.sync_view();
    }

    /// Hide this widget's chooser grid without invoking `on_close` and
    /// without touching the dismissal registration. No-op on widgets that
    /// were never opened.
    pub fn force_close(&self) {
        self.shared.state.borrow_mut().grid_visible = false;
        self.shared.sync_view();
    }

    /// Whether the chooser is currently open.
    pub fn is_open(&self) -> bool {
        self.shared.state.borrow().phase == ChooserPhase::Open
    }

    /// The last confirmed color, e.g. `"#ff3366"`.
    pub fn committed_color(&self) -> String {
        self.shared.state.borrow().committed.clone()
    }

    fn cell_code(&self, index: usize) -> Option<String> {
        let state = self.shared.state.borrow();
        Some(state.cells.as_ref()?.get(index)?.code.clone())
    }

    #[cfg(test)]
    pub(crate) fn shown_color(&self) -> String {
        self.shared.state.borrow().shown_color.clone()
    }

    #[cfg(test)]
    pub(crate) fn shown_text(&self) -> String {
        self.shared.state.borrow().shown_text.clone()
    }

    #[cfg(test)]
    pub(crate) fn grid_visible(&self) -> bool {
        self.shared.state.borrow().grid_visible
    }

    #[cfg(test)]
    pub(crate) fn cell_count(&self) -> Option<usize> {
        self.shared.state.borrow().cells.as_ref().map(Vec::len)
    }
}

/// Lay the palette out row-major, `columns` cells per row, each cell inset by
/// its margin inside a fixed pitch.
pub(crate) fn build_cells(config: &SwatchConfig) -> Vec<Cell> {
    let pitch_x = config.cell_width + 2.0 * config.cell_margin;
    let pitch_y = config.cell_height + 2.0 * config.cell_margin;
    config
        .palette
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let col = (i % config.columns) as f64;
            let row = (i / config.columns) as f64;
            let x0 = col * pitch_x + config.cell_margin;
            let y0 = row * pitch_y + config.cell_margin;
            Cell {
                code: code.to_string(),
                rect: Rect::new(x0, y0, x0 + config.cell_width, y0 + config.cell_height),
            }
        })
        .collect()
}

/// The cell under `pos`, if any. Margins between cells miss.
pub(crate) fn cell_index_at(cells: &[Cell], pos: Point) -> Option<usize> {
    cells.iter().position(|cell| cell.rect.contains(pos))
}

#[cfg(feature = "clipboard")]
fn copy_to_clipboard(text: &str) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(text);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SwatchOptions;
    use crate::palette::Palette;

    use std::cell::RefCell;
    use std::rc::Rc;

    fn attach(options: SwatchOptions, initial: &str) -> SwatchHandle {
        let (config, hooks) = options.resolve();
        SwatchHandle::new(config, hooks, initial)
    }

    fn log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn push_into(log: &Rc<RefCell<Vec<String>>>) -> impl Fn(&str) + 'static {
        let log = log.clone();
        move |code| log.borrow_mut().push(code.to_string())
    }

    #[test]
    fn empty_field_commits_the_default_color() {
        let widget = attach(SwatchOptions::new(), "");
        assert_eq!(widget.committed_color(), "#FFF");
        assert_eq!(widget.shown_color(), "#FFF");
        // The code text mirrors the raw field value, which starts empty.
        assert_eq!(widget.shown_text(), "");
    }

    #[test]
    fn field_value_wins_over_the_default_color() {
        let widget = attach(SwatchOptions::new().default_color("#ABC"), "#123456");
        assert_eq!(widget.committed_color(), "#123456");
        assert_eq!(widget.shown_text(), "#123456");
    }

    #[test]
    fn first_activation_builds_one_cell_per_palette_entry() {
        let widget = attach(SwatchOptions::new(), "");
        assert_eq!(widget.cell_count(), None);

        widget.activate();
        assert!(widget.is_open());
        assert!(widget.grid_visible());
        assert_eq!(widget.cell_count(), Some(216));
    }

    #[test]
    fn reactivation_toggles_visibility_without_rebuilding() {
        let widget = attach(SwatchOptions::new(), "");
        for _ in 0..3 {
            widget.activate();
        }
        // Open → hidden → shown again; still one cell per palette entry.
        assert!(widget.is_open());
        assert!(widget.grid_visible());
        assert_eq!(widget.cell_count(), Some(216));

        widget.activate();
        assert!(widget.is_open());
        assert!(!widget.grid_visible());
        assert_eq!(widget.cell_count(), Some(216));
    }

    #[test]
    fn reopening_after_a_dismissal_reuses_the_cells() {
        let widget = attach(SwatchOptions::new(), "");
        widget.activate();
        widget.dismiss(false);
        assert!(!widget.is_open());

        widget.activate();
        assert!(widget.is_open());
        assert!(widget.grid_visible());
        assert_eq!(widget.cell_count(), Some(216));
    }

    #[test]
    fn selection_commits_value_and_closes() {
        let selected = log();
        let widget = attach(SwatchOptions::new().on_select(push_into(&selected)), "");
        widget.activate();
        widget.select(1);

        assert_eq!(widget.committed_color(), "#ff3366");
        assert_eq!(widget.shown_color(), "#ff3366");
        assert_eq!(widget.shown_text(), "#ff3366");
        assert!(!widget.is_open());
        assert!(!widget.grid_visible());
        assert_eq!(*selected.borrow(), vec!["ff3366"]);
    }

    #[test]
    fn selection_writes_through_to_the_host_field() {
        let values = log();
        let (config, mut hooks) = SwatchOptions::new().resolve();
        hooks.on_value = Some(Rc::new(push_into(&values)));
        let widget = SwatchHandle::new(config, hooks, "");

        widget.activate();
        widget.select(0);
        assert_eq!(*values.borrow(), vec!["#990033"]);
    }

    #[test]
    fn hover_with_live_preview_repaints_without_committing() {
        let entered = log();
        let widget = attach(
            SwatchOptions::new()
                .live_preview(true)
                .on_cell_enter(push_into(&entered)),
            "",
        );
        widget.activate();
        widget.hover(0);

        assert_eq!(*entered.borrow(), vec!["990033"]);
        assert_eq!(widget.shown_color(), "#990033");
        assert_eq!(widget.committed_color(), "#FFF");
        assert!(widget.is_open());
    }

    #[test]
    fn hover_without_live_preview_leaves_the_display_alone() {
        let widget = attach(SwatchOptions::new(), "");
        widget.activate();
        widget.hover(0);
        assert_eq!(widget.shown_color(), "#FFF");
    }

    #[test]
    fn dismiss_outside_reverts_the_preview() {
        let closed = log();
        let widget = attach(
            SwatchOptions::new().live_preview(true).on_close({
                let closed = closed.clone();
                move || closed.borrow_mut().push("close".to_string())
            }),
            "",
        );
        widget.activate();
        widget.hover(3);
        widget.dismiss(false);

        assert_eq!(widget.shown_color(), "#FFF");
        assert_eq!(widget.shown_text(), "#FFF");
        assert!(!widget.is_open());
        assert_eq!(closed.borrow().len(), 1);
    }

    #[test]
    fn dismiss_after_own_cell_click_keeps_the_selection() {
        let closed = log();
        let widget = attach(
            SwatchOptions::new().on_close({
                let closed = closed.clone();
                move || closed.borrow_mut().push("close".to_string())
            }),
            "",
        );
        widget.activate();
        widget.select(0);
        widget.dismiss(true);

        assert_eq!(widget.shown_color(), "#990033");
        assert_eq!(closed.borrow().len(), 1);
    }

    #[test]
    fn force_close_on_never_opened_widget_is_a_noop() {
        let closed = log();
        let widget = attach(
            SwatchOptions::new().on_close({
                let closed = closed.clone();
                move || closed.borrow_mut().push("close".to_string())
            }),
            "",
        );
        widget.force_close();
        assert!(!widget.grid_visible());
        assert_eq!(widget.cell_count(), None);
        assert!(closed.borrow().is_empty());
    }

    #[test]
    fn force_close_hides_an_open_grid_without_on_close() {
        let closed = log();
        let widget = attach(
            SwatchOptions::new().on_close({
                let closed = closed.clone();
                move || closed.borrow_mut().push("close".to_string())
            }),
            "",
        );
        widget.activate();
        widget.force_close();
        assert!(!widget.grid_visible());
        assert!(closed.borrow().is_empty());
    }

    #[test]
    fn cells_are_laid_out_row_major_with_margins() {
        let (config, _) = SwatchOptions::new()
            .colors(Palette::new(["111111", "222222", "333333"]))
            .columns(2)
            .cell_width(10.0)
            .cell_height(8.0)
            .cell_margin(1.0)
            .resolve();
        let cells = build_cells(&config);

        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].rect, Rect::new(1.0, 1.0, 11.0, 9.0));
        assert_eq!(cells[1].rect, Rect::new(13.0, 1.0, 23.0, 9.0));
        // Third entry wraps to the second row.
        assert_eq!(cells[2].rect, Rect::new(1.0, 11.0, 11.0, 19.0));
        assert_eq!(cells[2].code, "333333");
    }

    #[test]
    fn pointer_hits_cells_but_not_margins() {
        let (config, _) = SwatchOptions::new()
            .colors(Palette::new(["111111", "222222", "333333", "444444"]))
            .columns(2)
            .resolve();
        let cells = build_cells(&config);

        assert_eq!(cell_index_at(&cells, Point::new(5.0, 5.0)), Some(0));
        assert_eq!(cell_index_at(&cells, Point::new(17.0, 17.0)), Some(3));
        // The margin between the two columns misses.
        assert_eq!(cell_index_at(&cells, Point::new(12.0, 5.0)), None);
        assert_eq!(cell_index_at(&cells, Point::new(500.0, 5.0)), None);
    }
}
