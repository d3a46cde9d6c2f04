//! Configuration resolution: caller options merged over per-field overrides
//! and built-in defaults into one immutable record per widget.

use std::rc::Rc;

use floem::style::Style;

use crate::constants;
use crate::palette::Palette;

/// Where the widget is placed relative to the (hidden) host input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Insert {
    Before,
    #[default]
    After,
}

/// Alignment of the color code text inside the display box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Optional configuration knobs for [`swatch_picker`](crate::swatch_picker).
///
/// Every knob is optional; unset knobs fall back to the host field's
/// overrides, then to the built-in defaults. Build one with the setter
/// methods:
///
/// ```rust,no_run
/// use floem_swatch::SwatchOptions;
///
/// let options = SwatchOptions::new()
///     .columns(8)
///     .live_preview(true)
///     .on_select(|code| println!("picked #{code}"));
/// ```
#[derive(Clone, Default)]
pub struct SwatchOptions {
    pub(crate) default_color: Option<String>,
    pub(crate) border_width: Option<f64>,
    pub(crate) border_color: Option<String>,
    pub(crate) cell_width: Option<f64>,
    pub(crate) cell_height: Option<f64>,
    pub(crate) cell_margin: Option<f64>,
    pub(crate) box_width: Option<f64>,
    pub(crate) box_height: Option<f64>,
    pub(crate) columns: Option<usize>,
    pub(crate) insert: Option<Insert>,
    pub(crate) button_style: Option<Style>,
    pub(crate) colors: Option<Palette>,
    pub(crate) display_color_code: Option<bool>,
    pub(crate) code_align: Option<CodeAlign>,
    pub(crate) code_color: Option<String>,
    pub(crate) live_preview: Option<bool>,
    #[cfg(feature = "clipboard")]
    pub(crate) copy_on_select: Option<bool>,
    pub(crate) on_select: Option<Rc<dyn Fn(&str)>>,
    pub(crate) on_cell_enter: Option<Rc<dyn Fn(&str)>>,
    pub(crate) on_close: Option<Rc<dyn Fn()>>,
}

impl SwatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed color used when the host field starts out empty.
    pub fn default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = Some(color.into());
        self
    }

    /// Border width of the display box and the chooser grid, in pixels.
    pub fn border_width(mut self, width: f64) -> Self {
        self.border_width = Some(width);
        self
    }

    /// Border color of the display box and the chooser grid.
    pub fn border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    /// Width of each color cell, in pixels.
    pub fn cell_width(mut self, width: f64) -> Self {
        self.cell_width = Some(width);
        self
    }

    /// Height of each color cell, in pixels.
    pub fn cell_height(mut self, height: f64) -> Self {
        self.cell_height = Some(height);
        self
    }

    /// Margin around each color cell, in pixels.
    pub fn cell_margin(mut self, margin: f64) -> Self {
        self.cell_margin = Some(margin);
        self
    }

    /// Width of the color display box, in pixels.
    pub fn box_width(mut self, width: f64) -> Self {
        self.box_width = Some(width);
        self
    }

    /// Height of the color display box, in pixels.
    pub fn box_height(mut self, height: f64) -> Self {
        self.box_height = Some(height);
        self
    }

    /// Number of chooser columns. Color order may look strange if this is
    /// altered while keeping the default palette.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Place the widget before or after the hidden host input.
    pub fn insert(mut self, insert: Insert) -> Self {
        self.insert = Some(insert);
        self
    }

    /// Extra style merged onto the display box.
    pub fn button_style(mut self, style: Style) -> Self {
        self.button_style = Some(style);
        self
    }

    /// Palette shown in the chooser instead of the built-in one.
    pub fn colors(mut self, palette: Palette) -> Self {
        self.colors = Some(palette);
        self
    }

    /// Show the current color code as text inside the display box.
    pub fn display_color_code(mut self, display: bool) -> Self {
        self.display_color_code = Some(display);
        self
    }

    /// Alignment of the code text. Only used with `display_color_code`.
    pub fn code_align(mut self, align: CodeAlign) -> Self {
        self.code_align = Some(align);
        self
    }

    /// Color of the code text. Only used with `display_color_code`.
    pub fn code_color(mut self, color: impl Into<String>) -> Self {
        self.code_color = Some(color.into());
        self
    }

    /// Repaint the display box while hovering cells; reverted if no color is
    /// selected.
    pub fn live_preview(mut self, live: bool) -> Self {
        self.live_preview = Some(live);
        self
    }

    /// Also copy `#code` to the system clipboard on selection.
    #[cfg(feature = "clipboard")]
    pub fn copy_on_select(mut self, copy: bool) -> Self {
        self.copy_on_select = Some(copy);
        self
    }

    /// Called with the bare hex code after a color has been chosen.
    pub fn on_select(mut self, callback: impl Fn(&str) + 'static) -> Self {
        self.on_select = Some(Rc::new(callback));
        self
    }

    /// Called with the bare hex code when the pointer enters a cell.
    pub fn on_cell_enter(mut self, callback: impl Fn(&str) + 'static) -> Self {
        self.on_cell_enter = Some(Rc::new(callback));
        self
    }

    /// Called whenever the chooser is closed.
    pub fn on_close(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(callback));
        self
    }

    /// Layer `self` over `fallback`: set knobs win, unset knobs fall through.
    pub(crate) fn or(mut self, fallback: &SwatchOptions) -> SwatchOptions {
        self.default_color = self.default_color.or_else(|| fallback.default_color.clone());
        self.border_width = self.border_width.or(fallback.border_width);
        self.border_color = self.border_color.or_else(|| fallback.border_color.clone());
        self.cell_width = self.cell_width.or(fallback.cell_width);
        self.cell_height = self.cell_height.or(fallback.cell_height);
        self.cell_margin = self.cell_margin.or(fallback.cell_margin);
        self.box_width = self.box_width.or(fallback.box_width);
        self.box_height = self.box_height.or(fallback.box_height);
        self.columns = self.columns.or(fallback.columns);
        self.insert = self.insert.or(fallback.insert);
        self.button_style = self.button_style.or_else(|| fallback.button_style.clone());
        self.colors = self.colors.or_else(|| fallback.colors.clone());
        self.display_color_code = self.display_color_code.or(fallback.display_color_code);
        self.code_align = self.code_align.or(fallback.code_align);
        self.code_color = self.code_color.or_else(|| fallback.code_color.clone());
        self.live_preview = self.live_preview.or(fallback.live_preview);
        #[cfg(feature = "clipboard")]
        {
            self.copy_on_select = self.copy_on_select.or(fallback.copy_on_select);
        }
        self.on_select = self.on_select.or_else(|| fallback.on_select.clone());
        self.on_cell_enter = self.on_cell_enter.or_else(|| fallback.on_cell_enter.clone());
        self.on_close = self.on_close.or_else(|| fallback.on_close.clone());
        self
    }

    /// Seal the options into an immutable per-widget configuration plus the
    /// callback set.
    pub(crate) fn resolve(self) -> (SwatchConfig, SwatchHooks) {
        let columns = self.columns.unwrap_or(constants::DEFAULT_COLUMNS).max(1);
        let palette = self.colors.unwrap_or_default();
        let cell_width = self.cell_width.unwrap_or(constants::DEFAULT_CELL_WIDTH);
        let cell_height = self.cell_height.unwrap_or(constants::DEFAULT_CELL_HEIGHT);
        let cell_margin = self.cell_margin.unwrap_or(constants::DEFAULT_CELL_MARGIN);

        let total_width = chooser_width(
            columns,
            cell_width,
            cell_margin,
            cfg!(not(feature = "vello")),
        );
        let total_height = chooser_height(palette.len(), columns, cell_height, cell_margin);

        let hooks = SwatchHooks {
            on_select: self.on_select,
            on_cell_enter: self.on_cell_enter,
            on_close: self.on_close,
            on_value: None,
        };

        let config = SwatchConfig {
            default_color: self
                .default_color
                .unwrap_or_else(|| constants::DEFAULT_COLOR.to_string()),
            border_width: self.border_width.unwrap_or(constants::DEFAULT_BORDER_WIDTH),
            border_color: self
                .border_color
                .unwrap_or_else(|| constants::DEFAULT_BORDER_COLOR.to_string()),
            cell_width,
            cell_height,
            cell_margin,
            box_width: self.box_width.unwrap_or(constants::DEFAULT_BOX_WIDTH),
            box_height: self.box_height.unwrap_or(constants::DEFAULT_BOX_HEIGHT),
            columns,
            insert: self.insert.unwrap_or_default(),
            button_style: self.button_style,
            palette,
            display_color_code: self.display_color_code.unwrap_or(false),
            code_align: self.code_align.unwrap_or_default(),
            code_color: self
                .code_color
                .unwrap_or_else(|| constants::DEFAULT_CODE_COLOR.to_string()),
            live_preview: self.live_preview.unwrap_or(false),
            #[cfg(feature = "clipboard")]
            copy_on_select: self.copy_on_select.unwrap_or(false),
            total_width,
            total_height,
        };

        (config, hooks)
    }
}

/// The sealed per-widget configuration. Resolved once at attach time.
#[derive(Clone)]
pub(crate) struct SwatchConfig {
    pub(crate) default_color: String,
    pub(crate) border_width: f64,
    pub(crate) border_color: String,
    pub(crate) cell_width: f64,
    pub(crate) cell_height: f64,
    pub(crate) cell_margin: f64,
    pub(crate) box_width: f64,
    pub(crate) box_height: f64,
    pub(crate) columns: usize,
    pub(crate) insert: Insert,
    pub(crate) button_style: Option<Style>,
    pub(crate) palette: Palette,
    pub(crate) display_color_code: bool,
    pub(crate) code_align: CodeAlign,
    pub(crate) code_color: String,
    pub(crate) live_preview: bool,
    #[cfg(feature = "clipboard")]
    pub(crate) copy_on_select: bool,
    pub(crate) total_width: f64,
    pub(crate) total_height: f64,
}

/// Optional callbacks attached to a widget, no-ops when absent.
#[derive(Clone, Default)]
pub(crate) struct SwatchHooks {
    pub(crate) on_select: Option<Rc<dyn Fn(&str)>>,
    pub(crate) on_cell_enter: Option<Rc<dyn Fn(&str)>>,
    pub(crate) on_close: Option<Rc<dyn Fn()>>,
    /// Write-through to the host field, wired by the widget factory.
    pub(crate) on_value: Option<Rc<dyn Fn(&str)>>,
}

/// Outer chooser width for `columns` cells of `cell_width` with `cell_margin`
/// on each side. `vger_pad` widens by [`constants::VGER_WIDTH_PAD`].
pub(crate) fn chooser_width(
    columns: usize,
    cell_width: f64,
    cell_margin: f64,
    vger_pad: bool,
) -> f64 {
    let width = columns as f64 * (cell_width + 2.0 * cell_margin);
    if vger_pad {
        width + constants::VGER_WIDTH_PAD
    } else {
        width
    }
}

/// Outer chooser height: one row per `columns` palette entries, last row
/// possibly partial.
pub(crate) fn chooser_height(
    palette_len: usize,
    columns: usize,
    cell_height: f64,
    cell_margin: f64,
) -> f64 {
    palette_len.div_ceil(columns) as f64 * (cell_height + 2.0 * cell_margin)
}
