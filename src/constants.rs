//! Built-in defaults for the swatch picker's configuration knobs.

/// Default committed color when the host field starts out empty.
pub const DEFAULT_COLOR: &str = "#FFF";

/// Border width around the display box and the chooser grid.
pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;

/// Border color around the display box and the chooser grid.
pub const DEFAULT_BORDER_COLOR: &str = "#000";

/// Width of each individual color cell.
pub const DEFAULT_CELL_WIDTH: f64 = 10.0;

/// Height of each individual color cell.
pub const DEFAULT_CELL_HEIGHT: f64 = 10.0;

/// Margin around each individual color cell.
pub const DEFAULT_CELL_MARGIN: f64 = 1.0;

/// Width of the color display box.
pub const DEFAULT_BOX_WIDTH: f64 = 115.0;

/// Height of the color display box.
pub const DEFAULT_BOX_HEIGHT: f64 = 20.0;

/// Number of chooser columns. The default palette is laid out for 16.
pub const DEFAULT_COLUMNS: usize = 16;

/// Text color of the code shown inside the display box.
pub const DEFAULT_CODE_COLOR: &str = "#FFF";

/// Gap between the display box and the chooser grid.
pub const CHOOSER_GAP: f32 = 5.0;

/// Extra chooser width under the vger renderer, which otherwise clips the
/// last cell column by a hairline on each side.
pub const VGER_WIDTH_PAD: f64 = 2.0;
