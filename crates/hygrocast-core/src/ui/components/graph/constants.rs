//! Constants for graph rendering
//!
//! All magic numbers are defined here with descriptive names and units.

use embedded_graphics::pixelcolor::Rgb565;

use crate::ui::styling::DARK_GRAY;

/// Default number of vertical grid lines
pub const DEFAULT_VERTICAL_GRID_COUNT: usize = 5;

/// Default number of horizontal grid lines
pub const DEFAULT_HORIZONTAL_GRID_COUNT: usize = 3;

/// Default grid line color (subtle dark gray)
pub const DEFAULT_GRID_COLOR: Rgb565 = DARK_GRAY;

/// Default grid line width in pixels
pub const DEFAULT_GRID_LINE_WIDTH_PX: u32 = 1;

/// Default number of axis labels
pub const DEFAULT_AXIS_LABEL_COUNT: usize = 3;

/// Maximum length of formatted axis labels (characters)
pub const MAX_AXIS_LABEL_LENGTH: usize = 16;

/// Gap between the plot area and X-axis label baselines in pixels
pub const X_LABEL_OFFSET_PX: i32 = 12;

/// Gap between the plot area and right-aligned Y-axis labels in pixels
pub const Y_LABEL_OFFSET_PX: i32 = 4;

/// Default viewport padding for top edge in pixels (room for the legend)
pub const DEFAULT_VIEWPORT_PADDING_TOP_PX: u32 = 20;

/// Default viewport padding for right edge in pixels
pub const DEFAULT_VIEWPORT_PADDING_RIGHT_PX: u32 = 26;

/// Default viewport padding for bottom edge in pixels
pub const DEFAULT_VIEWPORT_PADDING_BOTTOM_PX: u32 = 18;

/// Default viewport padding for left edge in pixels (room for Y labels)
pub const DEFAULT_VIEWPORT_PADDING_LEFT_PX: u32 = 40;

/// Minimum data range for auto-scaling (prevents division by zero)
pub const MIN_DATA_RANGE: f32 = 0.001;

/// Margin factor for auto-scaling the Y axis (10% padding)
pub const AUTO_SCALE_MARGIN_FACTOR: f32 = 0.1;

/// Default series line width in pixels
pub const DEFAULT_SERIES_LINE_WIDTH_PX: u32 = 2;

/// Diameter of the marker drawn for a lone data point in pixels
pub const SINGLE_POINT_MARKER_DIAMETER_PX: u32 = 5;

/// Side of the legend color swatch in pixels
pub const LEGEND_SWATCH_SIZE_PX: u32 = 8;

/// Gap between legend entries in pixels
pub const LEGEND_ENTRY_GAP_PX: i32 = 12;

/// Distance of the legend from the top of the graph in pixels
pub const LEGEND_OFFSET_Y_PX: i32 = 6;
