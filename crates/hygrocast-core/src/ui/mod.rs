//! Rendering layer for the hygrocast dashboard
//!
//! Everything here draws to an `embedded_graphics::DrawTarget<Color = Rgb565>`,
//! so the same code renders into the SDL simulator window and into
//! `MockDisplay` in tests.

pub mod components;
pub mod core;
pub mod styling;

pub use components::{
    COLUMNS, Cell, DataPoint, DataSeries, Graph, GraphError, LabelFormatter, SeriesStyle, Table,
    TableError,
};
pub use self::core::Drawable;
pub use styling::{
    COLOR_BACKGROUND, COLOR_FOREGROUND, COLOR_STROKE, DARK_GRAY, HUMIDITY_COLOR, LIGHT_GRAY,
    TEMPERATURE_COLOR, WHITE,
};

/// Logical width of the dashboard in pixels
pub const DISPLAY_WIDTH_PX: u32 = 480;

/// Logical height of the dashboard in pixels
pub const DISPLAY_HEIGHT_PX: u32 = 320;

/// Glyph cell of the 6x10 fonts
pub const FONT_6X10_CHAR_WIDTH_PX: u32 = 6;
pub const FONT_6X10_CHAR_HEIGHT_PX: u32 = 10;
