//! Layout constants for the dashboard

/// Height of the title bar in pixels
pub(super) const HEADER_HEIGHT_PX: u32 = 28;

/// Width of the right-hand column holding both tables
pub(super) const TABLE_COLUMN_WIDTH_PX: u32 = 180;

/// Space around and between the tables in pixels
pub(super) const TABLE_MARGIN_PX: u32 = 6;

pub(super) const HEADER_TITLE_PADDING_LEFT_PX: i32 = 10;
pub(super) const HEADER_STATUS_PADDING_RIGHT_PX: i32 = 10;

/// Rows of the "current" table: the latest record and the two before it
pub(super) const CURRENT_ROWS: usize = 3;

pub(super) const SERIES_LINE_WIDTH_PX: u32 = 2;

pub(super) const Y_AXIS_LABEL_COUNT: usize = 5;
pub(super) const X_AXIS_LABEL_COUNT: usize = 3;
