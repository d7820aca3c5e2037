//! Fixed-size text table with a title and a header row
//!
//! Used for the "current reading" and "forecast" panels. Every row has
//! [`COLUMNS`] cells; cells that have not been filled show a placeholder.

use chrono::{DateTime, Local};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, iso_8859_1::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Baseline, Text};
use thiserror::Error;

use crate::ui::core::Drawable;
use crate::ui::styling::{COLOR_FOREGROUND, COLOR_STROKE, DARK_GRAY, LIGHT_GRAY, WHITE};
use crate::ui::FONT_6X10_CHAR_HEIGHT_PX;

/// Cells per row: time, temperature, humidity
pub const COLUMNS: usize = 3;

/// Maximum characters per cell
pub const CELL_CAPACITY: usize = 16;

/// Text of a cell that holds no value yet
pub const PLACEHOLDER: &str = "---";

const CELL_PADDING_PX: i32 = 4;
const ROW_HEIGHT_PX: u32 = FONT_6X10_CHAR_HEIGHT_PX + 4;

/// Text of one table cell
pub type Cell = heapless::String<CELL_CAPACITY>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Row {index} out of range (rows: {rows})")]
    RowOutOfRange { index: usize, rows: usize },
}

/// Build a cell from `text`, truncated to [`CELL_CAPACITY`] characters
pub fn cell(text: &str) -> Cell {
    let mut cell = Cell::new();
    for c in text.chars() {
        if cell.push(c).is_err() {
            break;
        }
    }
    cell
}

/// Reading value with two decimals
pub fn format_value(value: f64) -> Cell {
    let mut cell = Cell::new();
    let _ = core::fmt::write(&mut cell, format_args!("{:.2}", value));
    cell
}

/// Wall-clock time as `HH:MM:SS`
pub fn format_time(timestamp: DateTime<Local>) -> Cell {
    let mut cell = Cell::new();
    let _ = core::fmt::write(&mut cell, format_args!("{}", timestamp.format("%H:%M:%S")));
    cell
}

/// Titled table with `ROWS` rows of [`COLUMNS`] cells
pub struct Table<const ROWS: usize> {
    bounds: Rectangle,
    title: &'static str,
    headers: [&'static str; COLUMNS],
    rows: [[Cell; COLUMNS]; ROWS],
    dirty: bool,
}

impl<const ROWS: usize> Table<ROWS> {
    pub fn new(bounds: Rectangle, title: &'static str, headers: [&'static str; COLUMNS]) -> Self {
        Self {
            bounds,
            title,
            headers,
            rows: core::array::from_fn(|_| placeholder_row()),
            dirty: true,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn headers(&self) -> &[&'static str; COLUMNS] {
        &self.headers
    }

    pub fn row(&self, index: usize) -> Option<&[Cell; COLUMNS]> {
        self.rows.get(index)
    }

    /// Replace the cells of row `index`; marks the table dirty only if the
    /// text changed.
    pub fn set_row(&mut self, index: usize, cells: [Cell; COLUMNS]) -> Result<(), TableError> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange { index, rows: ROWS })?;

        if *row != cells {
            *row = cells;
            self.dirty = true;
        }
        Ok(())
    }

    /// Reset row `index` to placeholders
    pub fn clear_row(&mut self, index: usize) -> Result<(), TableError> {
        self.set_row(index, placeholder_row())
    }

    /// Reset every row to placeholders
    pub fn clear(&mut self) {
        for index in 0..ROWS {
            // In range by construction
            let _ = self.clear_row(index);
        }
    }

    fn column_x(&self, column: usize) -> i32 {
        let width = self.bounds.size.width as i32 / COLUMNS as i32;
        self.bounds.top_left.x + width * column as i32 + CELL_PADDING_PX
    }

    /// Top of line `line` counted from the title (0), headers (1), rows (2..)
    fn line_y(&self, line: usize) -> i32 {
        self.bounds.top_left.y + CELL_PADDING_PX + (ROW_HEIGHT_PX as usize * line) as i32
    }

    fn draw_cells<D: DrawTarget<Color = Rgb565>>(
        &self,
        cells: impl IntoIterator<Item = impl AsRef<str>>,
        y: i32,
        style: MonoTextStyle<'static, Rgb565>,
        display: &mut D,
    ) -> Result<(), D::Error> {
        for (column, text) in cells.into_iter().enumerate().take(COLUMNS) {
            Text::with_baseline(
                text.as_ref(),
                Point::new(self.column_x(column), y),
                style,
                Baseline::Top,
            )
            .draw(display)?;
        }
        Ok(())
    }
}

fn placeholder_row() -> [Cell; COLUMNS] {
    core::array::from_fn(|_| cell(PLACEHOLDER))
}

impl<const ROWS: usize> Drawable for Table<ROWS> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let panel = PrimitiveStyleBuilder::new()
            .fill_color(COLOR_FOREGROUND)
            .stroke_color(COLOR_STROKE)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        self.bounds.into_styled(panel).draw(display)?;

        let title_style = MonoTextStyle::new(&FONT_6X10, WHITE);
        Text::with_baseline(
            self.title,
            Point::new(self.bounds.top_left.x + CELL_PADDING_PX, self.line_y(0)),
            title_style,
            Baseline::Top,
        )
        .draw(display)?;

        let header_y = self.line_y(1);
        self.draw_cells(
            self.headers,
            header_y,
            MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY),
            display,
        )?;

        let rule_y = header_y + FONT_6X10_CHAR_HEIGHT_PX as i32 + 1;
        let left = self.bounds.top_left.x + CELL_PADDING_PX;
        let right = self.bounds.top_left.x + self.bounds.size.width as i32 - CELL_PADDING_PX - 1;
        Line::new(Point::new(left, rule_y), Point::new(right, rule_y))
            .into_styled(PrimitiveStyle::with_stroke(DARK_GRAY, 1))
            .draw(display)?;

        let value_style = MonoTextStyle::new(&FONT_6X10, WHITE);
        for (i, row) in self.rows.iter().enumerate() {
            self.draw_cells(row.iter().map(|c| c.as_str()), self.line_y(i + 2), value_style, display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Height a table with `rows` rows needs to draw without clipping
pub const fn table_height(rows: usize) -> u32 {
    (rows as u32 + 2) * ROW_HEIGHT_PX + 2 * CELL_PADDING_PX as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use embedded_graphics::mock_display::MockDisplay;

    fn table() -> Table<2> {
        Table::new(
            Rectangle::new(Point::zero(), Size::new(64, table_height(2))),
            "Now",
            ["Time", "°C", "%RH"],
        )
    }

    #[test]
    fn test_new_rows_are_placeholders() {
        let table = table();
        for i in 0..2 {
            assert!(table.row(i).unwrap().iter().all(|c| c.as_str() == PLACEHOLDER));
        }
        assert!(table.row(2).is_none());
    }

    #[test]
    fn test_set_row_out_of_range() {
        let mut table = table();
        assert_eq!(
            table.set_row(2, placeholder_row()),
            Err(TableError::RowOutOfRange { index: 2, rows: 2 })
        );
    }

    #[test]
    fn test_set_row_marks_dirty_only_on_change() {
        let mut table = table();
        table.mark_clean();

        let cells = [cell("12:00:00"), format_value(20.0), format_value(50.5)];
        table.set_row(0, cells.clone()).unwrap();
        assert!(table.is_dirty());
        assert_eq!(table.row(0).unwrap()[1].as_str(), "20.00");

        table.mark_clean();
        table.set_row(0, cells).unwrap();
        assert!(!table.is_dirty());

        table.clear_row(0).unwrap();
        assert!(table.is_dirty());
        assert_eq!(table.row(0).unwrap()[0].as_str(), PLACEHOLDER);
    }

    #[test]
    fn test_cell_truncates() {
        assert_eq!(cell("0123456789abcdefXYZ").as_str(), "0123456789abcdef");
    }

    #[test]
    fn test_format_value_two_decimals() {
        assert_eq!(format_value(21.456).as_str(), "21.46");
        assert_eq!(format_value(-0.5).as_str(), "-0.50");
    }

    #[test]
    fn test_format_time() {
        let at = Local.with_ymd_and_hms(2024, 6, 1, 7, 5, 9).unwrap();
        assert_eq!(format_time(at).as_str(), "07:05:09");
    }

    #[test]
    fn test_draw_smoke() {
        let mut table = table();
        table
            .set_row(0, [cell("12:00:00"), format_value(20.0), format_value(50.0)])
            .unwrap();

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);

        table.draw(&mut display).unwrap();
        assert_eq!(display.get_pixel(Point::zero()), Some(COLOR_STROKE));
    }
}
