//! Background grid of the plot area

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use super::constants::{
    DEFAULT_GRID_COLOR, DEFAULT_GRID_LINE_WIDTH_PX, DEFAULT_HORIZONTAL_GRID_COUNT,
    DEFAULT_VERTICAL_GRID_COUNT,
};
use super::viewport::Viewport;

/// Line style for grid rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed {
        /// Length of each dash in pixels
        dash_length: u32,
        /// Length of gap between dashes in pixels
        gap_length: u32,
    },
}

/// Evenly spaced vertical lines, plot edges excluded
#[derive(Debug, Clone, Copy)]
pub struct VerticalGridLines {
    pub count: usize,
    pub color: Rgb565,
    pub width: u32,
    pub style: LineStyle,
}

impl Default for VerticalGridLines {
    fn default() -> Self {
        Self {
            count: DEFAULT_VERTICAL_GRID_COUNT,
            color: DEFAULT_GRID_COLOR,
            width: DEFAULT_GRID_LINE_WIDTH_PX,
            style: LineStyle::Dashed {
                dash_length: 2,
                gap_length: 3,
            },
        }
    }
}

/// Evenly spaced horizontal lines, plot edges included so they line up
/// with the Y-axis labels
#[derive(Debug, Clone, Copy)]
pub struct HorizontalGridLines {
    pub count: usize,
    pub color: Rgb565,
    pub width: u32,
    pub style: LineStyle,
}

impl Default for HorizontalGridLines {
    fn default() -> Self {
        Self {
            count: DEFAULT_HORIZONTAL_GRID_COUNT,
            color: DEFAULT_GRID_COLOR,
            width: DEFAULT_GRID_LINE_WIDTH_PX,
            style: LineStyle::Solid,
        }
    }
}

/// Complete grid configuration; `None` disables a direction
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    pub vertical_lines: Option<VerticalGridLines>,
    pub horizontal_lines: Option<HorizontalGridLines>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            vertical_lines: Some(VerticalGridLines::default()),
            horizontal_lines: Some(HorizontalGridLines::default()),
        }
    }
}

pub(super) fn draw_grid<D: DrawTarget<Color = Rgb565>>(
    config: &GridConfig,
    viewport: &Viewport,
    display: &mut D,
) -> Result<(), D::Error> {
    let plot_area = viewport.plot_area();
    let left = plot_area.top_left.x;
    let top = plot_area.top_left.y;
    let right = left + plot_area.size.width.saturating_sub(1) as i32;
    let bottom = top + plot_area.size.height.saturating_sub(1) as i32;

    if let Some(ref vlines) = config.vertical_lines
        && vlines.count > 0
    {
        let spacing = plot_area.size.width as f32 / (vlines.count + 1) as f32;
        for i in 1..=vlines.count {
            let x = left + (spacing * i as f32) as i32;
            draw_line(
                Point::new(x, top),
                Point::new(x, bottom),
                vlines.color,
                vlines.width,
                vlines.style,
                display,
            )?;
        }
    }

    if let Some(ref hlines) = config.horizontal_lines
        && hlines.count > 0
    {
        let divisions = hlines.count.saturating_sub(1).max(1) as f32;
        for i in 0..hlines.count {
            let y = top + ((bottom - top) as f32 * i as f32 / divisions) as i32;
            draw_line(
                Point::new(left, y),
                Point::new(right, y),
                hlines.color,
                hlines.width,
                hlines.style,
                display,
            )?;
        }
    }

    Ok(())
}

fn draw_line<D: DrawTarget<Color = Rgb565>>(
    start: Point,
    end: Point,
    color: Rgb565,
    width: u32,
    style: LineStyle,
    display: &mut D,
) -> Result<(), D::Error> {
    let line_style = PrimitiveStyle::with_stroke(color, width);

    match style {
        LineStyle::Solid => Line::new(start, end).into_styled(line_style).draw(display),
        LineStyle::Dashed {
            dash_length,
            gap_length,
        } => {
            for (from, to) in dash_segments(start, end, dash_length, gap_length) {
                Line::new(from, to).into_styled(line_style).draw(display)?;
            }
            Ok(())
        }
    }
}

/// Start and end points of the dashes between `start` and `end`
fn dash_segments(
    start: Point,
    end: Point,
    dash_length: u32,
    gap_length: u32,
) -> impl Iterator<Item = (Point, Point)> {
    let dx = (end.x - start.x) as f32;
    let dy = (end.y - start.y) as f32;
    let total = dx.hypot(dy);
    let pattern = (dash_length + gap_length).max(1) as f32;
    let dashes = if total < 0.1 {
        0
    } else {
        (total / pattern).ceil() as usize
    };

    let at = move |distance: f32| {
        let t = distance / total;
        Point::new(start.x + (dx * t) as i32, start.y + (dy * t) as i32)
    };

    (0..dashes).map(move |i| {
        let from = i as f32 * pattern;
        let to = (from + dash_length as f32).min(total);
        (at(from), at(to))
    })
}
