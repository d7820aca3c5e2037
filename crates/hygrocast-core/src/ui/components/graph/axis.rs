//! Axis labels
//!
//! The X axis carries elapsed seconds; [`LabelFormatter::TimeOfDay`] turns
//! them back into wall-clock labels using the session origin.

use core::fmt::Write;

use chrono::{DateTime, Local, TimeDelta};
use embedded_graphics::mono_font::{MonoTextStyle, iso_8859_1::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};
use heapless::String;

use crate::ui::styling::LIGHT_GRAY;

use super::constants::{
    DEFAULT_AXIS_LABEL_COUNT, MAX_AXIS_LABEL_LENGTH, X_LABEL_OFFSET_PX, Y_LABEL_OFFSET_PX,
};
use super::viewport::Viewport;

/// Label formatter for axis values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelFormatter {
    /// Numeric value with a fixed number of decimals and an optional unit
    Numeric {
        precision: usize,
        /// Unit suffix (e.g. "%")
        unit: &'static str,
    },
    /// Elapsed seconds rendered as `HH:MM:SS` past `origin`.
    ///
    /// Falls back to plain seconds while the origin is unknown.
    TimeOfDay { origin: Option<DateTime<Local>> },
}

impl LabelFormatter {
    pub fn format(&self, value: f32) -> String<MAX_AXIS_LABEL_LENGTH> {
        let mut s = String::new();
        // Overlong labels are truncated by the capacity, not an error
        let _ = match *self {
            Self::Numeric { precision, unit } => {
                write!(s, "{:.*}{}", precision, value, unit)
            }
            Self::TimeOfDay { origin: Some(origin) } => {
                let at = origin + TimeDelta::milliseconds((value * 1000.0).round() as i64);
                write!(s, "{}", at.format("%H:%M:%S"))
            }
            Self::TimeOfDay { origin: None } => write!(s, "{:.0}s", value),
        };
        s
    }
}

/// Labels along one axis
#[derive(Clone, Copy)]
pub struct AxisConfig {
    /// Number of evenly spaced labels, ends included
    pub label_count: usize,
    pub label_formatter: LabelFormatter,
    pub label_style: MonoTextStyle<'static, Rgb565>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            label_count: DEFAULT_AXIS_LABEL_COUNT,
            label_formatter: LabelFormatter::Numeric {
                precision: 1,
                unit: "",
            },
            label_style: MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY),
        }
    }
}

/// Axis configuration of a graph; `None` hides the axis labels
#[derive(Clone, Copy, Default)]
pub struct Axes {
    pub x: Option<AxisConfig>,
    pub y: Option<AxisConfig>,
}

/// Fraction of the axis covered at label `i` of `count`
fn label_fraction(i: usize, count: usize) -> f32 {
    if count > 1 {
        i as f32 / (count - 1) as f32
    } else {
        0.5
    }
}

/// Labels below the plot area; the outer labels are aligned inward so they
/// stay inside the graph.
pub(super) fn draw_x_axis_labels<D: DrawTarget<Color = Rgb565>>(
    config: &AxisConfig,
    viewport: &Viewport,
    display: &mut D,
) -> Result<(), D::Error> {
    let plot_area = viewport.plot_area();
    let bounds = viewport.data_bounds();
    let label_y = plot_area.top_left.y + plot_area.size.height as i32 + X_LABEL_OFFSET_PX;

    for i in 0..config.label_count {
        let t = label_fraction(i, config.label_count);
        let value = bounds.x_min + bounds.x_range() * t;
        let label_x = plot_area.top_left.x + (plot_area.size.width as f32 * t) as i32;

        let alignment = match i {
            0 if config.label_count > 1 => Alignment::Left,
            i if i + 1 == config.label_count && i > 0 => Alignment::Right,
            _ => Alignment::Center,
        };

        Text::with_alignment(
            config.label_formatter.format(value).as_str(),
            Point::new(label_x, label_y),
            config.label_style,
            alignment,
        )
        .draw(display)?;
    }

    Ok(())
}

/// Right-aligned labels left of the plot area, maximum at the top
pub(super) fn draw_y_axis_labels<D: DrawTarget<Color = Rgb565>>(
    config: &AxisConfig,
    viewport: &Viewport,
    display: &mut D,
) -> Result<(), D::Error> {
    let plot_area = viewport.plot_area();
    let bounds = viewport.data_bounds();
    let label_x = plot_area.top_left.x - Y_LABEL_OFFSET_PX;
    let half_glyph = config.label_style.font.character_size.height as i32 / 2;

    for i in 0..config.label_count {
        let t = label_fraction(i, config.label_count);
        let value = bounds.y_max - bounds.y_range() * t;
        let label_y = plot_area.top_left.y + (plot_area.size.height as f32 * t) as i32;

        Text::with_alignment(
            config.label_formatter.format(value).as_str(),
            Point::new(label_x, label_y + half_glyph),
            config.label_style,
            Alignment::Right,
        )
        .draw(display)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_numeric_precision_and_unit() {
        let formatter = LabelFormatter::Numeric {
            precision: 1,
            unit: "%",
        };
        assert_eq!(formatter.format(45.26).as_str(), "45.3%");

        let formatter = LabelFormatter::Numeric {
            precision: 0,
            unit: "",
        };
        assert_eq!(formatter.format(21.7).as_str(), "22");
    }

    #[test]
    fn test_time_of_day_offsets_origin() {
        let origin = Local.with_ymd_and_hms(2024, 6, 1, 23, 59, 30).unwrap();
        let formatter = LabelFormatter::TimeOfDay {
            origin: Some(origin),
        };

        assert_eq!(formatter.format(0.0).as_str(), "23:59:30");
        assert_eq!(formatter.format(45.0).as_str(), "00:00:15");
    }

    #[test]
    fn test_time_of_day_without_origin() {
        let formatter = LabelFormatter::TimeOfDay { origin: None };
        assert_eq!(formatter.format(12.4).as_str(), "12s");
    }

    #[test]
    fn test_label_fraction_spans_axis() {
        assert_eq!(label_fraction(0, 3), 0.0);
        assert_eq!(label_fraction(1, 3), 0.5);
        assert_eq!(label_fraction(2, 3), 1.0);
        assert_eq!(label_fraction(0, 1), 0.5);
    }
}
