//! Mapping between data space (elapsed seconds, readings) and pixels

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::constants::{
    DEFAULT_VIEWPORT_PADDING_BOTTOM_PX, DEFAULT_VIEWPORT_PADDING_LEFT_PX,
    DEFAULT_VIEWPORT_PADDING_RIGHT_PX, DEFAULT_VIEWPORT_PADDING_TOP_PX, MIN_DATA_RANGE,
};
use super::series::DataPoint;

/// Data space bounds (min/max x and y values)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl DataBounds {
    pub const fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Smallest bounds holding every point.
    ///
    /// The X range is kept tight so the newest sample sits on the right edge;
    /// the Y range grows by `y_margin_factor` on both sides. Degenerate ranges
    /// are widened to [`MIN_DATA_RANGE`] around their value.
    pub fn from_points<'a>(
        points: impl IntoIterator<Item = &'a DataPoint>,
        y_margin_factor: f32,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let mut bounds = Self::new(first.x, first.x, first.y, first.y);
        for point in points {
            bounds.x_min = bounds.x_min.min(point.x);
            bounds.x_max = bounds.x_max.max(point.x);
            bounds.y_min = bounds.y_min.min(point.y);
            bounds.y_max = bounds.y_max.max(point.y);
        }

        if bounds.x_range() < MIN_DATA_RANGE {
            bounds.x_min -= MIN_DATA_RANGE / 2.0;
            bounds.x_max += MIN_DATA_RANGE / 2.0;
        }

        let y_margin = bounds.y_range().max(MIN_DATA_RANGE) * y_margin_factor;
        bounds.y_min -= y_margin;
        bounds.y_max += y_margin;
        if bounds.y_range() < MIN_DATA_RANGE {
            bounds.y_min -= MIN_DATA_RANGE / 2.0;
            bounds.y_max += MIN_DATA_RANGE / 2.0;
        }

        Some(bounds)
    }

    pub fn x_range(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn y_range(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// Space between the graph bounds and the plot area, for labels and legend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPadding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for ViewportPadding {
    fn default() -> Self {
        Self {
            top: DEFAULT_VIEWPORT_PADDING_TOP_PX,
            right: DEFAULT_VIEWPORT_PADDING_RIGHT_PX,
            bottom: DEFAULT_VIEWPORT_PADDING_BOTTOM_PX,
            left: DEFAULT_VIEWPORT_PADDING_LEFT_PX,
        }
    }
}

impl ViewportPadding {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Transforms data coordinates into screen coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    data_bounds: DataBounds,
    /// Full area including padding
    screen_bounds: Rectangle,
    padding: ViewportPadding,
}

impl Viewport {
    pub fn new(data_bounds: DataBounds, screen_bounds: Rectangle) -> Self {
        Self {
            data_bounds,
            screen_bounds,
            padding: ViewportPadding::default(),
        }
    }

    pub fn with_padding(mut self, padding: ViewportPadding) -> Self {
        self.padding = padding;
        self
    }

    /// Screen bounds minus padding
    pub fn plot_area(&self) -> Rectangle {
        let top_left = Point::new(
            self.screen_bounds.top_left.x + self.padding.left as i32,
            self.screen_bounds.top_left.y + self.padding.top as i32,
        );

        let width = self
            .screen_bounds
            .size
            .width
            .saturating_sub(self.padding.left + self.padding.right);
        let height = self
            .screen_bounds
            .size
            .height
            .saturating_sub(self.padding.top + self.padding.bottom);

        Rectangle::new(top_left, Size::new(width, height))
    }

    /// Screen position of `point`.
    ///
    /// Returns `None` for points outside the data bounds.
    pub fn data_to_screen(&self, point: DataPoint) -> Option<Point> {
        let plot_area = self.plot_area();

        let x_norm = (point.x - self.data_bounds.x_min) / self.data_bounds.x_range();
        let y_norm = (point.y - self.data_bounds.y_min) / self.data_bounds.y_range();

        if !x_norm.is_finite()
            || !y_norm.is_finite()
            || !(0.0..=1.0).contains(&x_norm)
            || !(0.0..=1.0).contains(&y_norm)
        {
            return None;
        }

        // Screen Y grows downward
        let max_x = plot_area.size.width.saturating_sub(1) as f32;
        let max_y = plot_area.size.height.saturating_sub(1) as f32;
        Some(Point::new(
            plot_area.top_left.x + (x_norm * max_x).round() as i32,
            plot_area.top_left.y + ((1.0 - y_norm) * max_y).round() as i32,
        ))
    }

    pub fn data_bounds(&self) -> &DataBounds {
        &self.data_bounds
    }

    pub fn set_data_bounds(&mut self, bounds: DataBounds) {
        self.data_bounds = bounds;
    }
}
