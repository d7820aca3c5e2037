//! Data series storage and styling

use embedded_graphics::pixelcolor::Rgb565;

use super::constants::DEFAULT_SERIES_LINE_WIDTH_PX;
use super::{GraphError, GraphResult};
use crate::ui::styling::WHITE;

/// A single point in data space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    /// X coordinate (elapsed seconds for time series)
    pub x: f32,
    /// Y coordinate (sensor value)
    pub y: f32,
}

impl DataPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visual style of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    /// Line and legend color
    pub color: Rgb565,
    /// Line width in pixels
    pub line_width: u32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: WHITE,
            line_width: DEFAULT_SERIES_LINE_WIDTH_PX,
        }
    }
}

/// A labelled sequence of points drawn as one polyline
#[derive(Debug, Clone)]
pub struct DataSeries {
    points: Vec<DataPoint>,
    /// Style used for the line and the legend swatch
    pub style: SeriesStyle,
    /// Legend text
    pub label: &'static str,
    visible: bool,
}

impl DataSeries {
    pub fn new(label: &'static str) -> Self {
        Self {
            points: Vec::new(),
            style: SeriesStyle::default(),
            label,
            visible: true,
        }
    }

    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace all points. Non-finite points are dropped.
    pub fn set_points(&mut self, points: &[DataPoint]) {
        self.points.clear();
        self.points.extend(
            points
                .iter()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
                .copied(),
        );
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Fixed-capacity collection of series
#[derive(Debug, Clone)]
pub struct SeriesCollection<const MAX_SERIES: usize> {
    series: heapless::Vec<DataSeries, MAX_SERIES>,
}

impl<const MAX_SERIES: usize> Default for SeriesCollection<MAX_SERIES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_SERIES: usize> SeriesCollection<MAX_SERIES> {
    pub fn new() -> Self {
        Self {
            series: heapless::Vec::new(),
        }
    }

    /// Add a series, returning its index
    pub fn add(&mut self, series: DataSeries) -> GraphResult<usize> {
        self.series
            .push(series)
            .map_err(|_| GraphError::SeriesCapacityExceeded { max: MAX_SERIES })?;
        Ok(self.series.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&DataSeries> {
        self.series.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DataSeries> {
        self.series.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataSeries> {
        self.series.iter()
    }

    /// Every visible point across all visible series
    pub fn visible_points(&self) -> impl Iterator<Item = &DataPoint> {
        self.series
            .iter()
            .filter(|s| s.is_visible())
            .flat_map(|s| s.points().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_points_drops_non_finite() {
        let mut series = DataSeries::new("Temp");
        series.set_points(&[
            DataPoint::new(0.0, 1.0),
            DataPoint::new(1.0, f32::NAN),
            DataPoint::new(f32::INFINITY, 2.0),
            DataPoint::new(2.0, 3.0),
        ]);

        assert_eq!(
            series.points(),
            &[DataPoint::new(0.0, 1.0), DataPoint::new(2.0, 3.0)]
        );
    }

    #[test]
    fn test_collection_capacity() {
        let mut collection = SeriesCollection::<2>::new();
        assert_eq!(collection.add(DataSeries::new("a")), Ok(0));
        assert_eq!(collection.add(DataSeries::new("b")), Ok(1));
        assert_eq!(
            collection.add(DataSeries::new("c")),
            Err(GraphError::SeriesCapacityExceeded { max: 2 })
        );
    }

    #[test]
    fn test_visible_points_skips_hidden_series() {
        let mut collection = SeriesCollection::<2>::new();
        let mut shown = DataSeries::new("shown");
        shown.set_points(&[DataPoint::new(0.0, 1.0)]);
        let mut hidden = DataSeries::new("hidden");
        hidden.set_points(&[DataPoint::new(0.0, 99.0)]);
        hidden.set_visible(false);

        collection.add(shown).unwrap();
        collection.add(hidden).unwrap();

        let ys: Vec<f32> = collection.visible_points().map(|p| p.y).collect();
        assert_eq!(ys, vec![1.0]);
    }
}
