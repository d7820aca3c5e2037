//! Line graph for time-series readings
//!
//! - Multiple data series with independent styling and a legend
//! - Configurable horizontal/vertical grid lines
//! - Automatic scaling of both axes to the data
//! - X labels as time of day relative to a session origin, numeric Y labels
//!
//! Points are kept in plain `Vec`s: the history behind the chart is not
//! bounded, so neither is a series.
//!
//! # Examples
//!
//! ```
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::Rectangle;
//! use hygrocast_core::ui::components::graph::*;
//! use hygrocast_core::ui::TEMPERATURE_COLOR;
//!
//! let bounds = Rectangle::new(Point::new(0, 40), Size::new(300, 200));
//! let mut graph = Graph::<1>::new(bounds);
//!
//! let series = DataSeries::new("Temp").with_style(SeriesStyle {
//!     color: TEMPERATURE_COLOR,
//!     line_width: 2,
//! });
//!
//! let index = graph.add_series(series)?;
//! graph.set_series_points(index, &[DataPoint::new(0.0, 22.5), DataPoint::new(1.0, 22.6)])?;
//! # Ok::<(), GraphError>(())
//! ```

use thiserror::Error;

mod axis;
mod component;
pub mod constants;
mod grid;
pub mod series;
pub mod viewport;

pub use axis::{AxisConfig, Axes, LabelFormatter};
pub use component::Graph;
pub use grid::{GridConfig, HorizontalGridLines, LineStyle, VerticalGridLines};
pub use series::{DataPoint, DataSeries, SeriesCollection, SeriesStyle};
pub use viewport::{DataBounds, Viewport, ViewportPadding};

/// Error types for graph operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Series capacity exceeded
    #[error("Series capacity exceeded (max: {max})")]
    SeriesCapacityExceeded {
        /// Maximum allowed series count
        max: usize,
    },

    /// Invalid series index
    #[error("Invalid series index: {index}")]
    InvalidSeriesIndex {
        /// The invalid index
        index: usize,
    },
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
