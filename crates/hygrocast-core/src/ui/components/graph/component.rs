//! Graph component and its [`Drawable`] implementation

use chrono::{DateTime, Local};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, iso_8859_1::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Polyline, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::ui::core::Drawable;
use crate::ui::FONT_6X10_CHAR_WIDTH_PX;
use crate::ui::styling::{COLOR_BACKGROUND, LIGHT_GRAY, WHITE};

use super::axis::{AxisConfig, Axes, LabelFormatter, draw_x_axis_labels, draw_y_axis_labels};
use super::constants::{
    AUTO_SCALE_MARGIN_FACTOR, LEGEND_ENTRY_GAP_PX, LEGEND_OFFSET_Y_PX, LEGEND_SWATCH_SIZE_PX,
    SINGLE_POINT_MARKER_DIAMETER_PX,
};
use super::grid::{GridConfig, draw_grid};
use super::series::{DataPoint, DataSeries, SeriesCollection};
use super::viewport::{DataBounds, Viewport, ViewportPadding};
use super::{GraphError, GraphResult};

/// Line graph with up to `MAX_SERIES` series sharing one pair of axes
pub struct Graph<const MAX_SERIES: usize> {
    bounds: Rectangle,
    series: SeriesCollection<MAX_SERIES>,
    grid_config: GridConfig,
    axes: Axes,
    viewport: Viewport,
    background_color: Rgb565,
    /// Text shown instead of the plot while no series has points
    placeholder: Option<&'static str>,
    dirty: bool,
}

impl<const MAX_SERIES: usize> Graph<MAX_SERIES> {
    pub fn new(bounds: Rectangle) -> Self {
        // Replaced as soon as a series has points
        let data_bounds = DataBounds::new(0.0, 1.0, 0.0, 1.0);

        Self {
            bounds,
            series: SeriesCollection::new(),
            grid_config: GridConfig::default(),
            axes: Axes::default(),
            viewport: Viewport::new(data_bounds, bounds),
            background_color: COLOR_BACKGROUND,
            placeholder: None,
            dirty: true,
        }
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_grid(mut self, config: GridConfig) -> Self {
        self.grid_config = config;
        self
    }

    pub fn with_x_axis(mut self, config: AxisConfig) -> Self {
        self.axes.x = Some(config);
        self
    }

    pub fn with_y_axis(mut self, config: AxisConfig) -> Self {
        self.axes.y = Some(config);
        self
    }

    pub fn with_padding(mut self, padding: ViewportPadding) -> Self {
        self.viewport = self.viewport.with_padding(padding);
        self
    }

    pub fn with_placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    /// Add a data series, returning its index
    pub fn add_series(&mut self, series: DataSeries) -> GraphResult<usize> {
        let index = self.series.add(series)?;
        self.recalculate_viewport();
        self.dirty = true;
        Ok(index)
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn series(&self, index: usize) -> Option<&DataSeries> {
        self.series.get(index)
    }

    /// Replace all points of a series and rescale both axes once.
    pub fn set_series_points(&mut self, index: usize, points: &[DataPoint]) -> GraphResult<()> {
        self.series
            .get_mut(index)
            .ok_or(GraphError::InvalidSeriesIndex { index })?
            .set_points(points);

        self.recalculate_viewport();
        self.dirty = true;
        Ok(())
    }

    /// Anchor time-of-day X labels to `origin`
    pub fn set_time_origin(&mut self, origin: Option<DateTime<Local>>) {
        if let Some(ref mut x_axis) = self.axes.x
            && let LabelFormatter::TimeOfDay { origin: current } = &mut x_axis.label_formatter
            && *current != origin
        {
            *current = origin;
            self.dirty = true;
        }
    }

    pub fn x_axis(&self) -> Option<&AxisConfig> {
        self.axes.x.as_ref()
    }

    pub fn data_bounds(&self) -> &DataBounds {
        self.viewport.data_bounds()
    }

    /// Whether any visible series holds a point
    pub fn has_data(&self) -> bool {
        self.series.visible_points().next().is_some()
    }

    fn recalculate_viewport(&mut self) {
        // Keep the last bounds while empty; nothing is plotted anyway
        if let Some(bounds) =
            DataBounds::from_points(self.series.visible_points(), AUTO_SCALE_MARGIN_FACTOR)
        {
            self.viewport.set_data_bounds(bounds);
        }
    }

    fn draw_background<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background_color))
            .draw(display)
    }

    fn draw_series<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        for series in self.series.iter().filter(|s| s.is_visible()) {
            let screen: Vec<Point> = series
                .points()
                .iter()
                .filter_map(|p| self.viewport.data_to_screen(*p))
                .collect();

            match screen.as_slice() {
                [] => {}
                [only] => {
                    Circle::with_center(*only, SINGLE_POINT_MARKER_DIAMETER_PX)
                        .into_styled(PrimitiveStyle::with_fill(series.style.color))
                        .draw(display)?;
                }
                points => {
                    Polyline::new(points)
                        .into_styled(PrimitiveStyle::with_stroke(
                            series.style.color,
                            series.style.line_width,
                        ))
                        .draw(display)?;
                }
            }
        }

        Ok(())
    }

    /// Color swatch and label per series, left to right above the plot
    fn draw_legend<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let text_style = MonoTextStyle::new(&FONT_6X10, WHITE);
        let char_width = FONT_6X10_CHAR_WIDTH_PX as i32;
        let swatch = LEGEND_SWATCH_SIZE_PX as i32;

        let mut x = self.viewport.plot_area().top_left.x;
        let y = self.bounds.top_left.y + LEGEND_OFFSET_Y_PX;

        for series in self.series.iter().filter(|s| s.is_visible()) {
            Rectangle::new(
                Point::new(x, y),
                Size::new(LEGEND_SWATCH_SIZE_PX, LEGEND_SWATCH_SIZE_PX),
            )
            .into_styled(PrimitiveStyle::with_fill(series.style.color))
            .draw(display)?;

            let label_x = x + swatch + swatch / 2;
            Text::with_baseline(series.label, Point::new(label_x, y), text_style, Baseline::Top)
                .draw(display)?;

            x = label_x + series.label.chars().count() as i32 * char_width + LEGEND_ENTRY_GAP_PX;
        }

        Ok(())
    }

    fn draw_placeholder<D: DrawTarget<Color = Rgb565>>(
        &self,
        text: &str,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(
            text,
            self.viewport.plot_area().center(),
            MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY),
            style,
        )
        .draw(display)?;
        Ok(())
    }
}

impl<const MAX_SERIES: usize> Drawable for Graph<MAX_SERIES> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        // background → grid → series → labels → legend
        self.draw_background(display)?;

        if !self.has_data() {
            if let Some(text) = self.placeholder {
                self.draw_placeholder(text, display)?;
            }
            return self.draw_legend(display);
        }

        draw_grid(&self.grid_config, &self.viewport, display)?;
        self.draw_series(display)?;

        if let Some(ref x_axis) = self.axes.x {
            draw_x_axis_labels(x_axis, &self.viewport, display)?;
        }

        if let Some(ref y_axis) = self.axes.y {
            draw_y_axis_labels(y_axis, &self.viewport, display)?;
        }

        self.draw_legend(display)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::graph::SeriesStyle;
    use crate::ui::styling::{HUMIDITY_COLOR, TEMPERATURE_COLOR};
    use chrono::TimeZone;
    use embedded_graphics::mock_display::MockDisplay;

    fn graph() -> Graph<2> {
        let mut graph = Graph::<2>::new(Rectangle::new(Point::zero(), Size::new(64, 64)))
            .with_padding(ViewportPadding::new(4, 4, 4, 4))
            .with_x_axis(AxisConfig {
                label_formatter: LabelFormatter::TimeOfDay { origin: None },
                ..AxisConfig::default()
            })
            .with_placeholder("Waiting");

        let temperature = DataSeries::new("T").with_style(SeriesStyle {
            color: TEMPERATURE_COLOR,
            line_width: 1,
        });
        let humidity = DataSeries::new("H").with_style(SeriesStyle {
            color: HUMIDITY_COLOR,
            line_width: 1,
        });
        graph.add_series(temperature).unwrap();
        graph.add_series(humidity).unwrap();
        graph
    }

    fn mock_display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn test_series_capacity() {
        let mut graph = graph();
        assert_eq!(
            graph.add_series(DataSeries::new("extra")),
            Err(GraphError::SeriesCapacityExceeded { max: 2 })
        );
        assert_eq!(graph.series_count(), 2);
    }

    #[test]
    fn test_set_series_points_rescales_over_all_series() {
        let mut graph = graph();
        graph
            .set_series_points(0, &[DataPoint::new(0.0, 20.0), DataPoint::new(10.0, 22.0)])
            .unwrap();
        graph
            .set_series_points(1, &[DataPoint::new(0.0, 50.0), DataPoint::new(10.0, 60.0)])
            .unwrap();

        let bounds = graph.data_bounds();
        assert_eq!((bounds.x_min, bounds.x_max), (0.0, 10.0));
        assert!(bounds.y_min < 20.0);
        assert!(bounds.y_max > 60.0);
        assert!(graph.has_data());
    }

    #[test]
    fn test_set_series_points_invalid_index() {
        let mut graph = graph();
        assert_eq!(
            graph.set_series_points(5, &[]),
            Err(GraphError::InvalidSeriesIndex { index: 5 })
        );
    }

    #[test]
    fn test_set_time_origin_updates_formatter() {
        let mut graph = graph();
        graph.mark_clean();

        let origin = Local.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        graph.set_time_origin(Some(origin));

        assert!(graph.is_dirty());
        assert_eq!(
            graph.x_axis().map(|axis| axis.label_formatter),
            Some(LabelFormatter::TimeOfDay {
                origin: Some(origin)
            })
        );

        graph.mark_clean();
        graph.set_time_origin(Some(origin));
        assert!(!graph.is_dirty());
    }

    #[test]
    fn test_draw_empty_graph_shows_placeholder() {
        let graph = graph();
        let mut display = mock_display();

        graph.draw(&mut display).unwrap();
        assert!(!graph.has_data());
        assert_eq!(display.get_pixel(Point::zero()), Some(COLOR_BACKGROUND));
    }

    #[test]
    fn test_draw_plots_series() {
        let mut graph = graph();
        graph
            .set_series_points(0, &[DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1.0)])
            .unwrap();
        let mut display = mock_display();

        graph.draw(&mut display).unwrap();

        let drawn = display.affected_area();
        assert_eq!(drawn, Rectangle::new(Point::zero(), Size::new(64, 64)));
        let plot = graph.viewport.plot_area();
        let bottom_left = graph
            .viewport
            .data_to_screen(DataPoint::new(graph.data_bounds().x_min, graph.data_bounds().y_min))
            .unwrap();
        assert!(plot.contains(bottom_left));
    }

    #[test]
    fn test_single_point_draws_marker() {
        let mut graph = graph();
        graph
            .set_series_points(1, &[DataPoint::new(3.0, 40.0)])
            .unwrap();
        let mut display = mock_display();

        graph.draw(&mut display).unwrap();

        let center = graph
            .viewport
            .data_to_screen(DataPoint::new(3.0, 40.0))
            .unwrap();
        assert_eq!(display.get_pixel(center), Some(HUMIDITY_COLOR));
    }
}
