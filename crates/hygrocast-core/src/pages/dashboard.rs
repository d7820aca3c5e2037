//! Single-screen dashboard: live chart on the left, forecast and current
//! readings on the right

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{
    MonoTextStyle,
    ascii::{FONT_6X10, FONT_10X20},
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::warn;

use crate::forecast::FORECAST_STEPS;
use crate::history::{History, Record};
use crate::monitor::Monitor;
use crate::trend::MIN_TRAINING_RECORDS;
use crate::ui::components::graph::{
    AxisConfig, DataPoint, DataSeries, Graph, GraphResult, GridConfig, HorizontalGridLines,
    LabelFormatter, SeriesStyle, ViewportPadding,
};
use crate::ui::components::table::{COLUMNS, Cell, Table, format_time, format_value, table_height};
use crate::ui::{
    COLOR_BACKGROUND, COLOR_FOREGROUND, Drawable, HUMIDITY_COLOR, LIGHT_GRAY, TEMPERATURE_COLOR,
    WHITE,
};

use super::constants::{
    CURRENT_ROWS, HEADER_HEIGHT_PX, HEADER_STATUS_PADDING_RIGHT_PX, HEADER_TITLE_PADDING_LEFT_PX,
    SERIES_LINE_WIDTH_PX, TABLE_COLUMN_WIDTH_PX, TABLE_MARGIN_PX, X_AXIS_LABEL_COUNT,
    Y_AXIS_LABEL_COUNT,
};

pub const TITLE: &str = "Temperature & Humidity Forecast";

const TEMPERATURE_SERIES: usize = 0;
const HUMIDITY_SERIES: usize = 1;

const TABLE_HEADERS: [&str; COLUMNS] = ["Time", "Temp °C", "Hum %"];

/// Dashboard showing the state of one [`Monitor`]
pub struct DashboardPage {
    bounds: Rectangle,
    header_bounds: Rectangle,
    graph: Graph<2>,
    forecast_table: Table<FORECAST_STEPS>,
    current_table: Table<CURRENT_ROWS>,
    status: heapless::String<32>,
    dirty: bool,
}

impl DashboardPage {
    pub fn new(bounds: Rectangle) -> GraphResult<Self> {
        let header_bounds =
            Rectangle::new(bounds.top_left, Size::new(bounds.size.width, HEADER_HEIGHT_PX));

        let body_top = bounds.top_left.y + HEADER_HEIGHT_PX as i32;
        let body_height = bounds.size.height.saturating_sub(HEADER_HEIGHT_PX);
        let graph_width = bounds.size.width.saturating_sub(TABLE_COLUMN_WIDTH_PX);

        let graph_bounds = Rectangle::new(
            Point::new(bounds.top_left.x, body_top),
            Size::new(graph_width, body_height),
        );

        let table_x = bounds.top_left.x + (graph_width + TABLE_MARGIN_PX) as i32;
        let table_width = TABLE_COLUMN_WIDTH_PX.saturating_sub(2 * TABLE_MARGIN_PX);

        let forecast_bounds = Rectangle::new(
            Point::new(table_x, body_top + TABLE_MARGIN_PX as i32),
            Size::new(table_width, table_height(FORECAST_STEPS)),
        );
        let current_bounds = Rectangle::new(
            Point::new(
                table_x,
                forecast_bounds.top_left.y
                    + (forecast_bounds.size.height + TABLE_MARGIN_PX) as i32,
            ),
            Size::new(table_width, table_height(CURRENT_ROWS)),
        );

        let mut graph = Graph::new(graph_bounds)
            .with_background(COLOR_BACKGROUND)
            .with_padding(ViewportPadding::new(22, 28, 20, 44))
            .with_grid(GridConfig {
                vertical_lines: None,
                horizontal_lines: Some(HorizontalGridLines {
                    count: Y_AXIS_LABEL_COUNT,
                    ..HorizontalGridLines::default()
                }),
            })
            .with_x_axis(AxisConfig {
                label_count: X_AXIS_LABEL_COUNT,
                label_formatter: LabelFormatter::TimeOfDay { origin: None },
                ..AxisConfig::default()
            })
            .with_y_axis(AxisConfig {
                label_count: Y_AXIS_LABEL_COUNT,
                ..AxisConfig::default()
            })
            .with_placeholder("Waiting for data");

        let temperature = graph.add_series(DataSeries::new("Temperature (°C)").with_style(
            SeriesStyle {
                color: TEMPERATURE_COLOR,
                line_width: SERIES_LINE_WIDTH_PX,
            },
        ))?;
        let humidity = graph.add_series(DataSeries::new("Humidity (%)").with_style(SeriesStyle {
            color: HUMIDITY_COLOR,
            line_width: SERIES_LINE_WIDTH_PX,
        }))?;
        debug_assert_eq!(temperature, TEMPERATURE_SERIES);
        debug_assert_eq!(humidity, HUMIDITY_SERIES);

        let mut page = Self {
            bounds,
            header_bounds,
            graph,
            forecast_table: Table::new(forecast_bounds, "Forecast", TABLE_HEADERS),
            current_table: Table::new(current_bounds, "Current", TABLE_HEADERS),
            status: heapless::String::new(),
            dirty: true,
        };
        page.set_status(0, false);
        Ok(page)
    }

    /// Pull the latest history, forecast and training state from `monitor`.
    pub fn refresh(&mut self, monitor: &Monitor) {
        let history = monitor.history();

        self.graph.set_time_origin(history.origin());
        let (temperature, humidity) = series_points(history);
        for (index, points) in [(TEMPERATURE_SERIES, temperature), (HUMIDITY_SERIES, humidity)] {
            if let Err(e) = self.graph.set_series_points(index, &points) {
                warn!("Failed to update chart series {}: {}", index, e);
            }
        }

        let mut recent = history.iter().rev();
        for row in 0..CURRENT_ROWS {
            let result = match recent.next() {
                Some(record) => self.current_table.set_row(row, record_row(record)),
                None => self.current_table.clear_row(row),
            };
            if let Err(e) = result {
                warn!("Failed to update current table: {}", e);
            }
        }

        match monitor.forecast() {
            Some(forecast) => {
                for (row, point) in forecast.iter().enumerate() {
                    let cells = [
                        format_time(point.timestamp),
                        format_value(point.temperature),
                        format_value(point.humidity),
                    ];
                    if let Err(e) = self.forecast_table.set_row(row, cells) {
                        warn!("Failed to update forecast table: {}", e);
                    }
                }
            }
            None => self.forecast_table.clear(),
        }

        self.set_status(history.len(), monitor.is_trained());
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn graph(&self) -> &Graph<2> {
        &self.graph
    }

    pub fn forecast_table(&self) -> &Table<FORECAST_STEPS> {
        &self.forecast_table
    }

    pub fn current_table(&self) -> &Table<CURRENT_ROWS> {
        &self.current_table
    }

    fn set_status(&mut self, records: usize, trained: bool) {
        let mut status = heapless::String::<32>::new();
        // Truncation is harmless; the header is informational
        let _ = if trained {
            write!(status, "Trained on {}", records)
        } else {
            write!(status, "Collecting {}/{}", records, MIN_TRAINING_RECORDS)
        };

        if status != self.status {
            self.status = status;
            self.dirty = true;
        }
    }

    fn draw_header<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.header_bounds
            .into_styled(PrimitiveStyle::with_fill(COLOR_FOREGROUND))
            .draw(display)?;

        let center_y = self.header_bounds.center().y;

        Text::with_baseline(
            TITLE,
            Point::new(
                self.header_bounds.top_left.x + HEADER_TITLE_PADDING_LEFT_PX,
                center_y,
            ),
            MonoTextStyle::new(&FONT_10X20, WHITE),
            Baseline::Middle,
        )
        .draw(display)?;

        let status_style = TextStyleBuilder::new()
            .alignment(Alignment::Right)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            &self.status,
            Point::new(
                self.header_bounds.top_left.x + self.header_bounds.size.width as i32
                    - HEADER_STATUS_PADDING_RIGHT_PX,
                center_y,
            ),
            MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY),
            status_style,
        )
        .draw(display)?;

        Ok(())
    }
}

/// Chart points of both series, X in elapsed seconds since the origin
fn series_points(history: &History) -> (Vec<DataPoint>, Vec<DataPoint>) {
    history
        .iter()
        .map(|record| {
            let x = history.elapsed_at(record.timestamp) as f32;
            (
                DataPoint::new(x, record.temperature as f32),
                DataPoint::new(x, record.humidity as f32),
            )
        })
        .unzip()
}

fn record_row(record: &Record) -> [Cell; COLUMNS] {
    [
        format_time(record.timestamp),
        format_value(record.temperature),
        format_value(record.humidity),
    ]
}

impl Drawable for DashboardPage {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(COLOR_BACKGROUND))
            .draw(display)?;

        self.draw_header(display)?;
        self.graph.draw(display)?;
        self.forecast_table.draw(display)?;
        self.current_table.draw(display)
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.graph.is_dirty()
            || self.forecast_table.is_dirty()
            || self.current_table.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.graph.mark_clean();
        self.forecast_table.mark_clean();
        self.current_table.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
