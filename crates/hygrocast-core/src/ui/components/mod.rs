pub mod graph;
pub mod table;

pub use graph::{
    AxisConfig, DataPoint, DataSeries, Graph, GraphError, GridConfig, LabelFormatter, SeriesStyle,
    ViewportPadding,
};
pub use table::{
    COLUMNS, Cell, PLACEHOLDER, Table, TableError, cell, format_time, format_value, table_height,
};
