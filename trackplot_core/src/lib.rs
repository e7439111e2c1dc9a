//! TrackPlot core: trajectory tables in, figures out.
//!
//! - [`table`]: CSV track files loaded as named columns
//! - [`schema`]: which participant layout a table uses
//! - [`render`]: robot + participant paths drawn onto a [`Figure`]
//! - [`writer`]: figures persisted as PNG or JSON

pub mod error;
pub mod figure;
pub mod render;
pub mod schema;
pub mod table;
pub mod trajectory;
pub mod writer;

pub use error::{TrackError, TrackResult};
pub use figure::{Figure, FigureSize, LegendPlacement};
pub use render::render;
pub use schema::TrackSchema;
pub use table::TrackTable;
pub use trajectory::Trajectory;
pub use writer::{FigureWriter, JsonWriter, PngWriter};
