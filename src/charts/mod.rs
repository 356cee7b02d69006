//! Charts module - Canvas chart rendering

mod bar;
mod geometry;
mod line;
mod pie;
mod pixmap;
pub mod recording;
mod renderer;
pub mod surface;

pub use bar::{BarChartRenderer, BarGeometry, BarLayout};
pub use geometry::{ChartError, Dimensions, PlotRect, Point, Rect};
pub use line::{LineChartRenderer, LineLayout};
pub use pie::{PieChartRenderer, PieLayout, SliceGeometry, START_ANGLE};
pub use pixmap::{Fonts, PixmapSurface};
pub use renderer::{ChartKind, ChartOutcome, ChartSurfaces, DashboardRenderer, RenderReport};
pub use surface::{Paint, Path, Surface, TextAlign, TextStyle};
