//! Charts module - Chart building and rendering

mod artifact;
mod plotter;
mod renderer;

pub use artifact::{ChartArtifact, ChartKind, ChartTheme, DARK_THEME};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, RenderOptions, StaticChartRenderer};
