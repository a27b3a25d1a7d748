//! Renders the solver output for each model to a static PNG, projected to
//! web mercator over a hand-rolled RGB framebuffer rather than a charting
//! crate — no vector-plotting dependency appears anywhere in the source
//! this was adapted from.

mod canvas;
mod error;
mod mercator;
mod render;
mod view;

pub use canvas::{Canvas, Color};
pub use error::{RenderError, Result};
pub use mercator::{miles_to_meters, project_mercator};
pub use render::{render_lscp, render_mclp, render_pmedian, DEFAULT_SPIDER_SAMPLE, DEFAULT_SPIDER_SEED};
pub use view::MapView;
