#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod compositor;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod gesture;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod smoother;
pub mod stroke;
pub mod surface;

pub use app::PaintApp;
pub use config::SurfaceConfig;
pub use event::{EventBus, SurfaceEvent};
pub use gesture::GestureController;
pub use history::{StrokeHistory, StrokeStack};
pub use input::{InputEvent, PointerId};
pub use raster::RasterBuffer;
pub use renderer::Renderer;
pub use smoother::{CurveSmoother, Segment};
pub use stroke::{BlendMode, PaintStyle, Stroke, StrokeRef};
pub use surface::DrawingSurface;
