pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod grid;
pub mod gui;
pub mod input;
pub mod line;
pub mod model;
pub mod projection;
pub mod rasterizer;
pub mod renderer;
pub mod scenes;
pub mod texture;
pub mod timing;
pub mod vertex;

pub use error::BasecodeError;
