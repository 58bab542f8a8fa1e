//! Rendering module for the windowed player

mod renderer;

pub use renderer::Renderer;
