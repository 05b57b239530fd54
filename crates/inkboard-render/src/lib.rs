//! Inkboard Render Library
//!
//! Renderer abstraction and a display-list implementation. Rendering is a
//! pure function of the session state; backends replay the resulting
//! [`Scene`].

mod display_list;
mod renderer;
mod scene;

pub use display_list::{DisplayListRenderer, render};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{DrawCommand, Scene, SceneSummary};
