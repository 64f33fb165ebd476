//! Code generation module

mod code_generator;
mod entity_renderer;
mod naming;
mod schema_dump;
mod type_mapper;

pub use code_generator::*;
pub use entity_renderer::render_entity;
pub use naming::*;
pub use schema_dump::*;
pub use type_mapper::*;
