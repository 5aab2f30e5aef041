//! Harness designs in two shapes: the persisted domain model and the editable graph model,
//! plus the transformation between them.

pub mod api;
pub mod connection;
pub mod connector;
pub mod defaults;
pub mod design;
pub mod graph;
pub mod id;
pub mod library;
pub mod point;
pub mod transform;
pub mod wire;

#[cfg(test)]
mod tests;
