//! Transport types and payload normalization for the ShelfLife client.
//!
//! - [`work`], [`session`], [`review`] -- the DTOs exchanged with the backend.
//! - [`normalize`] -- per-entity alias tables and the single resolver that
//!   maps camelCase/snake_case/aliased keys onto the canonical wire shape.
//! - [`shelf`] -- grouping of works by status for the library view.
//! - [`sample`] -- the built-in sample library.

pub mod error;
pub mod normalize;
pub mod review;
pub mod sample;
pub mod session;
pub mod shelf;
pub mod types;
pub mod work;
