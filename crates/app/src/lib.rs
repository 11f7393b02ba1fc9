//! Terminal front end for ShelfLife.
//!
//! Pages ([`library`], [`detail`], [`reviews`]) hold observable state that
//! is filled by cancellable fetches ([`mount`]); [`render`] turns that
//! state into text for the `shelflife` binary.

pub mod config;
pub mod detail;
pub mod library;
pub mod mount;
pub mod render;
pub mod reviews;
