//! # Domain Models
//!
//! Pure types shared by every FieldCheck crate, with `serde` and `bitflags` as the only
//! dependencies. No I/O, networking or remote calls live here.

pub mod config;
pub mod constants;
pub mod geometry;
pub mod landcover;
pub mod registry;
