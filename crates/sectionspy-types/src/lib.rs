//! Foundation types for sectionspy.
//!
//! This crate contains the platform-agnostic types shared by all sectionspy
//! crates: geometry, UI events, observer configuration, and error types.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
