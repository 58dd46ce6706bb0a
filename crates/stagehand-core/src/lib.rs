//! Core data types for the stagehand publishing tool.
//!
//! A publication is described declaratively in a `Publish.toml` manifest at
//! the project root. This crate parses and validates that manifest, loads
//! build properties from `.stagehand.env`, resolves credentials in a fixed
//! property-then-environment order, and derives the descriptive metadata
//! (SCM coordinates, jar manifest attributes) consumed by packaging and POM
//! generation.

pub mod credentials;
pub mod manifest;
pub mod metadata;
pub mod properties;
