//! Meshview Core Types and Definitions
//!
//! This crate provides the foundational types for Meshview topology diagrams.
//! It includes:
//!
//! - **Identifiers**: Efficient string-interned node identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Strokes, text, rich text and layered SVG output ([`draw`] module)
//! - **Scene**: Nodes, attachment points, edges and decorations ([`scene`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod scene;
