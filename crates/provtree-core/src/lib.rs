//! Provtree Core Types
//!
//! This crate provides the foundational types shared by the provtree layout
//! engine and its front ends:
//!
//! - **Identifiers**: String-interned record identifiers ([`identifier::Id`])
//! - **Tree**: The source history tree arena ([`tree::HistoryTree`])
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Colors**: CSS color handling ([`color::Color`])

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod tree;
