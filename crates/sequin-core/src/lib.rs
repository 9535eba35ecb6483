//! Sequin Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Sequin sequence
//! diagram engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and line segments ([`geometry`] module)
//! - **Draw**: Text measurement and drawing surfaces ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
