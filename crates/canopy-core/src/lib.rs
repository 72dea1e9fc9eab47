//! Canopy Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Canopy layout
//! engines and loaders. It includes:
//!
//! - **Tree**: An index-based arena for rooted phylogenetic trees ([`tree::Tree`])
//! - **Gene models**: Ordered genomic sub-intervals ([`gene_model::GeneModel`])
//! - **Alignments**: Equal-length aligned sequences ([`alignment::Alignment`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Layered SVG drawing primitives ([`draw`] module)

pub mod alignment;
pub mod color;
pub mod draw;
pub mod error;
pub mod gene_model;
pub mod geometry;
pub mod tree;

pub use error::ModelError;
