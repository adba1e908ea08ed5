//! # Workflows Module
//!
//! The highest-level, user-facing layer of the library. A workflow ties the
//! `core` data models and the `engine` together to run a complete procedure
//! from raw input data, so callers that do not need fine-grained control can
//! stay entirely at this level.
//!
//! Currently one workflow is provided: [`pairwise`], which validates raw
//! coordinate and weight data, builds a
//! [`DistanceMatrix`](crate::engine::matrix::DistanceMatrix) engine, and runs
//! a full compute pass.

pub mod pairwise;
