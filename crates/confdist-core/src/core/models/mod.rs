//! # Core Models Module
//!
//! This module contains the data structures used to represent the inputs of a
//! pairwise distance computation.
//!
//! ## Overview
//!
//! Two containers cover the whole input side of the problem:
//!
//! - [`conformation`] - An ordered collection of conformations, each a flat
//!   sequence of 3D point coordinates, stored as one n×3m matrix
//! - [`weights`] - A per-point weight vector shared across all conformations
//!
//! Both validate their invariants at construction so that the hot computation
//! paths can assume well-formed data without re-checking it.

pub mod conformation;
pub mod weights;
