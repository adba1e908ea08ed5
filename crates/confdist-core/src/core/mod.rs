//! # Core Module
//!
//! This module provides the fundamental building blocks for pairwise
//! conformational analysis, serving as the computational foundation of the
//! library.
//!
//! ## Overview
//!
//! The core module implements the data structures and pure algorithms required
//! to compare 3D point-set conformations: validated containers for coordinate
//! and weight data, the weighted Kabsch superposition kernel, and matrix I/O.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules:
//!
//! - **Data Representation** ([`models`]) - Validated conformation-set and
//!   per-point weight containers
//! - **Alignment** ([`alignment`]) - Weighted RMSD after optimal rigid-body
//!   superposition (SVD-based orthogonal Procrustes)
//! - **File I/O** ([`io`]) - Reading and writing numeric matrices as CSV
//!
//! ## Scientific Foundation
//!
//! The alignment kernel solves the weighted orthogonal Procrustes problem in
//! closed form: the optimal rotation between two centered point sets is
//! recovered from the singular value decomposition of their weighted
//! cross-covariance matrix, with a determinant-sign correction that excludes
//! physically invalid reflections.

pub mod alignment;
pub mod io;
pub mod models;
