//! # Engine Module
//!
//! This module implements the stateful computation engine that turns a
//! conformation set into a full pairwise distance matrix.
//!
//! ## Overview
//!
//! The engine owns the immutable inputs (coordinates and weights) and the
//! output matrix, and drives one alignment per unordered pair of
//! conformations. Pair enumeration follows a round-robin folding scheme that
//! assigns every row index the same number of evaluations, which keeps
//! fork-join parallel execution balanced without any dynamic scheduling.
//!
//! ## Architecture
//!
//! - **Pair Scheduling** ([`schedule`]) - Balanced circle-method pair
//!   enumeration and the naive triangular fallback
//! - **Matrix Engine** ([`matrix`]) - The `DistanceMatrix` container, its
//!   builder, and the parallel fill pass
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Boundary validation error types
//!
//! ## Key Capabilities
//!
//! - **Balanced data parallelism** with a static, index-arithmetic work
//!   partition; no two tasks ever write the same output cell
//! - **Scoped worker pools** honoring a per-engine worker-count hint
//! - **Deterministic output** regardless of worker count or schedule choice

pub mod error;
pub mod matrix;
pub mod progress;
pub mod schedule;
