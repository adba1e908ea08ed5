//! # confdist Core Library
//!
//! A high-performance library for computing all-pairs distance matrices over
//! collections of 3D point-set conformations, where the distance between two
//! conformations is the minimum weighted RMSD after optimal rigid-body
//! superposition (the Kabsch problem).
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains immutable data models
//!   (`ConformationSet`, `Weights`), the pure weighted Kabsch alignment kernel
//!   (`alignment`), and CSV matrix I/O utilities.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer drives the pairwise
//!   computation. It includes the load-balanced pair schedule (`schedule`),
//!   the `DistanceMatrix` engine with its fork-join parallel fill, progress
//!   reporting, and the boundary error taxonomy.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties the `engine` and `core` together to run a complete distance-matrix
//!   computation from raw coordinate data in a single call.

pub mod core;
pub mod engine;
pub mod workflows;
