//! # File I/O Module
//!
//! Reading and writing of the numeric matrices the library consumes and
//! produces, in headerless CSV form.
//!
//! Coordinate matrices (one conformation per row, 3m columns), weight
//! vectors (a single row or column), and distance matrices all share the
//! same representation, so one reader/writer pair in [`matrix`] covers them.
//! Structural problems in a file are reported with the offending path and
//! line rather than being deferred to the computation layer.

pub mod matrix;
