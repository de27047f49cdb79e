// src/stabilizer.rs

//! # Flight Stabilizer Module
//!
//! This module provides the stabilization engine and the per-cycle
//! interface the control-loop scheduler drives it through.

pub mod engine;
pub use engine::*;
pub mod flight_stabilizer;
pub use flight_stabilizer::*;
