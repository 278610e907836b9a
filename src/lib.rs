//! City Growth Simulation Library
//!
//! A procedural city simulator that runs headless; any renderer can read its
//! state between steps.

pub mod simulation;
