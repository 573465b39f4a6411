//! Application layer orchestrating the flow.
//!
//! This module defines the `FlowEngine`, the primary entry point for driving
//! the top-up sequence, and the timer-driven `ProcessingSimulator` whose
//! stage sequence is part of the observable contract.

pub mod flow;
pub mod processing;
