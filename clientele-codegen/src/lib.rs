//! Language-agnostic command synthesis engine for clientele.
//!
//! Given a catalog of client resources, the engine classifies every
//! parameter type, flattens composite parameters into leaf flags, emits the
//! inverse reconstruction statements, and synthesizes one command per
//! operation. Backends such as `clientele-codegen-rust` render the result.
//!
//! # Module Organization
//!
//! - [`builder`] - Expression, statement and code-building primitives
//! - [`classify`] - Type Classifier
//! - [`flatten`] - Field Flattener and flag deduplication
//! - [`reconstruct`] - Reconstruction Emitter
//! - [`synthesize`] - Command Synthesizer
//! - [`registry`] - Commands grouped by resource, in encounter order
//! - [`pipeline`] - Phases, context and diagnostics for one generation run
//! - [`language`] - The backend trait
//! - [`testing`] - Shared fixtures (feature-gated)

pub mod builder;
pub mod classify;
pub mod flatten;
pub mod language;
pub mod naming;
pub mod pipeline;
pub mod reconstruct;
pub mod registry;
pub mod synthesize;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
