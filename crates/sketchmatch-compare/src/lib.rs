//! # sketchmatch-compare
//!
//! Face comparison backend abstraction for sketchmatch.
//!
//! This crate provides:
//! - The pluggable [`CompareBackend`] trait — the only source of similarity
//!   information in the system
//! - [`RekognitionBackend`], an HTTP client speaking the Rekognition
//!   CompareFaces wire format to a configurable endpoint
//! - A scripted mock backend for deterministic tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Enable the scripted mock backend

pub mod backend;
pub mod rekognition;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use backend::CompareBackend;
pub use rekognition::RekognitionBackend;

// Re-export core types
pub use sketchmatch_core::{CompareError, CompareResult, FaceMatch};
