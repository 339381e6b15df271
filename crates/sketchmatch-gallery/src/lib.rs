//! # sketchmatch-gallery
//!
//! Candidate photo scanning and best-match selection.
//!
//! The gallery is a flat, read-only directory of reference photos whose
//! filenames double as labels. [`Matcher`] runs the scan-and-reduce over an
//! external comparison backend: one comparison per candidate, strict-greater
//! best tracking, per-candidate failures recovered.

pub mod matcher;
pub mod scan;

pub use matcher::Matcher;
pub use scan::{scan_gallery, Candidate};
