//! framequant-test - Regression test framework for framequant
//!
//! Integration tests record a sequence of numbered checks on a
//! [`RegParams`] and assert on [`RegParams::cleanup`] at the end, which
//! prints every failure with its check index.
//!
//! # Usage
//!
//! ```ignore
//! use framequant_test::RegParams;
//!
//! let mut rp = RegParams::new("octree");
//! rp.compare_values(256.0, palette.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;

pub use params::RegParams;
