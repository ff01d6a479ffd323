//! Building blocks shared by the filter implementations.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── config.rs    - FilterConfig (capacity, false positive target)
//! ├── params.rs    - ParameterDeriver and the sizing formulas
//! ├── bitvec.rs    - Owned fixed-length bit vector
//! ├── filter.rs    - MembershipFilter trait
//! └── mod.rs       - This file (public API)
//! ```
//!
//! # Examples
//!
//! ```
//! use slicebloom::core::{FilterConfig, OptimalSlicing, ParameterDeriver};
//!
//! let config = FilterConfig::new(10_000, 0.001).unwrap();
//! let k = OptimalSlicing
//!     .slices_count(config.capacity(), config.false_positive_rate())
//!     .unwrap();
//! assert_eq!(k, 10);
//! ```

pub mod bitvec;
pub mod config;
pub mod filter;
pub mod params;

pub use bitvec::BitVec;
pub use config::FilterConfig;
pub use filter::MembershipFilter;
pub use params::{
    expected_false_positive_rate, optimal_bits_per_slice, optimal_slices_count, OptimalSlicing,
    ParameterDeriver, MAX_SLICES, MIN_SLICES,
};
