//! # Lifecycle Test Suite
//!
//! Unified test crate for scenarios that span crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs                 # Shared providers and host contexts
//! └── integration/
//!     ├── factory_properties.rs   # Registry behaviour with real managers
//!     └── e2e_lifecycle.rs        # Bring-up, wiring, rollback, teardown
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p lifecycle-tests
//! cargo test -p lifecycle-tests integration::
//!
//! # Benchmarks
//! cargo bench -p lifecycle-tests
//! ```

pub mod fixtures;
pub mod integration;
