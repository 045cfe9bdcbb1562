//! Store contract integration tests
//!
//! Runs the conformance suite against every backend/wrapper combination and
//! exercises List and concurrency behavior through the public facade.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test store_contract
//! ```

mod test_utils;

mod suite_matrix;

mod list_semantics;

mod concurrency;

mod configuration;
