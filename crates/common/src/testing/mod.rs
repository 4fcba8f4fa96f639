//! Testing utilities
//!
//! Enabled with the `test-utils` feature. Downstream crates pull it in as a
//! dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! fuusor-common = { workspace = true, features = ["test-utils"] }
//! ```

pub mod time;

pub use time::MockClock;
