#![forbid(unsafe_code)]
#![deny(
    bad_style,
    deprecated,
    non_ascii_idents,
    rust_2018_idioms,
    unreachable_code,
    unused_imports,
    unused_must_use,
    unused_mut,
    unused_variables
)]

//! Testing support for `ActionCheck`.
//!
//! - [`MockStore`]: an in-memory store that records dispatched actions and
//!   can be asserted on directly
//! - [`generators`]: `proptest` strategies for actions and sequences

pub mod generators;
pub mod mock_store;

pub use mock_store::MockStore;
