//! Operators. Each file adds one method (or a fallible pair) to
//! [`Observable`](crate::observable::Observable) and defines the observer
//! that does the work on the upstream side.
//!
//! Every operator subscribes to its upstream under a child of the downstream
//! subscription's token, so disposing the outermost handle cancels the
//! whole chain.
pub mod filter;
pub mod flat_map;
pub mod map;
pub mod observe_on;
pub mod subscribe_on;
