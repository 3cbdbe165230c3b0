#![allow(unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: fixture types and a catalog registering them
//! - `assertions`: assertion helpers with readable failure messages

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_error_contains, assert_ok};
pub use fixtures::{fixture_catalog, fixture_factory, Foo, Node, Point, User, Widget};
