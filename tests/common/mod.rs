//! Common test utilities for propscan integration tests

#![allow(dead_code)]

pub mod test_repo;

pub use test_repo::TestRepo;
