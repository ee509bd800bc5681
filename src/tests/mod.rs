//! Crate-level scenario tests.
