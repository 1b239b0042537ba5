//! Shared test utilities for yamlsync integration tests.
//!
//! `TestRepo` wraps a throwaway git repository so each test can stage a
//! base commit and a head commit, then point the processor at it.

pub mod harness;

pub use harness::TestRepo;
