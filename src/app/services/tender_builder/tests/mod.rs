//! Tests for tender bundle construction

mod builder_tests;
