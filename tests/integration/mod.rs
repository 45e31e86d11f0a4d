//! Integration Tests Module
//!
//! End-to-end tests for the lot dashboard through the public API: the
//! normalization pipeline on raw payloads, and the load/command flow over
//! `DashboardState`.

// Normalization pipeline properties
mod normalize_test;

// State machine and command flow
mod dashboard_flow_test;
