//! Reconcile state-estimation trajectory logs and overlay them against the
//! shared ground truth.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
