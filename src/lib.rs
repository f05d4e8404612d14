//! Trip Settlement & Driver Compensation Engine.
//!
//! This crate computes the financial settlement of a completed trucking trip:
//! the driver's gross pay under one of five pay modes, per-company
//! receivables net of collect-on-delivery, reimbursements and the net payable
//! to or from the driver, and a lifecycle-tracked settlement record from
//! `pending` through `paid`.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod store;
