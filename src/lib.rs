//! Labor-cost accrual and termination-settlement engine.
//!
//! This crate computes, month by month, the mandatory employer payroll charges
//! and provisioned liabilities of an employment interval under Brazilian labor
//! law, and separately the one-time settlement owed when employment ends.
//! All arithmetic is exact decimal arithmetic with an explicit rounding policy.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
