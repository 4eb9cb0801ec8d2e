//! UK PAYE Tax Calculation Engine
//!
//! This crate calculates the statutory deductions on UK employment income:
//! income tax with the tapered personal allowance, Class 1 National Insurance,
//! stacked student-loan repayment plans, and pension contributions in both
//! salary-sacrifice and net-contribution modes. Rate tables are loaded per
//! tax year from YAML configuration and validated up front; every calculation
//! is a pure function of the request and the table.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
