//! End-to-end test IR and its compiler to test source text.
//!
//! # Pipeline
//!
//! ```text
//! Document ──migrate_routes──▶ accessor map ─┐
//!                                             ▼
//! Function (ir) ──compilers──▶ ast ──printer──▶ text
//!                    │                          ▲
//!                    └──────── Importer ────────┘
//! ```
//!
//! `assembler::write_test_function` drives the whole pipeline.
//! `validate::validate_test_function` is the optional pre-check.

pub mod assembler;
pub mod ast;
pub mod compilers;
pub mod document;
pub mod importer;
pub mod ir;
pub mod printer;
pub mod validate;

pub use assembler::{write_test_function, write_test_function_with, AssembleOptions};
pub use document::{Document, Endpoint, HttpMethod, Operation};
pub use ir::{Expression, Function, Scenario, Statement, TestCase};
pub use validate::{validate_test_function, TestError};
