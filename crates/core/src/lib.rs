//! Core library for dehash
//!
//! This crate implements the **Functional Core** of the dehash application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The dehash project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`dehash_core`** (this crate): Pure types and transformation functions with zero I/O
//! - **`dehash`**: HTTP requests, file writes, and orchestration (the Imperative Shell)
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! The core crate is organized by domain:
//!
//! - [`search`]: Search response models, opaque records, and aggregation results
//! - [`pagination`]: Page-count math and the platform's hard retrieval limit
//! - [`export`]: JSON and CSV serialization of search results
//! - [`monitoring`]: Monitoring task, report, and channel request/response models
//! - [`whois`]: WHOIS search request constructors
//!
//! Each module contains domain models, transformation functions, and unit tests
//! built on fixture data.

pub mod export;
pub mod monitoring;
pub mod pagination;
pub mod search;
pub mod whois;
