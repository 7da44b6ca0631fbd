//! cartd - per-user shopping cart service.
//!
//! Stores one cart document per user and enriches line items with live
//! product/brand data at read time via a bulk lookup against the product
//! service. The cart document stays authoritative; enrichment is never
//! persisted.

pub mod config;
pub mod enrichment;
pub mod interfaces;
pub mod merge;
pub mod model;
pub mod service;
pub mod storage;
pub mod transport;
pub mod utils;
