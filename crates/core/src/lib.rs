//! Domain logic for the Larder inventory service.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! repository layer, the HTTP service and the background jobs.

pub mod error;
pub mod item_query;
pub mod naming;
pub mod patch;
pub mod scheduling;
pub mod status;
pub mod types;
