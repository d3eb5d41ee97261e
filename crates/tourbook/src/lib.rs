//! Locale-aware content resolution, legacy redirects, sitemap aggregation, and booking
//! confirmation routing for the Tourbook website.
//!
//! Persistence, payments, e-mail, and sessions live behind external services; this crate
//! only models them as the narrow traits the routing layer reads from.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notifications;
pub mod site;
pub mod sitemap;
pub mod store;
pub mod telemetry;
