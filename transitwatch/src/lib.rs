//! Transitwatch - live transit vehicle map client engine
//!
//! This library is the view-state synchronization engine of a live map
//! showing moving vehicles and their stops for a chosen transit dataset
//! (country → city/dataset → routes). It owns selection state, refresh
//! scheduling, and entity reconciliation; the actual rendering library and
//! the transit backend stay outside, behind the [`surface::MapSurface`] and
//! [`service::TransitDataService`] traits.
//!
//! # Modules
//!
//! - [`geo`] — coordinate and bounds primitives
//! - [`model`] — vehicle/stop/route snapshots and route-id ordering
//! - [`store`] — persisted selection mirror (INI file or in-memory)
//! - [`selection`] — the country → dataset → routes hierarchy
//! - [`scheduler`] — refresh countdown, in-flight gating, zoom gate
//! - [`reconcile`] — snapshot-vs-rendered diffing and visual ownership
//! - [`service`] — transit backend contract and HTTP client
//! - [`surface`] — map surface contract and a recording test double
//! - [`controller`] — the control loop binding everything together

pub mod controller;
pub mod geo;
pub mod model;
pub mod reconcile;
pub mod scheduler;
pub mod selection;
pub mod service;
pub mod store;
pub mod surface;

pub use controller::{ControllerConfig, ControllerEvent, ViewStateController};
