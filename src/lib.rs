//! Container loading optimizer for export shipments.
//!
//! Given one box type and one container type, finds the axis-aligned orientation
//! that fits the most boxes under the container's payload limit, reports
//! capacity, weight, volumetric efficiency and leftover space, and projects the
//! result into side, front and top view grids for the dashboard.
//!
//! Pipeline: [`units`] → [`orientation`] → [`optimizer`] → [`projection`].

pub mod api;
pub mod catalog;
pub mod config;
pub mod geometry;
pub mod model;
pub mod optimizer;
pub mod orientation;
pub mod projection;
pub mod tier;
pub mod types;
pub mod units;
