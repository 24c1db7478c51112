//! Explorer for FDA contaminant levels in food commodities.
//!
//! The data layer ([`data`]), [`controller`] and [`presenter`] run without any
//! UI; [`app`] and [`ui`] host them in an eframe window.

pub mod app;
pub mod color;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod presenter;
pub mod state;
pub mod ui;
