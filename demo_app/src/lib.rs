//! Demo scenes for the scene engine
//!
//! Both scenes run headless: input comes from scripted event batches and
//! rendering goes to [`panel::Panel`] behaviours that record what they would
//! draw.

#![warn(missing_docs)]

pub mod error;
pub mod panel;
pub mod tower;
pub mod microwave;
pub mod microwave_scene;
pub mod script;
