// SPDX-License-Identifier: MPL-2.0
//! `estate_gallery` is a headless browsing engine for real-estate project
//! media galleries.
//!
//! It covers hierarchical tab navigation, paginated lazily loaded media
//! grids, debounced search and a gesture-driven lightbox. Every component is
//! a state machine or a pure function: a rendering shell feeds it input
//! events and renders the view models and effects it returns.
//!
//! # Layout
//!
//! - [`domain`] - Wire and value types
//! - [`gallery`] - Store, tabs, grid, lazy images, search, request generations
//! - [`lightbox`] - Image viewer with zoom, rotation, pan and swipe
//! - [`gesture`] - Touch gesture recognition and scoped listeners
//! - [`api`] - Gallery REST contract and clients
//! - [`controller`] - Fetch orchestration for one gallery
//! - [`config`] - TOML settings and defaults
//! - [`ui`] - Geometry and viewer state primitives

pub mod api;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod gallery;
pub mod gesture;
pub mod lightbox;
pub mod ui;

#[cfg(test)]
mod test_utils;

pub use controller::GalleryController;
pub use error::{Error, Result};
