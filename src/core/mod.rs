// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout vizcodec.
//!
//! This module provides the foundational types for the library:
//! - [`VizError`] - Comprehensive error handling
//! - [`Point2`], [`Rect`], [`Color`], [`Transform2`] - geometry value types

pub mod error;
pub mod geometry;

pub use error::{Result, VizError};
pub use geometry::{Color, Point2, Rect, Transform2};
