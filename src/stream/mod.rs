// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Canvas opcode stream codec.
//!
//! This module provides the wire-level pieces of the canvas format:
//! - [`cursor`] - bounds-checked big-endian byte cursor
//! - [`number`] - number-type tagged value vectors
//! - [`opcode`] - the opcode tag set and operand skipping
//! - [`writer`] - stream construction

pub mod cursor;
pub mod number;
pub mod opcode;
pub mod writer;

pub use cursor::StreamCursor;
pub use number::{read_values, skip_values, NumberType};
pub use opcode::{skip_operands, Opcode};
pub use writer::CanvasWriter;
