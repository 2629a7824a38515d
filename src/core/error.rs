// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for vizcodec.
//!
//! Provides error types for visualization decode operations:
//! - Opcode stream decoding
//! - Pixel format decoding
//! - Distance scan conversion

use std::fmt;

/// Errors that can occur while decoding visualization data.
#[derive(Debug, Clone)]
pub enum VizError {
    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Unknown opcode tag in a canvas stream
    UnknownOpcode {
        /// Tag byte that was read
        tag: u8,
        /// Cursor position of the tag
        cursor_pos: u64,
    },

    /// Unknown number-type tag in a value vector
    UnknownNumberType {
        /// Tag byte that was read
        tag: u8,
        /// Cursor position of the tag
        cursor_pos: u64,
    },

    /// Operand decode error with opcode context
    OperandDecodeError {
        /// Opcode being decoded
        opcode: &'static str,
        /// Cursor position when error occurred
        cursor_pos: u64,
        /// Underlying error
        cause: String,
    },

    /// A path continuation opcode appeared outside a path
    StrayPathOpcode {
        /// Opcode name
        opcode: &'static str,
        /// Cursor position of the tag
        cursor_pos: u64,
    },

    /// Sample count does not match the scan format's component count
    SampleCountMismatch {
        /// Raw value count
        values: usize,
        /// Components per sample for the format
        components: usize,
    },

    /// Invalid string data embedded in a stream
    InvalidText {
        /// Cursor position of the string payload
        cursor_pos: u64,
        /// Decode error message
        reason: String,
    },

    /// Unsupported feature
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Other error
    Other(String),
}

impl VizError {
    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        VizError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create an unknown opcode error.
    pub fn unknown_opcode(tag: u8, cursor_pos: u64) -> Self {
        VizError::UnknownOpcode { tag, cursor_pos }
    }

    /// Create an unknown number-type error.
    pub fn unknown_number_type(tag: u8, cursor_pos: u64) -> Self {
        VizError::UnknownNumberType { tag, cursor_pos }
    }

    /// Create an operand decode error.
    pub fn operand(opcode: &'static str, cursor_pos: u64, cause: impl Into<String>) -> Self {
        VizError::OperandDecodeError {
            opcode,
            cursor_pos,
            cause: cause.into(),
        }
    }

    /// Create a stray path opcode error.
    pub fn stray_path_opcode(opcode: &'static str, cursor_pos: u64) -> Self {
        VizError::StrayPathOpcode { opcode, cursor_pos }
    }

    /// Create a sample count mismatch error.
    pub fn sample_count_mismatch(values: usize, components: usize) -> Self {
        VizError::SampleCountMismatch { values, components }
    }

    /// Create an invalid text error.
    pub fn invalid_text(cursor_pos: u64, reason: impl Into<String>) -> Self {
        VizError::InvalidText {
            cursor_pos,
            reason: reason.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        VizError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            VizError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            VizError::UnknownOpcode { tag, cursor_pos } => vec![
                ("tag", tag.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            VizError::UnknownNumberType { tag, cursor_pos } => vec![
                ("tag", tag.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            VizError::OperandDecodeError {
                opcode,
                cursor_pos,
                cause,
            } => vec![
                ("opcode", opcode.to_string()),
                ("cursor", cursor_pos.to_string()),
                ("cause", cause.clone()),
            ],
            VizError::StrayPathOpcode { opcode, cursor_pos } => vec![
                ("opcode", opcode.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            VizError::SampleCountMismatch { values, components } => vec![
                ("values", values.to_string()),
                ("components", components.to_string()),
            ],
            VizError::InvalidText { cursor_pos, reason } => vec![
                ("cursor", cursor_pos.to_string()),
                ("reason", reason.clone()),
            ],
            VizError::Unsupported { feature } => vec![("feature", feature.clone())],
            VizError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VizError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            VizError::UnknownOpcode { tag, cursor_pos } => {
                write!(f, "Unknown opcode tag {tag} at position {cursor_pos}")
            }
            VizError::UnknownNumberType { tag, cursor_pos } => {
                write!(f, "Unknown number-type tag {tag} at position {cursor_pos}")
            }
            VizError::OperandDecodeError {
                opcode,
                cursor_pos,
                cause,
            } => write!(
                f,
                "Failed to decode operands of {opcode} (cursor_pos: {cursor_pos}): {cause}"
            ),
            VizError::StrayPathOpcode { opcode, cursor_pos } => write!(
                f,
                "Path opcode {opcode} at position {cursor_pos} outside of a path"
            ),
            VizError::SampleCountMismatch { values, components } => write!(
                f,
                "Sample count mismatch: {values} values is not a multiple of {components} components"
            ),
            VizError::InvalidText { cursor_pos, reason } => {
                write!(f, "Invalid text at position {cursor_pos}: {reason}")
            }
            VizError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            VizError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for VizError {}

/// Result type for vizcodec operations.
pub type Result<T> = std::result::Result<T, VizError>;
