// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Vizcodec CLI
//!
//! Command-line tool for canvas stream inspection and rendering.
//!
//! ## Usage
//!
//! ```sh
//! # Show stream information
//! vizcodec inspect info scene.viz
//!
//! # Dump every opcode with operand bytes
//! vizcodec inspect opcodes scene.viz
//!
//! # Show extracted Z-level contexts
//! vizcodec inspect zlevels scene.viz --json
//!
//! # Rasterize to a PNG
//! vizcodec render scene.viz scene.png --width 1024 --height 768
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{InspectCmd, RenderCmd};
use common::Result;

/// Vizcodec - Canvas stream toolkit
///
/// Inspect and rasterize binary canvas opcode streams produced by
/// robotics visualization components.
#[derive(Parser, Clone)]
#[command(name = "vizcodec")]
#[command(about = "Canvas stream toolkit for robotics visualization data", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect stream contents (info, opcodes, z levels)
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Rasterize a stream to a PNG image
    Render(RenderCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Render(cmd) => cmd.run(),
    }
}

fn main() {
    let _ = tracing_subscriber::fmt::try_init();

    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
