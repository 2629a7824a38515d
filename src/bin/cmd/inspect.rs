// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show stream information, opcodes, Z levels.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{format_size, load_stream, Result};
use vizcodec::canvas::extract_contexts;
use vizcodec::stream::{skip_operands, Opcode, StreamCursor};

/// Inspect canvas stream contents.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show basic stream information and summary
    Info {
        /// Input stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List every opcode with its offset and operand bytes
    Opcodes {
        /// Input stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Stop after this many opcodes
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the render contexts extracted per Z level
    Zlevels {
        /// Input stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Info { input } => cmd_info(input),
            InspectCmd::Opcodes { input, limit } => cmd_opcodes(input, limit),
            InspectCmd::Zlevels { input, json } => cmd_zlevels(input, json),
        }
    }
}

/// Cmd: Show stream info
fn cmd_info(input: PathBuf) -> Result<()> {
    let data = load_stream(&input)?;
    let index = extract_contexts(&data);
    let commands: usize = index.contexts.iter().map(|c| c.command_count).sum();

    println!("=== {} ===", input.display());
    println!("Size: {}", format_size(data.len()));
    println!("Z levels: {}", index.contexts.len());
    println!("Drawing commands: {commands}");
    match index.default_viewport {
        Some(v) => println!(
            "Default viewport: {} {} {} {}",
            v.x, v.y, v.width, v.height
        ),
        None => println!("Default viewport: none"),
    }
    Ok(())
}

/// Cmd: Dump opcodes
fn cmd_opcodes(input: PathBuf, limit: Option<usize>) -> Result<()> {
    let data = load_stream(&input)?;
    let mut cursor = StreamCursor::new(&data);
    let limit = limit.unwrap_or(usize::MAX);
    let mut shown = 0usize;

    while !cursor.is_at_end() && shown < limit {
        let offset = cursor.position();
        let tag = cursor.read_u8()?;
        let op = match Opcode::from_u8(tag, offset as u64) {
            Ok(op) => op,
            Err(e) => {
                println!("{offset:>8}  <unknown tag 0x{tag:02x}> ({e})");
                break;
            }
        };
        skip_operands(&mut cursor, op)?;
        let operands = &data[offset + 1..cursor.position()];
        println!("{offset:>8}  {:<24} {}", op.name(), hex::encode(operands));
        shown += 1;
    }
    Ok(())
}

/// Cmd: Show Z-level contexts
fn cmd_zlevels(input: PathBuf, json: bool) -> Result<()> {
    let data = load_stream(&input)?;
    let index = extract_contexts(&data);

    if json {
        println!("{}", serde_json::to_string_pretty(&index.summaries())?);
        return Ok(());
    }

    println!("{:>12}  {:>8}  {:>8}", "z", "offset", "commands");
    for ctx in &index.contexts {
        println!(
            "{:>12}  {:>8}  {:>8}",
            ctx.z, ctx.offset, ctx.command_count
        );
    }
    Ok(())
}
