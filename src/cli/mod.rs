// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the uniprops command-line interface.
//!
//! Query subcommands (`contains`, `ranges`, `stats`, `list`) go through a
//! property directory built from the config file, the environment and the
//! global flags. The payload subcommands (`inspect`, `encode`) work on single
//! files and never touch the data directory.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "uniprops",
    about = "Query Unicode binary property sets",
    version
)]
pub struct Cli {
    /// Root of the property data tree (overrides config and UNIPROPS_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Data format version (overrides config and UNIPROPS_DATA_VERSION)
    #[arg(long, global = true)]
    pub data_version: Option<String>,

    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Test code points for membership in a property
    Contains {
        /// Property name (long name, short alias, or binding name)
        property: String,

        /// Code points: U+0061, 0x61, 97, or a single character
        #[arg(required = true)]
        code_points: Vec<String>,
    },

    /// Print the ranges of a property
    Ranges {
        /// Property name
        property: String,

        /// Maximum number of ranges to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the ranges NOT in the property
        #[arg(long)]
        complement: bool,
    },

    /// Show size and range count for properties (all when none given)
    Stats {
        /// Property names
        properties: Vec<String>,
    },

    /// List every supported property
    List,

    /// Inspect a payload file (.uprop, TOML or JSON dump)
    Inspect {
        /// Path to payload file
        file: PathBuf,
    },

    /// Convert a TOML or JSON property dump to a binary payload
    Encode {
        /// TOML or JSON dump to read
        #[arg(short, long)]
        input: PathBuf,

        /// Binary payload to write
        #[arg(short, long)]
        output: PathBuf,

        /// Brotli-compress the payload body
        #[arg(long)]
        compress: bool,
    },
}

/// Parse `U+0061`, `0x61`, `97`, or a single character.
pub fn parse_code_point(text: &str) -> Option<u32> {
    let upper = text.to_ascii_uppercase();
    if let Some(hex) = upper.strip_prefix("U+").or_else(|| upper.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16).ok();
    }
    if let Ok(n) = text.parse::<u32>() {
        return Some(n);
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as u32),
        _ => None,
    }
}
