// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the uniprops CLI.
//!
//! OneDark colors, box drawing for `inspect`, and a few formatters. Color is
//! only used when stdout is a terminal and `NO_COLOR` is unset, so piped
//! output stays plain.

use std::io::IsTerminal;
use std::sync::OnceLock;

use uniprops::types::is_surrogate;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════
// COLORS
// ═══════════════════════════════════════════════════════════════════════════

/// True color escape sequence helper
fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

/// OneDark palette
mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

macro_rules! palette_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            if !use_colors() {
                return String::new();
            }
            let (r, g, b) = onedark::$name;
            rgb(r, g, b)
        }
    };
}

palette_color!(RED);
palette_color!(GREEN);
palette_color!(BLUE);
palette_color!(MAGENTA);
palette_color!(CYAN);
palette_color!(GRAY);

static USE_COLORS: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used (TTY detection, cached)
pub fn use_colors() -> bool {
    *USE_COLORS.get_or_init(|| {
        // Respect NO_COLOR standard
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    })
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset(),
        content,
        " ".repeat(pad),
        border,
        reset()
    );
}

/// Print a label/value row with the value right-aligned.
pub fn field(label: &str, value: &str) {
    let left = format!(" {}", label);
    let right = format!("{} ", value);
    let gap = BOX_WIDTH.saturating_sub(visible_len(&left) + visible_len(&right));
    row(&format!("{}{}{}", left, " ".repeat(gap), right));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        reset()
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        reset()
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", GRAY(), "─".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// `U+0061`, at least four hex digits.
pub fn code_point(value: u32) -> String {
    format!("U+{:04X}", value)
}

/// Half-open range shown inclusively: `U+0061..U+007A`, or one code point.
pub fn range(start: u32, end: u32) -> String {
    if end == start + 1 {
        code_point(start)
    } else {
        format!("{}..{}", code_point(start), code_point(end - 1))
    }
}

/// ` (surrogate)` for U+D800..U+DFFF, which have no `char` to show.
pub fn surrogate_note(value: u32) -> String {
    if is_surrogate(value) {
        format!(" {}", themed(GRAY, &[], "(surrogate)"))
    } else {
        String::new()
    }
}

/// Colored yes/no.
pub fn verdict(member: bool) -> String {
    if member {
        themed(GREEN, &[BOLD], "yes")
    } else {
        themed(RED, &[], "no")
    }
}

/// Stored vs derived badge.
pub fn source_badge(derived: bool) -> String {
    if derived {
        themed(MAGENTA, &[], "derived")
    } else {
        themed(BLUE, &[], "stored")
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
