use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use uniprops::binary::dump::looks_like_json;
use uniprops::binary::{is_binary_payload, read_payload};
use uniprops::{
    encode_payload, BinaryProperty, Config, PayloadFlags, PropertyDirectory, PropertyDump,
    PropertySet,
};

mod cli;
use cli::display::{self, field, section_bot, section_mid, section_top};
use cli::{parse_code_point, Cli, Commands};

fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Contains {
            ref property,
            ref code_points,
        } => {
            let dir = directory(&cli)?;
            run_contains(&dir, property, code_points)
        }
        Commands::Ranges {
            ref property,
            limit,
            complement,
        } => {
            let dir = directory(&cli)?;
            run_ranges(&dir, property, limit, complement)
        }
        Commands::Stats { ref properties } => {
            let dir = directory(&cli)?;
            run_stats(&dir, properties)
        }
        Commands::List => {
            run_list();
            Ok(())
        }
        Commands::Inspect { ref file } => run_inspect(file),
        Commands::Encode {
            ref input,
            ref output,
            compress,
        } => run_encode(input, output, compress),
    }
}

/// Config file, then environment, then flags.
fn directory(cli: &Cli) -> Result<PropertyDirectory> {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let config = base
        .with_env()
        .with_overrides(cli.data_dir.clone(), cli.data_version.clone());
    debug!(
        data_dir = %config.data_dir.display(),
        version = %config.data_version,
        "using property data"
    );
    Ok(PropertyDirectory::from_config(&config))
}

fn run_contains(dir: &PropertyDirectory, property: &str, code_points: &[String]) -> Result<()> {
    let set = PropertySet::from_name(dir, property)
        .with_context(|| format!("loading property '{}'", property))?;

    for text in code_points {
        let Some(cp) = parse_code_point(text) else {
            bail!("'{}' is not a code point (use U+0061, 0x61, 97, or a character)", text);
        };
        let shown = char::from_u32(cp)
            .filter(|c| !c.is_control())
            .map(|c| format!(" '{}'", c))
            .unwrap_or_default();
        println!(
            "{}{}{}\t{}",
            display::code_point(cp),
            shown,
            display::surrogate_note(cp),
            display::verdict(set.contains(cp))
        );
    }
    Ok(())
}

fn run_ranges(
    dir: &PropertyDirectory,
    property: &str,
    limit: Option<usize>,
    complement: bool,
) -> Result<()> {
    let set = PropertySet::from_name(dir, property)
        .with_context(|| format!("loading property '{}'", property))?;

    let ranges: Vec<(u32, u32)> = if complement {
        set.as_set().iter_ranges_complemented().collect()
    } else {
        set.iter_ranges().collect()
    };
    let shown = limit.unwrap_or(ranges.len()).min(ranges.len());

    for &(start, end) in &ranges[..shown] {
        println!("{}", display::range(start, end));
    }
    if shown < ranges.len() {
        println!("... {} more", ranges.len() - shown);
    }
    Ok(())
}

fn run_stats(dir: &PropertyDirectory, names: &[String]) -> Result<()> {
    let properties: Vec<BinaryProperty> = if names.is_empty() {
        BinaryProperty::ALL.to_vec()
    } else {
        names
            .iter()
            .map(|n| BinaryProperty::from_name(n))
            .collect::<Result<_, _>>()?
    };

    let mut failures = 0;
    for property in properties {
        match PropertySet::new(dir, property) {
            Ok(set) => println!(
                "{:<32} {:>8} code points {:>6} ranges",
                property.long_name(),
                set.size(),
                set.range_count()
            ),
            Err(e) => {
                failures += 1;
                eprintln!("{:<32} {}", property.long_name(), e);
            }
        }
    }

    let stats = dir.loader().stats();
    debug!(
        fetches = stats.fetches,
        hits = stats.hits,
        failures = stats.failures,
        "loader stats"
    );
    if failures > 0 {
        bail!("{} properties could not be loaded", failures);
    }
    Ok(())
}

fn run_list() {
    for &property in BinaryProperty::ALL {
        println!(
            "{:<32} {:<10} {:<30} {}",
            property.long_name(),
            property.key(),
            property.binding_name(),
            display::source_badge(property.is_derived())
        );
    }
}

fn run_inspect(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let (set, format) = if is_binary_payload(&bytes) {
        let payload = read_payload(&bytes)
            .with_context(|| format!("decoding {}", path.display()))?;

        section_top("HEADER");
        field("Version", &payload.header.version.to_string());
        field("Compressed", &payload.header.flags.is_compressed().to_string());
        field("Boundaries", &payload.header.boundary_count.to_string());
        section_mid("BODY");
        field("Body size", &display::format_size(payload.body_len));
        field("CRC32", &format!("{:#010x}", payload.crc32));

        let set = uniprops::InversionList::try_from_boundaries(payload.boundaries)?;
        (set, "binary")
    } else {
        let dump = PropertyDump::from_text(&bytes)
            .with_context(|| format!("decoding {}", path.display()))?;

        section_top("DUMP");
        field("Long name", dump.long_name());
        field("Name", dump.name());
        let set = dump.to_set()?;
        (set, if looks_like_json(&bytes) { "json" } else { "toml" })
    };

    section_mid("SET");
    field("Format", format);
    field("File size", &display::format_size(bytes.len()));
    field("Ranges", &set.range_count().to_string());
    field("Code points", &set.size().to_string());
    if let (Some(first), Some(last)) = (set.iter_ranges().next(), set.iter_ranges().next_back()) {
        field("First range", &display::range(first.0, first.1));
        field("Last range", &display::range(last.0, last.1));
    }
    section_bot();
    Ok(())
}

fn run_encode(input: &Path, output: &Path, compress: bool) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let set = PropertyDump::from_text(&bytes)
        .and_then(|dump| dump.to_set())
        .with_context(|| format!("decoding {}", input.display()))?;

    let flags = if compress {
        PayloadFlags::new().with_compression()
    } else {
        PayloadFlags::new()
    };
    let encoded = encode_payload(&set, flags)?;
    fs::write(output, &encoded).with_context(|| format!("writing {}", output.display()))?;

    println!(
        "{} ranges, {} code points: {} -> {}",
        set.range_count(),
        set.size(),
        display::format_size(bytes.len()),
        display::format_size(encoded.len())
    );
    Ok(())
}
