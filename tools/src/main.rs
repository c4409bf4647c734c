use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::AckKind;
use glob::Pattern;
use rakcodec_tools::{
    condense_numbers, decode_packet_json, format_decode_pretty, hex, inspect_packet,
    join_records, InspectReport,
};
use wire::{Limits, WireConfig};

#[derive(Parser)]
#[command(
    name = "rakcodec-tools",
    version,
    about = "RakNet datagram inspection and decoding tools"
)]
struct Cli {
    /// Lift every decode limit.
    #[arg(long, global = true)]
    unlimited: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect datagram structure and sizes.
    Inspect {
        /// Path to a captured datagram, or a directory of them.
        packet_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected datagrams.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected datagrams (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode a datagram into structured output.
    Decode {
        /// Path to the datagram bytes.
        packet_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Condense sequence numbers and print the encoded acknowledgment.
    Condense {
        /// Sequence numbers, in any order.
        #[arg(required = true)]
        numbers: Vec<u32>,
        /// Encode as a NACK instead of an ACK.
        #[arg(long)]
        nack: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = if cli.unlimited {
        WireConfig::default().limits(Limits::unlimited())
    } else {
        WireConfig::default()
    };
    match cli.command {
        Command::Inspect {
            packet_path,
            glob,
            sort,
            limit,
        } => {
            if packet_path.is_dir() {
                let entries = collect_packet_entries(&packet_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let bytes = read_packet(&entry.path)?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    match inspect_packet(&bytes, &config) {
                        Ok(report) => print_inspect_report(&report),
                        Err(err) => println!("error: {err:#}"),
                    }
                }
            } else {
                let bytes = read_packet(&packet_path)?;
                let report = inspect_packet(&bytes, &config)?;
                print_inspect_report(&report);
            }
        }
        Command::Decode {
            packet_file,
            format,
        } => {
            let bytes = read_packet(&packet_file)?;
            match format {
                DecodeFormat::Json => {
                    let output = decode_packet_json(&bytes, &config)?;
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    let packet = codec::decode_packet(&bytes, &config)
                        .with_context(|| format!("decode {}", packet_file.display()))?;
                    println!("{}", format_decode_pretty(&packet));
                }
            }
        }
        Command::Condense { numbers, nack } => {
            let kind = if nack { AckKind::Nack } else { AckKind::Ack };
            let report = condense_numbers(&numbers, kind, &config)?;
            println!("records ({}): {}", report.records.len(), join_records(&report.records));
            println!("encoded ({} bytes): {}", report.encoded.len(), hex(&report.encoded));
        }
    }
    Ok(())
}

fn read_packet(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read packet {}", path.display()))
}

struct PacketEntry {
    path: PathBuf,
    size: u64,
}

fn collect_packet_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<PacketEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(PacketEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<PacketEntry>,
    sort: Option<InspectSort>,
) -> Vec<PacketEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}

fn print_inspect_report(report: &InspectReport) {
    println!(
        "packet: {:?} (0x{:02x})",
        report.packet_id,
        report.packet_id.raw()
    );
    println!(
        "total: {} bytes body: {} bytes trailing: {} bytes",
        report.total_bytes, report.body_bytes, report.trailing_bytes
    );
    if let Some(ack) = &report.ack {
        println!(
            "records on wire: {} sequence numbers: {}",
            ack.wire_records, ack.sequence_numbers
        );
    }
}
