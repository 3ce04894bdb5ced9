mod decode;
mod encode;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use spacelink::Apid;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode exactly one frame and show its fields.
    ///
    /// The frame is given either as a hex string or as a file containing exactly the
    /// bytes of one frame.
    Decode {
        /// Channel the frame was received on.
        #[arg(short, long, default_value = "spw")]
        channel: decode::ChannelArg,

        /// Decode as this kind instead of classifying by channel and SPTP header.
        #[arg(short, long)]
        kind: Option<decode::KindArg>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: decode::Format,

        /// Fail if a TM/TK CRC does not match.
        #[arg(long, action)]
        verify_crc: bool,

        /// Fail if a declared size does not match the frame contents.
        #[arg(long, action)]
        check_size: bool,

        /// Fail if a HSI frame does not start with the sync byte.
        #[arg(long, action)]
        check_sync: bool,

        /// Read the frame from this file.
        #[arg(short, long, value_name = "path", conflicts_with = "hex")]
        input: Option<PathBuf>,

        /// Frame bytes as hex.
        hex: Option<String>,
    },
    /// Build an outgoing frame and print it as hex.
    Build {
        #[command(subcommand)]
        frame: BuildCommands,
    },
}

#[derive(Subcommand)]
enum BuildCommands {
    /// Plain SPTP data frame.
    Sptp {
        #[arg(long, value_parser = parse_u8)]
        to: u8,
        #[arg(long, value_parser = parse_u8)]
        from: u8,
        /// Payload as hex.
        payload: String,
    },
    /// Telecommand.
    Tk {
        #[arg(long, value_parser = parse_u8)]
        to: u8,
        #[arg(long, value_parser = parse_u8)]
        from: u8,
        #[arg(long, value_parser = parse_apid)]
        apid: Apid,
        /// Body as hex, starting with the 4 byte sub-header.
        body: String,
    },
    /// Onboard time.
    Obt {
        #[arg(long, value_parser = parse_u8)]
        to: u8,
        #[arg(long, value_parser = parse_u8)]
        from: u8,
        #[arg(long, value_parser = parse_apid)]
        apid: Apid,
        #[arg(long, value_parser = parse_u8, default_value = "0")]
        normal: u8,
        #[arg(long, value_parser = parse_u8, default_value = "0")]
        extended: u8,
        /// Time value.
        #[arg(long, value_parser = parse_u32)]
        value: u32,
    },
}

/// Parse a decimal or 0x prefixed hex number.
fn parse_u32(s: &str) -> Result<u32> {
    let zult = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => s.parse::<u32>(),
    };
    zult.map_err(|e| anyhow!("invalid number {s:?}: {e}"))
}

fn parse_u8(s: &str) -> Result<u8> {
    let x = parse_u32(s)?;
    u8::try_from(x).map_err(|_| anyhow!("{x} does not fit in a byte"))
}

fn parse_apid(s: &str) -> Result<Apid> {
    let x = parse_u32(s)?;
    if x > u32::from(spacelink::IcdHeader::APID_MAX) {
        bail!("apid {x} does not fit in 11 bits");
    }
    Ok(x as Apid)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("SPACELINK_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Decode {
            channel,
            kind,
            format,
            verify_crc,
            check_size,
            check_sync,
            input,
            hex,
        } => {
            let dat = decode::read_input(input.as_deref(), hex.as_deref())?;
            let decoder = spacelink::Decoder::builder()
                .verify_crc(*verify_crc)
                .check_size(*check_size)
                .check_hsi_sync(*check_sync)
                .build();
            decode::decode(&decoder, (*channel).into(), kind.map(Into::into), &dat, format)
        }
        Commands::Build { frame } => {
            let dat = match frame {
                BuildCommands::Sptp { to, from, payload } => {
                    encode::sptp(&encode::parse_hex(payload)?, *to, *from)
                }
                BuildCommands::Tk {
                    to,
                    from,
                    apid,
                    body,
                } => encode::tk(&encode::parse_hex(body)?, *to, *from, *apid)?,
                BuildCommands::Obt {
                    to,
                    from,
                    apid,
                    normal,
                    extended,
                    value,
                } => encode::obt(*normal, *extended, *value, *to, *from, *apid)?,
            };
            println!("{}", hex::encode(dat));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_u32("42").unwrap(), 42);
        assert_eq!(parse_u32("0x2a").unwrap(), 42);
        assert_eq!(parse_u8("0xff").unwrap(), 255);
        assert!(parse_u8("256").is_err());
        assert_eq!(parse_apid("2047").unwrap(), 2047);
        assert!(parse_apid("2048").is_err());
        assert!(parse_u32("zz").is_err());
    }

    #[test]
    fn cli_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
