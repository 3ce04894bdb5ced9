use std::fmt::Write as _;
use std::io::{stdout, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use spacelink::{
    Channel, DecodedFrame, Decoder, HsiHeader, IcdHeader, Kind, ObtRecord, SptpHeader,
};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum Format {
    Json,
    Text,
}

impl clap::ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Text => Some(clap::builder::PossibleValue::new("text")),
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ChannelArg {
    Hsi,
    Spw,
}

impl From<ChannelArg> for Channel {
    fn from(value: ChannelArg) -> Self {
        match value {
            ChannelArg::Hsi => Channel::Hsi,
            ChannelArg::Spw => Channel::SpaceWire,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    Hsi,
    Sptp,
    Icd,
    Tm,
    Tk,
    Obt,
    Timecode,
}

impl From<KindArg> for Kind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Hsi => Kind::Hsi,
            KindArg::Sptp => Kind::Sptp,
            KindArg::Icd => Kind::Icd,
            KindArg::Tm => Kind::Tm,
            KindArg::Tk => Kind::Tk,
            KindArg::Obt => Kind::Obt,
            KindArg::Timecode => Kind::TimeCode,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct Crc {
    read: u16,
    computed: u16,
    ok: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Summary {
    kind: String,
    len: usize,
    hsi: Option<HsiHeader>,
    sptp: Option<SptpHeader>,
    icd: Option<IcdHeader>,
    obt: Option<ObtRecord>,
    timecode: Option<u8>,
    sub_header: Option<String>,
    payload: Option<String>,
    crc: Option<Crc>,
    size_matches: Option<bool>,
}

impl Summary {
    fn new(frame: &DecodedFrame<'_>) -> Self {
        let mut summary = Summary {
            kind: frame.kind().to_string(),
            len: frame.as_bytes().len(),
            hsi: None,
            sptp: None,
            icd: None,
            obt: None,
            timecode: None,
            sub_header: None,
            payload: None,
            crc: None,
            size_matches: None,
        };
        match frame {
            DecodedFrame::Hsi(f) => {
                summary.hsi = Some(*f.header());
                summary.payload = Some(hex::encode(f.payload()));
                summary.size_matches = Some(f.size_matches());
            }
            DecodedFrame::Sptp(f) => {
                summary.sptp = Some(*f.header());
                summary.payload = Some(hex::encode(f.payload()));
            }
            DecodedFrame::Icd(f) => {
                summary.sptp = Some(*f.sptp());
                summary.icd = Some(*f.header());
                summary.payload = Some(hex::encode(f.payload()));
                summary.size_matches = Some(f.size_matches());
            }
            DecodedFrame::Tm(f) => {
                summary.sptp = Some(*f.sptp());
                summary.icd = Some(*f.header());
                summary.sub_header = Some(hex::encode(f.sub_header()));
                summary.payload = Some(hex::encode(f.payload()));
                summary.crc = Some(Crc {
                    read: f.crc(),
                    computed: f.needed_crc(),
                    ok: f.crc_ok(),
                });
                summary.size_matches = Some(f.size_matches());
            }
            DecodedFrame::Tk(f) => {
                summary.sptp = Some(*f.sptp());
                summary.icd = Some(*f.header());
                summary.sub_header = Some(hex::encode(f.sub_header()));
                summary.payload = Some(hex::encode(f.payload()));
                summary.crc = Some(Crc {
                    read: f.crc(),
                    computed: f.needed_crc(),
                    ok: f.crc_ok(),
                });
                summary.size_matches = Some(f.size_matches());
            }
            DecodedFrame::Obt(f) => {
                summary.sptp = Some(*f.sptp());
                summary.icd = Some(*f.header());
                summary.obt = Some(*f.record());
                summary.size_matches = Some(f.size_matches());
            }
            DecodedFrame::TimeCode(f) => {
                summary.timecode = Some(f.value());
            }
        }
        summary
    }
}

/// Read one frame worth of bytes from a file or a hex string.
pub fn read_input(input: Option<&Path>, hex: Option<&str>) -> Result<Vec<u8>> {
    match (input, hex) {
        (Some(path), _) => {
            std::fs::read(path).with_context(|| format!("failed to read input {path:?}"))
        }
        (None, Some(s)) => {
            let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            hex::decode(s).context("invalid hex frame")
        }
        (None, None) => bail!("no frame given; provide hex bytes or --input"),
    }
}

pub fn decode(
    decoder: &Decoder,
    channel: Channel,
    kind: Option<Kind>,
    dat: &[u8],
    format: &Format,
) -> Result<()> {
    debug!(?channel, ?kind, len = dat.len(), "decoding");
    let frame = match kind {
        Some(kind) => decoder.decode_as(kind, dat),
        None => decoder.decode(channel, dat),
    }
    .context("decoding frame")?;

    let summary = Summary::new(&frame);
    if let Some(crc) = &summary.crc {
        if !crc.ok {
            info!(
                "crc mismatch: read {:#06x}, computed {:#06x}",
                crc.read, crc.computed
            );
        }
    }

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(stdout(), &summary).context("serializing to json")?;
            println!();
            Ok(())
        }
        Format::Text => {
            let data = render_text(&summary).context("serializing summary")?;
            stdout()
                .write_all(str::as_bytes(&data))
                .context("writing to stdout")
        }
    }
}

fn render_text(summary: &Summary) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{} frame, {} bytes", summary.kind, summary.len)?;
    if let Some(h) = &summary.hsi {
        writeln!(
            out,
            "HSI:       reserved={:#04x} flag={:?} line={:?} size={}",
            h.reserved, h.flag, h.line, h.size
        )?;
    }
    if let Some(h) = &summary.sptp {
        writeln!(
            out,
            "SPTP:      to={:#04x} from={:#04x} protocol={:?} type={:?}",
            h.to, h.from, h.protocol_id, h.msg_type
        )?;
    }
    if let Some(h) = &summary.icd {
        writeln!(
            out,
            "ICD:       version={} type={:?} flag={:?} apid={} segment={} counter={} size={}",
            h.version, h.type_flag, h.flag, h.apid, h.segment, h.counter, h.size
        )?;
    }
    if let Some(r) = &summary.obt {
        writeln!(
            out,
            "OBT:       normal={:#04x} extended={:#04x} value={}",
            r.normal, r.extended, r.value
        )?;
    }
    if let Some(v) = summary.timecode {
        writeln!(out, "TimeCode:  {v:#04x} (time={} control={})", v & 0x3f, v >> 6)?;
    }
    if let Some(s) = &summary.sub_header {
        writeln!(out, "SubHeader: {s}")?;
    }
    if let Some(s) = &summary.payload {
        writeln!(out, "Payload:   {s}")?;
    }
    if let Some(crc) = &summary.crc {
        writeln!(
            out,
            "CRC:       read={:#06x} computed={:#06x} ok={}",
            crc.read, crc.computed, crc.ok
        )?;
    }
    if let Some(matches) = summary.size_matches {
        writeln!(out, "Size:      matches={matches}")?;
    }
    Ok(out)
}
