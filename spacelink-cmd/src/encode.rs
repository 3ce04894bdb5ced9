use anyhow::{Context, Result};
use spacelink::{Apid, ObtFrameBuf, ObtRecord, SptpFrameBuf, TkFrameBuf};
use tracing::debug;

pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(s).context("invalid hex")
}

pub fn sptp(payload: &[u8], to: u8, from: u8) -> Vec<u8> {
    SptpFrameBuf::new(payload, to, from).into_bytes()
}

pub fn tk(body: &[u8], to: u8, from: u8, apid: Apid) -> Result<Vec<u8>> {
    let frame = TkFrameBuf::new(body, to, from, apid).context("building telecommand")?;
    debug!(crc = frame.crc(), "built telecommand");
    Ok(frame.into_bytes())
}

pub fn obt(
    normal: u8,
    extended: u8,
    value: u32,
    to: u8,
    from: u8,
    apid: Apid,
) -> Result<Vec<u8>> {
    let record = ObtRecord {
        normal,
        extended,
        value,
    };
    let frame = ObtFrameBuf::new(record, to, from, apid).context("building time frame")?;
    Ok(frame.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_sptp() {
        let dat = sptp(&parse_hex("01 02").unwrap(), 0x77, 0x66);
        assert_eq!(hex::encode(dat), "77f002660102");
    }

    #[test]
    fn build_tk() {
        let dat = tk(&[0, 0, 0, 0], 1, 2, 3).unwrap();
        assert_eq!(dat.len(), 16);
        assert!(tk(&[0], 1, 2, 3).is_err());
    }

    #[test]
    fn build_obt() {
        let dat = obt(1, 2, 0x0102_0304, 3, 4, 5).unwrap();
        assert_eq!(&dat[10..], &[1, 2, 4, 3, 2, 1]);
    }
}
