use rand::Rng;
use spacelink::{crc16, IcdFlag, IcdHeader, IcdType, MsgType, ProtocolId, SptpHeader};

/// Build TM frame bytes with a correct CRC around `body`.
pub fn tm_bytes(apid: u16, counter: u16, body: &[u8]) -> Vec<u8> {
    let sptp = SptpHeader {
        to: 0x10,
        protocol_id: ProtocolId::Icd,
        msg_type: MsgType::Telemetry,
        from: 0x20,
    };
    let icd = IcdHeader {
        version: 0,
        type_flag: IcdType::Telemetry,
        flag: IcdFlag::HeaderFill,
        apid,
        segment: spacelink::SEG_UNSEGMENTED,
        counter,
        size: body.len() as u16,
    };
    let mut dat = sptp.encode().to_vec();
    dat.extend_from_slice(&icd.encode());
    dat.extend_from_slice(body);
    let crc = crc16(&dat[4..], dat.len() - 4);
    dat.extend_from_slice(&crc.to_be_bytes());
    dat
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}
