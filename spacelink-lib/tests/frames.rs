mod common;

use spacelink::{
    crc16, decode_as, Channel, Decode, DecodedFrame, Decoder, Error, Frame, HsiFrame, IcdFrame,
    IcdFlag, Kind, Line, MsgType, ObtFrame, ObtFrameBuf, ObtRecord, ProtocolId, SptpFrame,
    SptpFrameBuf, TimeCodeFrame, TkFrame, TkFrameBuf, TmFrame, SEG_UNSEGMENTED,
};
use test_case::test_case;

use common::{random_bytes, tm_bytes};

#[test]
fn hsi_sample() {
    let dat = hex::decode("a433fff2").unwrap();
    let frame = HsiFrame::decode(&dat).unwrap();

    assert_eq!(u8::from(frame.header().flag), 0x33);
    assert_eq!(frame.header().line, Line::Reserve);
    assert_eq!(frame.header().size, 0x7ff2);
    assert!(frame.payload().is_empty());
}

#[test]
fn sptp_build() {
    let payload = hex::decode("010203040506").unwrap();
    let built = SptpFrameBuf::new(&payload, 0x77, 0x66);

    let mut expected = vec![0x77, ProtocolId::STANDARD, u8::from(MsgType::Data), 0x66];
    expected.extend_from_slice(&payload);
    assert_eq!(built.as_bytes(), &expected[..]);
    assert_eq!(built.clone().into_bytes().len(), 10);
}

#[test]
fn icd_boundary() {
    assert_eq!(
        IcdFrame::decode(&[0u8; 9]).unwrap_err(),
        Error::FrameTooShort {
            actual: 9,
            minimum: 10
        }
    );
    let bytes = hex::decode("77f102661a5f40010000").unwrap();
    let frame = IcdFrame::decode(&bytes).unwrap();
    assert_eq!(frame.header().apid, 607);
    assert_eq!(frame.header().segment, 1);
    assert_eq!(frame.header().counter, 1);
    assert_eq!(frame.header().size, 0);
}

#[test_case(15 => matches Err(Error::FrameTooShort { actual: 15, minimum: 16 }); "one short")]
#[test_case(16 => matches Ok(_); "minimum")]
fn tm_tk_boundary(len: usize) -> Result<(), Error> {
    let dat = vec![0u8; len];
    let tm = TmFrame::decode(&dat)?;
    let tk = TkFrame::decode(&dat)?;
    assert!(tm.payload().is_empty());
    assert!(tk.payload().is_empty());
    assert_eq!(tm.crc(), 0);
    Ok(())
}

#[test]
fn tk_build() {
    let payload = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
    let built = TkFrameBuf::new(&payload, 0x77, 0x66, 607).unwrap();
    let dat = built.as_bytes();
    let frame = TkFrame::decode(dat).unwrap();

    assert_eq!(frame.header().flag, IcdFlag::HeaderFill);
    assert_eq!(frame.header().segment, SEG_UNSEGMENTED);
    assert_eq!(frame.header().size, 6);
    assert_eq!(frame.header().counter, 0);
    assert_eq!(frame.header().version, 0);
    assert_eq!(frame.crc(), crc16(&dat[4..], dat.len() - 6));
}

#[test_case(0)]
#[test_case(5)]
#[test_case(65540)]
fn obt_wrong_length(len: usize) {
    let dat = vec![0u8; len];
    assert_eq!(
        ObtFrame::decode(&dat).unwrap_err(),
        Error::FrameWrongLength {
            actual: len,
            expected: 16
        }
    );
}

#[test]
fn timecode_only_single_byte() {
    for len in [0, 3, 4] {
        assert!(matches!(
            TimeCodeFrame::decode(&vec![0u8; len]),
            Err(Error::FrameWrongLength { .. })
        ));
    }
    assert_eq!(TimeCodeFrame::decode(&[0x7f]).unwrap().value(), 0x7f);
}

#[test]
fn round_trip_every_kind() {
    let obt = ObtFrameBuf::new(
        ObtRecord {
            normal: 1,
            extended: 2,
            value: 0xdead_beef,
        },
        3,
        4,
        5,
    )
    .unwrap();
    let cases: Vec<(Kind, Vec<u8>)> = vec![
        (Kind::Hsi, hex::decode("a4020004cafebabe").unwrap()),
        (Kind::Sptp, SptpFrameBuf::new(&random_bytes(33), 1, 2).into_bytes()),
        (Kind::Icd, hex::decode("01f102020000c0000000").unwrap()),
        (Kind::Tm, tm_bytes(42, 9, &random_bytes(20))),
        (
            Kind::Tk,
            TkFrameBuf::new(&random_bytes(12), 1, 2, 0x7ff)
                .unwrap()
                .into_bytes(),
        ),
        (Kind::Obt, obt.into_bytes()),
        (Kind::TimeCode, vec![0x81]),
    ];

    for (kind, dat) in cases {
        let frame = decode_as(kind, &dat).unwrap();
        assert_eq!(frame.kind(), kind);
        assert_eq!(frame.as_bytes(), &dat[..], "{kind} did not round trip");

        // decoding our own output again yields the same frame
        let again = decode_as(kind, frame.as_bytes()).unwrap();
        assert_eq!(again, frame, "{kind} is not idempotent");
    }
}

#[test]
fn random_tm_frames_verify() {
    let decoder = Decoder::builder()
        .verify_crc(true)
        .check_size(true)
        .build();

    for len in [4, 5, 64, 1024] {
        let body = random_bytes(len);
        let dat = tm_bytes(0x123, 0x3fff, &body);
        let frame = decoder.decode(Channel::SpaceWire, &dat).unwrap();

        let DecodedFrame::Tm(tm) = frame else {
            panic!("expected TM, got {}", frame.kind());
        };
        assert_eq!(tm.body(), &body[..]);
        assert_eq!(tm.header().apid, 0x123);
        assert_eq!(tm.header().counter, 0x3fff);
        assert_eq!(tm.to_vec(), dat);
    }
}

#[test]
fn layers_share_the_buffer() {
    let dat = tm_bytes(7, 1, &[1, 2, 3, 4, 5]);
    let tm = TmFrame::decode(&dat).unwrap();
    let sptp = SptpFrame::decode(&dat).unwrap();

    assert_eq!(tm.icd().icd_bytes(), sptp.payload());
    assert_eq!(tm.icd().icd_bytes().as_ptr(), dat[4..].as_ptr());
    assert_eq!(tm.payload().as_ptr(), dat[14..].as_ptr());
}
