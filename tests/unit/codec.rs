//! Payload codec edge cases: layout, rejection paths, text dumps.

use uniprops::binary::{read_payload, PayloadHeader, MAX_BOUNDARY_COUNT, MAX_PAYLOAD_SIZE};
use uniprops::{decode_payload, encode_payload, CorruptReason, InversionList, PayloadFlags, PropertyDump};

use crate::common::{json_payload, payload, raw_json_payload, toml_payload, LOWERCASE};

fn lowercase() -> InversionList {
    InversionList::try_from_boundaries(LOWERCASE.to_vec()).unwrap()
}

/// Recompute the footer CRC after tampering with header or body.
fn reseal(bytes: &mut [u8]) {
    let n = bytes.len();
    let crc = crc32fast::hash(&bytes[..n - 8]);
    bytes[n - 8..n - 4].copy_from_slice(&crc.to_le_bytes());
}

#[test]
fn test_binary_layout() {
    let bytes = payload(&LOWERCASE);
    assert_eq!(&bytes[..4], b"UPRP");
    assert_eq!(bytes[4], 1, "format version");
    assert_eq!(bytes[5], 0, "no flags");
    assert_eq!(u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]), 4);
    assert_eq!(&bytes[bytes.len() - 4..], b"PRPU");
    assert_eq!(bytes.len(), PayloadHeader::SIZE + 4 + 8);
}

#[test]
fn test_empty_set_payload() {
    let bytes = encode_payload(&InversionList::empty(), PayloadFlags::new()).unwrap();
    assert_eq!(decode_payload(&bytes).unwrap(), Vec::<u32>::new());
}

#[test]
fn test_full_domain_payload() {
    let bytes = encode_payload(&InversionList::all(), PayloadFlags::new().with_compression()).unwrap();
    assert_eq!(decode_payload(&bytes).unwrap(), vec![0, 0x110000]);
}

#[test]
fn test_read_payload_reports_header() {
    let bytes = encode_payload(&lowercase(), PayloadFlags::new().with_compression()).unwrap();
    let decoded = read_payload(&bytes).unwrap();
    assert!(decoded.header.flags.is_compressed());
    assert_eq!(decoded.header.boundary_count, 4);
    assert_eq!(decoded.boundaries, LOWERCASE.to_vec());
}

#[test]
fn test_toml_dump_matches_binary() {
    let text = toml_payload(&[(97, 123), (170, 171)], "Lowercase", "Lower");
    assert!(String::from_utf8_lossy(&text).contains("[unicode_set.data]"));
    assert_eq!(decode_payload(&text).unwrap(), LOWERCASE.to_vec());
    assert_eq!(decode_payload(&text).unwrap(), decode_payload(&payload(&LOWERCASE)).unwrap());
}

#[test]
fn test_rejects_bad_magic() {
    let err = decode_payload(b"NOPE and then some").unwrap_err();
    assert_eq!(err, CorruptReason::BadMagic { found: *b"NOPE" });
}

#[test]
fn test_rejects_short_input() {
    assert!(matches!(
        decode_payload(b"UP").unwrap_err(),
        CorruptReason::BadMagic { .. }
    ));
    assert!(matches!(
        decode_payload(b"UPRP\x01\x00").unwrap_err(),
        CorruptReason::Truncated { .. }
    ));
    assert!(matches!(
        decode_payload(b"").unwrap_err(),
        CorruptReason::BadMagic { found: [0, 0, 0, 0] }
    ));
}

#[test]
fn test_rejects_checksum_mismatch() {
    let mut bytes = payload(&LOWERCASE);
    bytes[PayloadHeader::SIZE] ^= 0x01;
    assert!(matches!(
        decode_payload(&bytes).unwrap_err(),
        CorruptReason::ChecksumMismatch { .. }
    ));
}

#[test]
fn test_rejects_bad_footer() {
    let mut bytes = payload(&LOWERCASE);
    let n = bytes.len();
    bytes[n - 1] = b'X';
    assert!(matches!(
        decode_payload(&bytes).unwrap_err(),
        CorruptReason::BadFooter { .. }
    ));
}

#[test]
fn test_rejects_unknown_version_and_flags() {
    let mut bytes = payload(&LOWERCASE);
    bytes[4] = 9;
    reseal(&mut bytes);
    assert_eq!(
        decode_payload(&bytes).unwrap_err(),
        CorruptReason::UnsupportedVersion { version: 9 }
    );

    let mut bytes = payload(&LOWERCASE);
    bytes[5] = 0x80;
    reseal(&mut bytes);
    assert_eq!(
        decode_payload(&bytes).unwrap_err(),
        CorruptReason::UnknownFlags { flags: 0x80 }
    );
}

#[test]
fn test_rejects_count_mismatch() {
    // Declares two boundaries but the body holds four.
    let mut bytes = payload(&LOWERCASE);
    bytes[8..12].copy_from_slice(&2u32.to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(
        decode_payload(&bytes).unwrap_err(),
        CorruptReason::TrailingBytes { .. }
    ));

    // Declares six.
    let mut bytes = payload(&LOWERCASE);
    bytes[8..12].copy_from_slice(&6u32.to_le_bytes());
    reseal(&mut bytes);
    assert!(decode_payload(&bytes).is_err());
}

#[test]
fn test_rejects_odd_and_oversized_counts() {
    let mut bytes = payload(&LOWERCASE);
    bytes[8..12].copy_from_slice(&3u32.to_le_bytes());
    reseal(&mut bytes);
    assert_eq!(
        decode_payload(&bytes).unwrap_err(),
        CorruptReason::OddLength { len: 3 }
    );

    let mut bytes = payload(&LOWERCASE);
    bytes[8..12].copy_from_slice(&(MAX_BOUNDARY_COUNT + 1).to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(
        decode_payload(&bytes).unwrap_err(),
        CorruptReason::CountTooLarge { .. }
    ));
}

#[test]
fn test_rejects_oversized_payload() {
    let mut bytes = vec![0u8; MAX_PAYLOAD_SIZE + 1];
    bytes[..4].copy_from_slice(b"UPRP");
    assert!(matches!(
        decode_payload(&bytes).unwrap_err(),
        CorruptReason::TooLarge { .. }
    ));
}

#[test]
fn test_rejects_garbage_compressed_body() {
    let mut bytes = payload(&LOWERCASE);
    bytes[5] = PayloadFlags::COMPRESSED;
    reseal(&mut bytes);
    assert!(decode_payload(&bytes).is_err());
}

#[test]
fn test_json_ranges_are_inclusive() {
    let bytes = json_payload(&[(97, 123), (170, 171)], "Lowercase", "Lower");
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.contains("\"long_name\": \"Lowercase\""));

    let dump = PropertyDump::from_json(&bytes).unwrap();
    assert_eq!(dump.long_name(), "Lowercase");
    assert_eq!(dump.name(), "Lower");
    assert_eq!(decode_payload(&bytes).unwrap(), LOWERCASE.to_vec());
}

#[test]
fn test_json_without_serialized_uses_ranges() {
    let json = br#"{"unicode_set":{"data":{"ranges":[[170,170],[97,122]]}}}"#;
    assert_eq!(decode_payload(json).unwrap(), LOWERCASE.to_vec());
}

#[test]
fn test_json_rejects_bad_serialized() {
    assert!(matches!(
        decode_payload(&raw_json_payload(&[5, 3])).unwrap_err(),
        CorruptReason::NotIncreasing { .. }
    ));
    assert!(matches!(
        decode_payload(&raw_json_payload(&[1, 2, 3])).unwrap_err(),
        CorruptReason::OddLength { len: 3 }
    ));
    assert!(matches!(
        decode_payload(&raw_json_payload(&[0, 0x110001])).unwrap_err(),
        CorruptReason::OutOfDomain { .. }
    ));
}

#[test]
fn test_json_rejects_bad_ranges() {
    let inverted = br#"{"unicode_set":{"data":{"ranges":[[10,5]]}}}"#;
    assert_eq!(
        decode_payload(inverted).unwrap_err(),
        CorruptReason::InvertedRange { start: 10, end: 5 }
    );

    let beyond = br#"{"unicode_set":{"data":{"ranges":[[0,1114112]]}}}"#;
    assert!(matches!(
        decode_payload(beyond).unwrap_err(),
        CorruptReason::OutOfDomain { .. }
    ));
}

#[test]
fn test_json_rejects_malformed_text() {
    assert!(matches!(
        decode_payload(b"{ not json").unwrap_err(),
        CorruptReason::Malformed { .. }
    ));
    assert!(matches!(
        decode_payload(br#"{"unicode_set": 5}"#).unwrap_err(),
        CorruptReason::Malformed { .. }
    ));
}

#[test]
fn test_leading_whitespace_json() {
    let mut bytes = b"\n  ".to_vec();
    bytes.extend(json_payload(&[(0, 1)], "", ""));
    assert_eq!(decode_payload(&bytes).unwrap(), vec![0, 1]);
}
