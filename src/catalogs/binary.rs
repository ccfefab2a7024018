//! Reader and writer for the fixed-layout binary star catalog.
//!
//! The file is a bare sequence of records with no header, count, checksum
//! or version. The number of records is supplied by the caller.
//!
//! # Record layout
//!
//! All integers and floats are big-endian. The name is the only
//! variable-length field, so every offset after it shifts by `2 × name_len`.
//!
//! ```text
//! offset        size        field
//! 0             4           key (raw bytes)
//! 4             132         unused
//! 136           4 × 3       position x, y, z (f32)
//! 148           4           aux (raw bytes)
//! 152           4           flags (u32)
//! 156           4           name_len (u32, UTF-16 code units)
//! 160           2·name_len  name (UTF-16LE)
//! 160+2n        20          unused
//! 180+2n        4           type (u32)
//! 184+2n        52          unused
//! 236+2n        1           planet count (u8)
//! ```
//!
//! A record is therefore `237 + 2 × name_len` bytes long.

use std::path::Path;

use tracing::{debug, info};

use crate::{CatalogError, FormatError, StarKey, StarRecord, Vector3};

/// Number of records in the reference catalog file.
pub const DEFAULT_RECORD_COUNT: usize = 42_010;

const KEY_LEN: usize = 4;
const HEADER_SKIP: usize = 132;
const AUX_LEN: usize = 4;
const POST_NAME_SKIP: usize = 20;
const POST_TYPE_SKIP: usize = 52;

/// Size of a record whose name is empty.
pub const FIXED_RECORD_LEN: usize =
    KEY_LEN + HEADER_SKIP + 12 + AUX_LEN + 4 + 4 + POST_NAME_SKIP + 4 + POST_TYPE_SKIP + 1;

/// Byte cursor that reports which field ran out of data.
struct RecordReader<'a> {
    data: &'a [u8],
    offset: usize,
    record: usize,
}

impl<'a> RecordReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            record: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], FormatError> {
        if len > self.remaining() {
            return Err(FormatError::Truncated {
                record: self.record,
                field,
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], FormatError> {
        let bytes = self.take(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn skip(&mut self, len: usize, field: &'static str) -> Result<(), FormatError> {
        self.take(len, field).map(|_| ())
    }

    fn u32_be(&mut self, field: &'static str) -> Result<u32, FormatError> {
        self.take_array::<4>(field).map(u32::from_be_bytes)
    }

    fn f32_be(&mut self, field: &'static str) -> Result<f32, FormatError> {
        self.take_array::<4>(field).map(f32::from_be_bytes)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, FormatError> {
        self.take_array::<1>(field).map(|b| b[0])
    }

    fn utf16_le(&mut self, code_units: usize) -> Result<String, FormatError> {
        // Guard the multiplication: a corrupt length must become a
        // truncation error, not an overflow.
        let byte_len = code_units.checked_mul(2).unwrap_or(usize::MAX);
        let bytes = self.take(byte_len, "name")?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|source| FormatError::InvalidName {
            record: self.record,
            code_units,
            source,
        })
    }

    fn read_record(&mut self) -> Result<StarRecord, FormatError> {
        let key = StarKey(self.take_array::<KEY_LEN>("key")?);
        self.skip(HEADER_SKIP, "unused header block")?;

        let x = self.f32_be("position")?;
        let y = self.f32_be("position")?;
        let z = self.f32_be("position")?;

        let aux = self.take_array::<AUX_LEN>("aux")?;
        let flags = self.u32_be("flags")?;
        let name_len = self.u32_be("name length")? as usize;
        let name = self.utf16_le(name_len)?;

        self.skip(POST_NAME_SKIP, "unused block after name")?;
        let star_type = self.u32_be("type")?;
        self.skip(POST_TYPE_SKIP, "unused block after type")?;
        let planet_count = self.u8("planet count")?;

        Ok(StarRecord {
            key,
            name,
            aux,
            flags,
            // World convention: Y grows downward on screen, so flip it once here.
            position: Vector3::new(x, -y, z),
            star_type,
            planet_count,
        })
    }
}

/// Decode exactly `count` records from an in-memory catalog.
///
/// Either every record decodes or the whole load fails; there is no partial
/// result. Bytes left over after the last record are ignored.
pub fn decode_catalog(data: &[u8], count: usize) -> Result<Vec<StarRecord>, FormatError> {
    let mut reader = RecordReader::new(data);
    let mut stars = Vec::with_capacity(count.min(data.len() / FIXED_RECORD_LEN + 1));
    for record in 0..count {
        reader.record = record;
        stars.push(reader.read_record()?);
    }
    if reader.remaining() > 0 {
        debug!(
            "{} trailing bytes after {} records were not decoded",
            reader.remaining(),
            count
        );
    }
    Ok(stars)
}

/// Read and decode a catalog file.
pub fn load_catalog_from_file<P: AsRef<Path>>(
    path: P,
    count: usize,
) -> Result<Vec<StarRecord>, CatalogError> {
    let path = path.as_ref();
    info!("Loading star catalog from {:?}", path);
    let data = std::fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stars = decode_catalog(&data, count)?;
    info!("Decoded {} stars ({} bytes)", stars.len(), data.len());
    Ok(stars)
}

/// Append the on-disk form of one record to `out`.
///
/// Unused regions are written as zeros and the Y axis is flipped back, so
/// `decode_catalog(&encode_catalog(s), s.len())` returns `s`.
pub fn encode_record(star: &StarRecord, out: &mut Vec<u8>) {
    let units: Vec<u16> = star.name.encode_utf16().collect();

    out.reserve(FIXED_RECORD_LEN + units.len() * 2);
    out.extend_from_slice(star.key.as_bytes());
    out.extend_from_slice(&[0u8; HEADER_SKIP]);
    out.extend_from_slice(&star.position.x.to_be_bytes());
    out.extend_from_slice(&(-star.position.y).to_be_bytes());
    out.extend_from_slice(&star.position.z.to_be_bytes());
    out.extend_from_slice(&star.aux);
    out.extend_from_slice(&star.flags.to_be_bytes());
    out.extend_from_slice(&(units.len() as u32).to_be_bytes());
    for unit in &units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out.extend_from_slice(&[0u8; POST_NAME_SKIP]);
    out.extend_from_slice(&star.star_type.to_be_bytes());
    out.extend_from_slice(&[0u8; POST_TYPE_SKIP]);
    out.push(star.planet_count);
}

/// Encode a full catalog in record order.
pub fn encode_catalog(stars: &[StarRecord]) -> Vec<u8> {
    let mut out = Vec::new();
    for star in stars {
        encode_record(star, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> StarRecord {
        StarRecord {
            key: StarKey([0xde, 0xad, 0x00, 0x01]),
            name: name.to_string(),
            aux: [1, 2, 3, 4],
            flags: 0x8000_0001,
            position: Vector3::new(12.5, -340.25, 7.0),
            star_type: 8,
            planet_count: 255,
        }
    }

    #[test]
    fn fixed_record_len_matches_layout() {
        assert_eq!(FIXED_RECORD_LEN, 237);
        let mut buf = Vec::new();
        encode_record(&sample("Sol"), &mut buf);
        assert_eq!(buf.len(), FIXED_RECORD_LEN + 6);
    }

    #[test]
    fn decodes_fields_at_fixed_offsets() {
        // Hand-built record, independent of encode_record.
        let mut buf = vec![0xAA, 0xBB, 0xCC, 0xDD];
        buf.extend(std::iter::repeat(0x55).take(132));
        buf.extend_from_slice(&1.5f32.to_be_bytes());
        buf.extend_from_slice(&2.0f32.to_be_bytes());
        buf.extend_from_slice(&(-3.0f32).to_be_bytes());
        buf.extend_from_slice(&[9, 8, 7, 6]);
        buf.extend_from_slice(&42u32.to_be_bytes());
        buf.extend_from_slice(&2u32.to_be_bytes());
        buf.extend_from_slice(&[b'S', 0, b'x', 0]);
        buf.extend(std::iter::repeat(0x11).take(20));
        buf.extend_from_slice(&12u32.to_be_bytes());
        buf.extend(std::iter::repeat(0x22).take(52));
        buf.push(4);

        let stars = decode_catalog(&buf, 1).unwrap();
        let s = &stars[0];
        assert_eq!(s.key, StarKey([0xAA, 0xBB, 0xCC, 0xDD]));
        assert_eq!(s.position, Vector3::new(1.5, -2.0, -3.0));
        assert_eq!(s.aux, [9, 8, 7, 6]);
        assert_eq!(s.flags, 42);
        assert_eq!(s.name, "Sx");
        assert_eq!(s.star_type, 12);
        assert_eq!(s.planet_count, 4);
    }

    #[test]
    fn name_roundtrip_ascii_and_non_ascii() {
        for name in ["", "Sol", "Galactic Core", "Ærøskøbing-7", "天狼星", "Star 🌟 Ω"] {
            let star = sample(name);
            let bytes = encode_catalog(std::slice::from_ref(&star));
            let decoded = decode_catalog(&bytes, 1).unwrap();
            assert_eq!(decoded[0].name, name);
            assert_eq!(decoded[0], star);
        }
    }

    #[test]
    fn name_byte_length_is_twice_code_units() {
        let star = sample("🌟a");
        let mut buf = Vec::new();
        encode_record(&star, &mut buf);
        let name_len = u32::from_be_bytes(buf[156..160].try_into().unwrap()) as usize;
        // Surrogate pair counts as two code units.
        assert_eq!(name_len, 3);
        assert_eq!(buf.len(), FIXED_RECORD_LEN + 2 * name_len);
    }

    #[test]
    fn truncation_anywhere_fails_whole_load() {
        let bytes = encode_catalog(&[sample("Sol"), sample("Treus-8")]);
        for cut in [0, 3, 100, 140, 158, 161, bytes.len() - 1] {
            let err = decode_catalog(&bytes[..cut], 2).unwrap_err();
            assert!(matches!(err, FormatError::Truncated { .. }), "cut {cut}: {err}");
        }
    }

    #[test]
    fn truncated_mid_name_reports_name_field() {
        let bytes = encode_catalog(&[sample("Galactic Core")]);
        let err = decode_catalog(&bytes[..165], 1).unwrap_err();
        match err {
            FormatError::Truncated {
                record,
                field,
                needed,
                ..
            } => {
                assert_eq!(record, 0);
                assert_eq!(field, "name");
                assert_eq!(needed, 26);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn huge_name_length_is_truncation_not_panic() {
        let mut bytes = encode_catalog(&[sample("Sol")]);
        bytes[156..160].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            decode_catalog(&bytes, 1),
            Err(FormatError::Truncated { field: "name", .. })
        ));
    }

    #[test]
    fn unpaired_surrogate_is_invalid_name() {
        let mut bytes = encode_catalog(&[sample("ab")]);
        // Replace the first code unit with a lone high surrogate.
        bytes[160..162].copy_from_slice(&0xD800u16.to_le_bytes());
        assert!(matches!(
            decode_catalog(&bytes, 1),
            Err(FormatError::InvalidName { record: 0, code_units: 2, .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = encode_catalog(&[sample("Sol")]);
        bytes.extend_from_slice(&[0xFF; 17]);
        assert_eq!(decode_catalog(&bytes, 1).unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_catalog_from_file("does/not/exist/stars.bin", 1).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
