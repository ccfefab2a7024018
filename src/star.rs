use std::fmt;

use crate::palette::StarClass;
use crate::Vector3;

/// Opaque 4-byte record identifier.
///
/// Kept as raw bytes exactly as stored in the catalog. It is never converted
/// to an integer, so no byte order is ever applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StarKey(pub [u8; 4]);

impl StarKey {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for StarKey {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

/// Lowercase hex, byte by byte in stored order.
impl fmt::Display for StarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

fn write_hex(f: &mut impl fmt::Write, bytes: &[u8]) -> fmt::Result {
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

/// One decoded star entry from the binary catalog.
///
/// Records are immutable after load. The `position` Y axis is already
/// sign-inverted relative to the value stored in the file, which is the
/// world-coordinate convention used for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    pub key: StarKey,
    pub name: String,
    /// Opaque field of unknown meaning, preserved verbatim.
    pub aux: [u8; 4],
    pub flags: u32,
    pub position: Vector3,
    /// Raw type code; see [`StarClass`] for the known values.
    pub star_type: u32,
    pub planet_count: u8,
}

impl StarRecord {
    /// Known classification for the type code, if any.
    pub fn class(&self) -> Option<StarClass> {
        StarClass::from_code(self.star_type)
    }

    /// `true` for the six binary-pair type codes.
    pub fn is_binary(&self) -> bool {
        self.class().is_some_and(|c| c.is_binary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_is_stored_byte_order() {
        let key = StarKey([0x00, 0x1a, 0xff, 0x07]);
        assert_eq!(key.to_string(), "001aff07");
    }

    #[test]
    fn binary_detection_follows_type_code() {
        let mut star = StarRecord {
            key: StarKey::default(),
            name: "Treus-8".into(),
            aux: [0; 4],
            flags: 0,
            position: Vector3::zeros(),
            star_type: 9,
            planet_count: 3,
        };
        assert!(star.is_binary());
        star.star_type = 4;
        assert!(!star.is_binary());
        star.star_type = 99;
        assert!(star.class().is_none());
        assert!(!star.is_binary());
    }
}
