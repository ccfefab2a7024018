//! CSV export of decoded star records.
//!
//! One header line `key,name,unk,flags,position,type,planet_count`, then one
//! row per record. The position column spans three fields (x, y, z), so data
//! rows have nine fields against the header's seven; the writer is flexible
//! for that reason. Key and aux bytes are written as lowercase hex.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::StarRecord;

const HEADER: [&str; 7] = ["key", "name", "unk", "flags", "position", "type", "planet_count"];

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn row(star: &StarRecord) -> [String; 9] {
    [
        star.key.to_string(),
        star.name.clone(),
        hex(&star.aux),
        star.flags.to_string(),
        star.position.x.to_string(),
        star.position.y.to_string(),
        star.position.z.to_string(),
        star.star_type.to_string(),
        star.planet_count.to_string(),
    ]
}

/// Write the header and one row per star to `writer`.
pub fn write_stars_csv<W: Write>(stars: &[StarRecord], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(HEADER)?;
    for star in stars {
        wtr.write_record(row(star))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the CSV export to a file, replacing it if it exists.
pub fn write_stars_csv_to_file<P: AsRef<Path>>(stars: &[StarRecord], path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file {:?}", path))?;
    write_stars_csv(stars, std::io::BufWriter::new(file))
        .with_context(|| format!("Failed to write CSV file {:?}", path))?;
    info!("Exported {} stars to {:?}", stars.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StarKey, Vector3};

    fn star(name: &str) -> StarRecord {
        StarRecord {
            key: StarKey([0x01, 0x02, 0xab, 0xcd]),
            name: name.to_string(),
            aux: [0, 0, 0, 0x10],
            flags: 7,
            position: Vector3::new(1.5, -2.0, 0.25),
            star_type: 10,
            planet_count: 3,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut out = Vec::new();
        write_stars_csv(&[star("Sol"), star("Treus-8")], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "key,name,unk,flags,position,type,planet_count");
        assert_eq!(lines[1], "0102abcd,Sol,00000010,7,1.5,-2,0.25,10,3");
        assert_eq!(lines[2].split(',').count(), 9);
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let mut out = Vec::new();
        write_stars_csv(&[star("Alpha, Prime")], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("0102abcd,\"Alpha, Prime\","));
    }

    #[test]
    fn empty_catalog_is_header_only() {
        let mut out = Vec::new();
        write_stars_csv(&[], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "key,name,unk,flags,position,type,planet_count\n"
        );
    }
}
