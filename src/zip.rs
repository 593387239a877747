//! A minimal ZIP writer for exporting portfolio data.
//!
//! Entries are stored without compression; the archive is a sequence of local file
//! headers with their data, followed by the central directory and the end of central
//! directory record.

use crate::content_model::{Language, ResumeContent};
use crate::{CvError, Result};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};

const LOCAL_FILE_HEADER: u32 = 0x04034b50;
const CENTRAL_DIRECTORY_HEADER: u32 = 0x02014b50;
const END_OF_CENTRAL_DIRECTORY: u32 = 0x06054b50;
/// 2.0: the minimum for plain stored files
const VERSION: u16 = 20;
/// General purpose flag: file names are UTF-8
const UTF8_NAMES: u16 = 1 << 11;
const STORED: u16 = 0;

const WATERMARK: &str = "PortalioPresentacion2025 dev build";

const CRC32_TABLE: [u32; 256] = crc32_table();

const fn crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut bit = 0;
        while bit < 8 {
            c = if c & 1 != 0 {
                0xedb88320 ^ (c >> 1)
            } else {
                c >> 1
            };
            bit += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

/// CRC-32 (IEEE) checksum of `data`, as used by ZIP
pub fn crc32(data: &[u8]) -> u32 {
    let crc = data.iter().fold(0xffffffff_u32, |crc, byte| {
        CRC32_TABLE[((crc ^ *byte as u32) & 0xff) as usize] ^ (crc >> 8)
    });
    crc ^ 0xffffffff
}

/// MS-DOS (date, time) fields. Times before 1980 can't be represented and are
/// clamped to its start.
fn dos_date_time(timestamp: NaiveDateTime) -> (u16, u16) {
    if timestamp.year() < 1980 {
        return ((1 << 5) | 1, 0);
    }
    let date = ((timestamp.year() - 1980) as u16) << 9
        | (timestamp.month() as u16) << 5
        | timestamp.day() as u16;
    let time = (timestamp.hour() as u16) << 11
        | (timestamp.minute() as u16) << 5
        | (timestamp.second() / 2) as u16;
    (date, time)
}

/// A file to put into an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    pub name: String,
    pub content: Vec<u8>,
}

impl ZipEntry {
    pub fn new<N: Into<String>, C: Into<Vec<u8>>>(name: N, content: C) -> ZipEntry {
        ZipEntry {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Archive `entries`, stamped with the current local time
pub fn create_zip(entries: &[ZipEntry]) -> Result<Vec<u8>> {
    create_zip_at(entries, Local::now().naive_local())
}

/// Archive `entries` with every file stamped `timestamp`
pub fn create_zip_at(entries: &[ZipEntry], timestamp: NaiveDateTime) -> Result<Vec<u8>> {
    let count = u16::try_from(entries.len())
        .map_err(|_| CvError::ZipLimit(format!("{} entries", entries.len())))?;
    let (date, time) = dos_date_time(timestamp);

    let mut out: Vec<u8> = Vec::new();
    let mut central: Vec<u8> = Vec::new();

    for entry in entries {
        let name = entry.name.as_bytes();
        let name_len = u16::try_from(name.len())
            .map_err(|_| CvError::ZipLimit(format!("name of {:?} is too long", entry.name)))?;
        let size = u32::try_from(entry.content.len())
            .map_err(|_| CvError::ZipLimit(format!("{:?} is too large", entry.name)))?;
        let offset = u32::try_from(out.len())
            .map_err(|_| CvError::ZipLimit("archive is too large".to_string()))?;
        let flags = if entry.name.is_ascii() { 0 } else { UTF8_NAMES };
        let crc = crc32(&entry.content);

        put_u32(&mut out, LOCAL_FILE_HEADER);
        put_u16(&mut out, VERSION);
        put_u16(&mut out, flags);
        put_u16(&mut out, STORED);
        put_u16(&mut out, time);
        put_u16(&mut out, date);
        put_u32(&mut out, crc);
        put_u32(&mut out, size); // compressed
        put_u32(&mut out, size); // uncompressed
        put_u16(&mut out, name_len);
        put_u16(&mut out, 0); // extra field
        out.extend_from_slice(name);
        out.extend_from_slice(&entry.content);

        put_u32(&mut central, CENTRAL_DIRECTORY_HEADER);
        put_u16(&mut central, VERSION); // made by
        put_u16(&mut central, VERSION); // needed to extract
        put_u16(&mut central, flags);
        put_u16(&mut central, STORED);
        put_u16(&mut central, time);
        put_u16(&mut central, date);
        put_u32(&mut central, crc);
        put_u32(&mut central, size);
        put_u32(&mut central, size);
        put_u16(&mut central, name_len);
        put_u16(&mut central, 0); // extra field
        put_u16(&mut central, 0); // comment
        put_u16(&mut central, 0); // disk number
        put_u16(&mut central, 0); // internal attributes
        put_u32(&mut central, 0); // external attributes
        put_u32(&mut central, offset);
        central.extend_from_slice(name);
    }

    let central_offset = u32::try_from(out.len())
        .map_err(|_| CvError::ZipLimit("archive is too large".to_string()))?;
    let central_size = u32::try_from(central.len())
        .map_err(|_| CvError::ZipLimit("central directory is too large".to_string()))?;
    out.extend_from_slice(&central);

    put_u32(&mut out, END_OF_CENTRAL_DIRECTORY);
    put_u16(&mut out, 0); // this disk
    put_u16(&mut out, 0); // disk with the central directory
    put_u16(&mut out, count);
    put_u16(&mut out, count);
    put_u32(&mut out, central_size);
    put_u32(&mut out, central_offset);
    put_u16(&mut out, 0); // comment

    log::debug!("zipped {} entries into {} bytes", entries.len(), out.len());
    Ok(out)
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Bundle `content` as `portfolio.json` next to a build watermark, returning the
/// archive's file name (`portfolio-<lang>.zip`) and bytes
pub fn export_portfolio_bundle(
    content: &ResumeContent,
    language: Language,
) -> Result<(String, Vec<u8>)> {
    let json = serde_json::to_string_pretty(content)?;
    let bytes = create_zip(&[
        ZipEntry::new("portfolio.json", json),
        ZipEntry::new("watermark.txt", WATERMARK),
    ])?;
    Ok((format!("portfolio-{}.zip", language.code()), bytes))
}
