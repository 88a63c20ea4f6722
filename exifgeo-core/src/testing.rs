//! Synthetic JPEG fixtures with hand-assembled EXIF/TIFF directories.
//!
//! The builder emits a minimal little-endian TIFF structure: IFD0 holds an
//! Orientation tag and, when GPS entries are requested, a GPSInfo pointer to
//! a GPS IFD. Values wider than four bytes go to a data area after the GPS
//! IFD.

use crate::gps::GpsField;

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;
const TYPE_SRATIONAL: u16 = 10;

const TAG_ORIENTATION: u16 = 0x0112;
const TAG_GPS_POINTER: u16 = 0x8825;

/// GPS altitude tag, handy for a GPS IFD without coordinates.
pub const TAG_GPS_ALTITUDE: u16 = 0x0006;

/// Raw value of one GPS IFD entry.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsValue {
    /// Bytes written as-is, including any NUL terminator.
    Ascii(Vec<u8>),
    Short(Vec<u16>),
    Rational(Vec<(u32, u32)>),
    SRational(Vec<(i32, i32)>),
}

impl GpsValue {
    /// NUL-terminated ASCII string.
    pub fn ascii(text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        Self::Ascii(bytes)
    }

    pub fn rationals(parts: [(u32, u32); 3]) -> Self {
        Self::Rational(parts.to_vec())
    }

    fn type_code(&self) -> u16 {
        match self {
            Self::Ascii(_) => TYPE_ASCII,
            Self::Short(_) => TYPE_SHORT,
            Self::Rational(_) => TYPE_RATIONAL,
            Self::SRational(_) => TYPE_SRATIONAL,
        }
    }

    fn count(&self) -> u32 {
        let count = match self {
            Self::Ascii(bytes) => bytes.len(),
            Self::Short(values) => values.len(),
            Self::Rational(values) => values.len(),
            Self::SRational(values) => values.len(),
        };
        count as u32
    }

    fn encode(&self) -> Vec<u8> {
        match self {
            Self::Ascii(bytes) => bytes.clone(),
            Self::Short(values) => {
                values.iter().flat_map(|v| v.to_le_bytes()).collect()
            }
            Self::Rational(values) => values
                .iter()
                .flat_map(|(num, den)| {
                    num.to_le_bytes().into_iter().chain(den.to_le_bytes())
                })
                .collect(),
            Self::SRational(values) => values
                .iter()
                .flat_map(|(num, den)| {
                    num.to_le_bytes().into_iter().chain(den.to_le_bytes())
                })
                .collect(),
        }
    }
}

/// Builds JPEG byte buffers with configurable EXIF GPS content.
#[derive(Debug, Clone)]
pub struct ExifJpegBuilder {
    include_exif: bool,
    force_gps_directory: bool,
    gps: Vec<(u16, GpsValue)>,
}

impl Default for ExifJpegBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExifJpegBuilder {
    pub fn new() -> Self {
        Self {
            include_exif: true,
            force_gps_directory: false,
            gps: Vec::new(),
        }
    }

    /// Emit a plain JFIF file without an APP1 EXIF segment.
    pub fn without_exif(mut self) -> Self {
        self.include_exif = false;
        self
    }

    /// Emit the GPS IFD pointer even when no GPS entries were added.
    pub fn with_empty_gps_directory(mut self) -> Self {
        self.force_gps_directory = true;
        self
    }

    pub fn latitude(self, dms: [(u32, u32); 3], reference: &str) -> Self {
        self.gps_entry(GpsField::LatitudeRef, GpsValue::ascii(reference))
            .gps_entry(GpsField::Latitude, GpsValue::rationals(dms))
    }

    pub fn longitude(self, dms: [(u32, u32); 3], reference: &str) -> Self {
        self.gps_entry(GpsField::LongitudeRef, GpsValue::ascii(reference))
            .gps_entry(GpsField::Longitude, GpsValue::rationals(dms))
    }

    pub fn gps_entry(self, field: GpsField, value: GpsValue) -> Self {
        self.gps_tag(field.tag().number(), value)
    }

    /// Add an arbitrary GPS IFD entry by tag number, replacing any earlier
    /// entry with the same number.
    pub fn gps_tag(mut self, tag: u16, value: GpsValue) -> Self {
        self.gps.retain(|(existing, _)| *existing != tag);
        self.gps.push((tag, value));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut jpeg = vec![0xFF, 0xD8];

        if self.include_exif {
            let tiff = self.build_tiff();
            let length = u16::try_from(2 + 6 + tiff.len())
                .expect("fixture EXIF segment fits in one APP1 marker");
            jpeg.extend_from_slice(&[0xFF, 0xE1]);
            jpeg.extend_from_slice(&length.to_be_bytes());
            jpeg.extend_from_slice(b"Exif\0\0");
            jpeg.extend_from_slice(&tiff);
        }

        // APP0 JFIF header
        jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        jpeg.extend_from_slice(b"JFIF\0");
        jpeg.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01]);
        jpeg.extend_from_slice(&[0x00, 0x00]);

        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }

    fn build_tiff(&self) -> Vec<u8> {
        let with_gps = self.force_gps_directory || !self.gps.is_empty();
        let ifd0_count: u32 = if with_gps { 2 } else { 1 };
        let gps_offset = 8 + ifd_size(ifd0_count);

        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II");
        tiff.extend_from_slice(&42u16.to_le_bytes());
        tiff.extend_from_slice(&8u32.to_le_bytes());

        tiff.extend_from_slice(&(ifd0_count as u16).to_le_bytes());
        write_entry(&mut tiff, TAG_ORIENTATION, TYPE_SHORT, 1, [1, 0, 0, 0]);
        if with_gps {
            write_entry(
                &mut tiff,
                TAG_GPS_POINTER,
                TYPE_LONG,
                1,
                gps_offset.to_le_bytes(),
            );
        }
        tiff.extend_from_slice(&0u32.to_le_bytes());

        if !with_gps {
            return tiff;
        }

        let mut entries = self.gps.clone();
        entries.sort_by_key(|(tag, _)| *tag);

        let gps_count = entries.len() as u32;
        let data_offset = gps_offset + ifd_size(gps_count);
        let mut data: Vec<u8> = Vec::new();

        tiff.extend_from_slice(&(gps_count as u16).to_le_bytes());
        for (tag, value) in &entries {
            let encoded = value.encode();
            let field = if encoded.len() <= 4 {
                let mut inline = [0u8; 4];
                inline[..encoded.len()].copy_from_slice(&encoded);
                inline
            } else {
                let offset = data_offset + data.len() as u32;
                data.extend_from_slice(&encoded);
                if data.len() % 2 == 1 {
                    data.push(0);
                }
                offset.to_le_bytes()
            };
            write_entry(&mut tiff, *tag, value.type_code(), value.count(), field);
        }
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend_from_slice(&data);
        tiff
    }
}

/// PNG signature followed by bytes that form no valid chunk.
pub fn corrupted_png() -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x13, 0x37]);
    bytes
}

fn ifd_size(entries: u32) -> u32 {
    2 + 12 * entries + 4
}

fn write_entry(
    out: &mut Vec<u8>,
    tag: u16,
    type_code: u16,
    count: u32,
    value: [u8; 4],
) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&type_code.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value);
}
