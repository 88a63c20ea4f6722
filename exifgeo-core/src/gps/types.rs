use std::fmt;

use serde::Serialize;

/// One EXIF rational value.
///
/// Wide enough to hold both the unsigned RATIONAL and the signed SRATIONAL
/// encodings without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalPair {
    pub numerator: i64,
    pub denominator: i64,
}

impl RationalPair {
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Floating point value, or `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        if self.denominator == 0 {
            return None;
        }
        Some(self.numerator as f64 / self.denominator as f64)
    }
}

impl From<exif::Rational> for RationalPair {
    fn from(value: exif::Rational) -> Self {
        Self::new(value.num.into(), value.denom.into())
    }
}

impl From<exif::SRational> for RationalPair {
    fn from(value: exif::SRational) -> Self {
        Self::new(value.num.into(), value.denom.into())
    }
}

/// Degrees, minutes and seconds of one coordinate, before the sign is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmsValue {
    pub degrees: RationalPair,
    pub minutes: RationalPair,
    pub seconds: RationalPair,
}

impl DmsValue {
    pub const fn new(
        degrees: RationalPair,
        minutes: RationalPair,
        seconds: RationalPair,
    ) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    pub(crate) fn components(&self) -> [(DmsComponent, RationalPair); 3] {
        [
            (DmsComponent::Degrees, self.degrees),
            (DmsComponent::Minutes, self.minutes),
            (DmsComponent::Seconds, self.seconds),
        ]
    }
}

/// Hemisphere reference of a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateRef {
    North,
    South,
    East,
    West,
}

impl CoordinateRef {
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'N' => Some(Self::North),
            b'S' => Some(Self::South),
            b'E' => Some(Self::East),
            b'W' => Some(Self::West),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }

    /// South and West are negative.
    pub fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }
}

impl fmt::Display for CoordinateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The four GPS IFD fields read by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpsField {
    LatitudeRef,
    Latitude,
    LongitudeRef,
    Longitude,
}

impl GpsField {
    pub fn tag(self) -> exif::Tag {
        match self {
            Self::LatitudeRef => exif::Tag::GPSLatitudeRef,
            Self::Latitude => exif::Tag::GPSLatitude,
            Self::LongitudeRef => exif::Tag::GPSLongitudeRef,
            Self::Longitude => exif::Tag::GPSLongitude,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::LatitudeRef => "GPSLatitudeRef",
            Self::Latitude => "GPSLatitude",
            Self::LongitudeRef => "GPSLongitudeRef",
            Self::Longitude => "GPSLongitude",
        }
    }
}

impl fmt::Display for GpsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmsComponent {
    Degrees,
    Minutes,
    Seconds,
}

impl fmt::Display for DmsComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Degrees => "degrees",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        })
    }
}

/// Decoded location returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsResult {
    pub latitude: f64,
    pub longitude: f64,
    pub map_link: String,
}
