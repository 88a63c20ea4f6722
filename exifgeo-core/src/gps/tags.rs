use exif::{Context, Exif, In, Value};

use crate::error::{ExtractError, FieldError};

use super::types::{CoordinateRef, DmsValue, GpsField, RationalPair};

/// Reference used when GPSLatitudeRef is absent.
pub const DEFAULT_LATITUDE_REF: CoordinateRef = CoordinateRef::North;
/// Reference used when GPSLongitudeRef is absent.
pub const DEFAULT_LONGITUDE_REF: CoordinateRef = CoordinateRef::West;

/// Presence of one GPS field in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagState<T> {
    /// The tag is not in the GPS IFD.
    Missing,
    /// The tag exists but carries no value.
    Empty,
    /// The tag carries a value, decoded or not.
    Present(Result<T, FieldError>),
}

impl<T> TagState<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The decoded value, `None` when the tag carried nothing.
    pub fn decoded(self) -> Result<Option<T>, FieldError> {
        match self {
            Self::Present(value) => value.map(Some),
            Self::Missing | Self::Empty => Ok(None),
        }
    }
}

/// Typed view of the GPS IFD fields used for geolocation.
///
/// Built once from the parsed EXIF structure. Decoding failures stay inside
/// [`TagState::Present`] so [`GpsTags::resolve`] can report missing fields
/// before unreadable ones. It is also the only place defaults apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpsTags {
    pub latitude_ref: TagState<CoordinateRef>,
    pub latitude: TagState<DmsValue>,
    pub longitude_ref: TagState<CoordinateRef>,
    pub longitude: TagState<DmsValue>,
}

/// Both coordinate magnitudes with their effective references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGps {
    pub latitude: DmsValue,
    pub latitude_ref: CoordinateRef,
    pub longitude: DmsValue,
    pub longitude_ref: CoordinateRef,
}

impl GpsTags {
    pub fn from_exif(exif: &Exif) -> Result<Self, ExtractError> {
        if !has_gps_directory(exif) {
            return Err(ExtractError::NoGpsData);
        }

        Ok(Self {
            latitude_ref: read_reference(exif, GpsField::LatitudeRef),
            latitude: read_dms(exif, GpsField::Latitude),
            longitude_ref: read_reference(exif, GpsField::LongitudeRef),
            longitude: read_dms(exif, GpsField::Longitude),
        })
    }

    /// Apply reference defaults and require both magnitudes.
    ///
    /// A missing reference falls back to N/W, but a missing or empty
    /// magnitude, or a reference that is present but empty, is
    /// [`ExtractError::IncompleteGpsData`]. Completeness is checked before
    /// any decoding failure is surfaced as
    /// [`ExtractError::MalformedExifData`].
    pub fn resolve(self) -> Result<ResolvedGps, ExtractError> {
        let complete = self.latitude.is_present()
            && self.longitude.is_present()
            && !self.latitude_ref.is_empty()
            && !self.longitude_ref.is_empty();
        if !complete {
            return Err(ExtractError::IncompleteGpsData);
        }

        let latitude = self.latitude.decoded()?;
        let latitude_ref =
            self.latitude_ref.decoded()?.unwrap_or(DEFAULT_LATITUDE_REF);
        let longitude = self.longitude.decoded()?;
        let longitude_ref =
            self.longitude_ref.decoded()?.unwrap_or(DEFAULT_LONGITUDE_REF);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(ExtractError::IncompleteGpsData);
        };

        Ok(ResolvedGps {
            latitude,
            latitude_ref,
            longitude,
            longitude_ref,
        })
    }
}

fn has_gps_directory(exif: &Exif) -> bool {
    exif.fields().any(|field| {
        field.ifd_num == In::PRIMARY && field.tag.context() == Context::Gps
    })
}

fn read_dms(exif: &Exif, field: GpsField) -> TagState<DmsValue> {
    let Some(entry) = exif.get_field(field.tag(), In::PRIMARY) else {
        return TagState::Missing;
    };

    let pairs: Vec<RationalPair> = match &entry.value {
        Value::Rational(values) => {
            values.iter().copied().map(RationalPair::from).collect()
        }
        // Some writers emit signed rationals for GPS magnitudes.
        Value::SRational(values) => {
            values.iter().copied().map(RationalPair::from).collect()
        }
        other => {
            return TagState::Present(Err(FieldError::UnexpectedType {
                field,
                found: value_kind(other),
            }));
        }
    };

    match pairs.as_slice() {
        [] => TagState::Empty,
        [degrees, minutes, seconds] => TagState::Present(Ok(DmsValue::new(
            *degrees, *minutes, *seconds,
        ))),
        _ => TagState::Present(Err(FieldError::ComponentCount {
            field,
            found: pairs.len(),
        })),
    }
}

fn read_reference(exif: &Exif, field: GpsField) -> TagState<CoordinateRef> {
    let Some(entry) = exif.get_field(field.tag(), In::PRIMARY) else {
        return TagState::Missing;
    };

    let Value::Ascii(strings) = &entry.value else {
        return TagState::Present(Err(FieldError::UnexpectedType {
            field,
            found: value_kind(&entry.value),
        }));
    };

    let text = strings.first().map(|s| s.trim_ascii()).unwrap_or_default();
    match text {
        [] => TagState::Empty,
        [byte] => TagState::Present(
            CoordinateRef::from_ascii(*byte)
                .ok_or_else(|| unrecognized(field, text)),
        ),
        _ => TagState::Present(Err(unrecognized(field, text))),
    }
}

fn unrecognized(field: GpsField, text: &[u8]) -> FieldError {
    FieldError::UnrecognizedRef {
        field,
        value: String::from_utf8_lossy(text).into_owned(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Byte(_) => "BYTE",
        Value::Ascii(_) => "ASCII",
        Value::Short(_) => "SHORT",
        Value::Long(_) => "LONG",
        Value::Rational(_) => "RATIONAL",
        Value::SByte(_) => "SBYTE",
        Value::Undefined(..) => "UNDEFINED",
        Value::SShort(_) => "SSHORT",
        Value::SLong(_) => "SLONG",
        Value::SRational(_) => "SRATIONAL",
        Value::Float(_) => "FLOAT",
        Value::Double(_) => "DOUBLE",
        _ => "UNKNOWN",
    }
}
