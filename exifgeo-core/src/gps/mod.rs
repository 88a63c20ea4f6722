//! GPS coordinate extraction from JPEG EXIF metadata.

mod convert;
mod extract;
mod tags;
mod types;

pub use convert::{MAP_LINK_BASE, dms_to_decimal, map_link};
pub use extract::extract_gps;
pub use tags::{
    DEFAULT_LATITUDE_REF, DEFAULT_LONGITUDE_REF, GpsTags, ResolvedGps, TagState,
};
pub use types::{
    CoordinateRef, DmsComponent, DmsValue, GpsField, GpsResult, RationalPair,
};
