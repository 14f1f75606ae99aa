#![deny(missing_docs)]
//! Georeference raster images onto a map plane from ground control points.
//!
//! The workspace splits into three layers re-exported here: raster buffer
//! types ([`raster`]), affine estimation from correspondences
//! ([`transform`]) and the viewport warper ([`warp`]). On top of them this
//! crate owns the [`session::GeorefSession`] aggregate that keeps the
//! current transform, footprint and correspondence set of one georeferenced
//! image consistent through interactive edits.

#[doc(inline)]
pub use georef_raster as raster;

#[doc(inline)]
pub use georef_transform as transform;

#[doc(inline)]
pub use georef_warp as warp;

/// The owning session aggregate and its staleness protocol.
pub mod session;

pub use crate::session::{GeorefSession, SessionError, WarpOutput};
