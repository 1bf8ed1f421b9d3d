#![warn(missing_docs)]

//! Path conventions, product listings and pick-signal corrections for radar sounding
//! data organised by season and PST.
//!
//! Everything starts from a [`Params`], derived from a code directory sitting at
//! `<root>/code/<any>/<season>/RSR/<process>`:
//!
//! ```rust
//! use icecap_get::Params;
//!
//! let p = Params::from_code_path("/disk/kea/WAIS/code/xtra/ICP5/RSR/pik1").unwrap();
//! assert_eq!(p.season, "ICP5");
//! assert_eq!(p.pik_path.to_str(), Some("/disk/kea/WAIS/orig/xtra/ICP5/PIK/pik1"));
//! ```
//!
//! Reading normalized channels, picks and ztim references is left to a
//! [`ProductReader`] implementation.

pub mod dbase;
pub mod error;
pub mod interp;
pub mod params;
pub mod products;
pub mod readers;
pub mod signal;

pub use dbase::{flight, pst, read_table, PstRecord};
pub use error::{Error, Result};
pub use interp::{aux_channel, interp, latitude, longitude, roll, surface_range, AuxChannel};
pub use params::Params;
pub use products::{cmp, pik, MetaFilter};
pub use readers::{Channel, FlatSurfaceLoss, GeoLoss, ProductReader};
pub use signal::{rsc, rsn, signal, SignalOptions, CALIBRATION_OFFSET};
