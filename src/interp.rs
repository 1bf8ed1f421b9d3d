//! Auxiliary channels resampled onto the focused-image time axis.

use crate::error::{Error, Result};
use crate::params::Params;
use crate::readers::ProductReader;
use log::trace;

/// Piecewise-linear interpolation of `(xp, fp)` at `x`.
///
/// `xp` should be increasing. Points before `xp[0]` or after the last abscissa take the
/// boundary value, and `NaN` stays `NaN`. Unsorted `xp` gives meaningless values but
/// never panics.
///
/// # Errors
///
/// [`Error::Interpolation`] when `xp` is empty, holds a `NaN`, or differs in length
/// from `fp`.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Result<Vec<f64>> {
    if xp.len() != fp.len() {
        return Err(Error::Interpolation(format!(
            "{} abscissae for {} values",
            xp.len(),
            fp.len()
        )));
    }
    if let Some(i) = xp.iter().position(|v| v.is_nan()) {
        return Err(Error::Interpolation(format!("abscissa {i} is NaN")));
    }
    let (Some(&x_first), Some(&x_last)) = (xp.first(), xp.last()) else {
        return Err(Error::Interpolation("no samples".into()));
    };
    let last = xp.len() - 1;

    Ok(x.iter()
        .map(|&xi| {
            if xi.is_nan() {
                f64::NAN
            } else if xi <= x_first {
                fp[0]
            } else if xi >= x_last {
                fp[last]
            } else {
                // xp[hi - 1] <= xi < xp[hi] when sorted
                let hi = xp.partition_point(|&v| v <= xi).clamp(1, last);
                let lo = hi - 1;
                let slope = (fp[hi] - fp[lo]) / (xp[hi] - xp[lo]);
                fp[lo] + slope * (xi - xp[lo])
            }
        })
        .collect())
}

/// Normalized channels that can be put on the focused time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxChannel {
    /// Laser range to the surface, `LAS/las_rng`
    SurfaceRange,
    /// `AVN/lon_ang`
    Longitude,
    /// `AVN/lat_ang`
    Latitude,
    /// Aircraft roll, `AVN/roll_ang`
    Roll,
}

impl AuxChannel {
    /// `(instrument, channel)` names in the normalized tree.
    pub fn source(self) -> (&'static str, &'static str) {
        match self {
            AuxChannel::SurfaceRange => ("LAS", "las_rng"),
            AuxChannel::Longitude => ("AVN", "lon_ang"),
            AuxChannel::Latitude => ("AVN", "lat_ang"),
            AuxChannel::Roll => ("AVN", "roll_ang"),
        }
    }
}

/// An auxiliary channel interpolated along the PST's focused time reference.
///
/// # Errors
///
/// Reader failures, a time reference without `htim`, or unusable channel arrays.
pub fn aux_channel<R: ProductReader + ?Sized>(
    params: &Params,
    reader: &R,
    pst: &str,
    aux: AuxChannel,
) -> Result<Vec<f64>> {
    let (instrument, name) = aux.source();
    let channel = reader.norm(pst, instrument, name, true)?;

    let ztim = params.ztim_path(pst);
    let mut fields = reader.ztim(&ztim)?;
    let tref = fields.remove("htim").ok_or(Error::MissingField {
        path: ztim,
        field: "htim",
    })?;
    trace!(
        "{pst}: {instrument}/{name} {} samples onto {} reference times",
        channel.time.len(),
        tref.len()
    );
    interp(&tref, &channel.time, &channel.value)
}

/// Range to the surface along the focused time reference.
pub fn surface_range<R: ProductReader + ?Sized>(
    params: &Params,
    reader: &R,
    pst: &str,
) -> Result<Vec<f64>> {
    aux_channel(params, reader, pst, AuxChannel::SurfaceRange)
}

/// Longitude along the focused time reference.
pub fn longitude<R: ProductReader + ?Sized>(
    params: &Params,
    reader: &R,
    pst: &str,
) -> Result<Vec<f64>> {
    aux_channel(params, reader, pst, AuxChannel::Longitude)
}

/// Latitude along the focused time reference.
pub fn latitude<R: ProductReader + ?Sized>(
    params: &Params,
    reader: &R,
    pst: &str,
) -> Result<Vec<f64>> {
    aux_channel(params, reader, pst, AuxChannel::Latitude)
}

/// Roll angle along the focused time reference.
pub fn roll<R: ProductReader + ?Sized>(params: &Params, reader: &R, pst: &str) -> Result<Vec<f64>> {
    aux_channel(params, reader, pst, AuxChannel::Roll)
}
