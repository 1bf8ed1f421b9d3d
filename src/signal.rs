//! Pick signals brought onto the regular sample grid and corrected.

use crate::error::{Error, Result};
use crate::interp::surface_range;
use crate::params::Params;
use crate::readers::{GeoLoss, ProductReader};
use log::{debug, trace};

/// Offset added when calibration is requested. No calibration is available yet.
pub const CALIBRATION_OFFSET: f64 = 0.0;

/// Corrections applied by [`signal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalOptions {
    /// Multiplier applied to the raw pick values.
    pub scale: f64,
    /// Add [`CALIBRATION_OFFSET`].
    pub calib: bool,
    /// Remove the two-way geometric spreading loss, in dB.
    pub air_loss: bool,
    /// Manual gain, in dB.
    pub gain: f64,
}

impl Default for SignalOptions {
    fn default() -> Self {
        Self {
            scale: 1.0 / 1000.0,
            calib: true,
            air_loss: true,
            gain: 0.0,
        }
    }
}

/// Extract a pick's signal for a PST and apply the requested corrections.
///
/// The pick is padded with `NaN` up to the length of the surface-range reference, so
/// the output always has one value per reference time.
///
/// # Errors
///
/// Reader failures, and [`Error::PikTooLong`] when the pick has more samples than the
/// surface-range reference.
pub fn signal<R, L>(
    params: &Params,
    reader: &R,
    loss: &L,
    pst: &str,
    pik: &str,
    opts: &SignalOptions,
) -> Result<Vec<f64>>
where
    R: ProductReader + ?Sized,
    L: GeoLoss + ?Sized,
{
    let raw = reader.pik(pst, pik)?.value;
    let h = surface_range(params, reader, pst)?;

    if raw.len() > h.len() {
        return Err(Error::PikTooLong {
            pst: pst.to_string(),
            pik: pik.to_string(),
            pik_len: raw.len(),
            range_len: h.len(),
        });
    }
    debug!("{pst} {pik}: padding {} samples to {}", raw.len(), h.len());

    let offset = if opts.calib { CALIBRATION_OFFSET } else { 0.0 };
    let mut val: Vec<f64> = raw
        .iter()
        .map(|v| v * opts.scale + offset)
        .chain(std::iter::repeat(f64::NAN))
        .take(h.len())
        .collect();

    if opts.air_loss {
        let round_trip: Vec<f64> = h.iter().map(|r| 2.0 * r).collect();
        let loss_db = loss.geo_loss(&round_trip).into_iter().map(|l| 10.0 * l.log10());
        for (v, l) in val.iter_mut().zip(loss_db) {
            *v += opts.gain - l;
        }
        trace!("{pst} {pik}: air loss removed");
    } else {
        for v in &mut val {
            *v += opts.gain;
        }
    }
    Ok(val)
}

/// Surface coherent reflectance from a pick. Not implemented yet.
///
/// # Errors
///
/// Always [`Error::NotImplemented`].
pub fn rsc<R: ProductReader + ?Sized>(
    _params: &Params,
    _reader: &R,
    _pst: &str,
    _pik: &str,
) -> Result<Vec<f64>> {
    Err(Error::NotImplemented("rsc"))
}

/// Surface incoherent reflectance from a pick. Not implemented yet.
///
/// # Errors
///
/// Always [`Error::NotImplemented`].
pub fn rsn<R: ProductReader + ?Sized>(
    _params: &Params,
    _reader: &R,
    _pst: &str,
    _pik: &str,
) -> Result<Vec<f64>> {
    Err(Error::NotImplemented("rsn"))
}
