//! Contracts for the data readers and radar utilities this crate builds on.

use std::collections::HashMap;
use std::path::Path;

/// Paired along-track samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channel {
    /// Sample times
    pub time: Vec<f64>,
    /// One value per sample time
    pub value: Vec<f64>,
}

impl Channel {
    /// Pair up sample times and values.
    pub fn new(time: Vec<f64>, value: Vec<f64>) -> Self {
        Self { time, value }
    }
}

/// Source of normalized channels, picks and time references for a PST.
pub trait ProductReader {
    /// A normalized auxiliary channel, e.g. `("AVN", "lat_ang")`.
    fn norm(
        &self,
        pst: &str,
        instrument: &str,
        channel: &str,
        interp: bool,
    ) -> anyhow::Result<Channel>;

    /// Values of a named pick.
    fn pik(&self, pst: &str, pik: &str) -> anyhow::Result<Channel>;

    /// A ztim time reference, keyed by field name (`htim` is the one used here).
    fn ztim(&self, path: &Path) -> anyhow::Result<HashMap<String, Vec<f64>>>;
}

/// Linear power loss over a round-trip range.
pub trait GeoLoss {
    /// Linear loss for each round-trip range.
    fn geo_loss(&self, round_trip: &[f64]) -> Vec<f64>;
}

/// Spherical spreading off a flat specular surface: by image theory the echo has
/// travelled the round-trip path `r`, so the loss is `1 / r^2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatSurfaceLoss;

impl GeoLoss for FlatSurfaceLoss {
    fn geo_loss(&self, round_trip: &[f64]) -> Vec<f64> {
        round_trip.iter().map(|r| r.powi(-2)).collect()
    }
}
