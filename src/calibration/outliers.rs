//! Per-bucket outlier rejection.
//!
//! Each bucket holds the samples taken while the user looked at one
//! target. Samples far from the bucket mean on any feature channel are
//! discarded and the rest are averaged into a single representative.

use super::{features::GazeFeatures, CalibrationSample};
use crate::constants::OUTLIER_SIGMA;

/// Mean and population standard deviation of one feature channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStatistics {
    /// Mean value of the channel
    pub mean: f64,
    /// Population standard deviation of the channel
    pub std_dev: f64,
}

impl ChannelStatistics {
    /// Calculate statistics for a non-empty set of values
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // sample counts are small
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// True if `value` lies within `sigmas` standard deviations of the mean
    #[must_use]
    pub fn contains(&self, value: f64, sigmas: f64) -> bool {
        (value - self.mean).abs() <= sigmas * self.std_dev
    }
}

/// Collapse a bucket to one sample.
///
/// Samples more than `OUTLIER_SIGMA` standard deviations from the mean on
/// any channel are dropped; the survivors' features are averaged and the
/// screen point and pupil position are taken from the first survivor.
/// A single-sample bucket has zero spread and always survives. Returns
/// `None` when nothing survives.
#[must_use]
pub fn representative_sample(samples: &[CalibrationSample]) -> Option<CalibrationSample> {
    let stats = channel_statistics(samples)?;

    let retained: Vec<&CalibrationSample> = samples
        .iter()
        .filter(|sample| {
            sample
                .features
                .to_array()
                .iter()
                .zip(stats.iter())
                .all(|(&value, channel)| channel.contains(value, OUTLIER_SIGMA))
        })
        .collect();

    let first = retained.first()?;
    let features = GazeFeatures::mean(retained.iter().map(|s| s.features))?;

    Some(CalibrationSample {
        screen: first.screen,
        features,
        pupil: first.pupil,
    })
}

fn channel_statistics(samples: &[CalibrationSample]) -> Option<[ChannelStatistics; GazeFeatures::CHANNELS]> {
    let columns: Vec<[f64; GazeFeatures::CHANNELS]> = samples.iter().map(|s| s.features.to_array()).collect();
    let channel = |c: usize| {
        let values: Vec<f64> = columns.iter().map(|row| row[c]).collect();
        ChannelStatistics::from_values(&values)
    };

    Some([channel(0)?, channel(1)?, channel(2)?])
}
