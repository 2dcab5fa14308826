//! Potentiometer dial that selects a decade
//!
//! [`DecadeBins`] splits the reader's value range into one equal-width bin
//! per label. Intervals are right-open: a reading equal to a boundary
//! belongs to the higher bin.

use tracing::debug;

use crate::adc::AnalogReader;
use crate::error::{ControlError, Result};

/// ADC channel the potentiometer is wired to
pub const DIAL_CHANNEL: u8 = 0;

/// Equal-width bins over `[0, value_range]`, one per label
#[derive(Debug, Clone, PartialEq)]
pub struct DecadeBins {
    labels: Vec<String>,
    boundaries: Vec<f64>,
}

impl DecadeBins {
    /// Build bins for `labels`, in order, over `[0, value_range]`
    pub fn new<I, S>(labels: I, value_range: u8) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ControlError::NoLabels);
        }
        if value_range == 0 {
            return Err(ControlError::EmptyRange);
        }

        let width = f64::from(value_range) / labels.len() as f64;
        let boundaries = (1..labels.len()).map(|i| width * i as f64).collect();

        Ok(Self { labels, boundaries })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The N-1 thresholds between consecutive bins
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Index of the bin `value` falls in
    pub fn bin_index(&self, value: f64) -> usize {
        self.boundaries
            .partition_point(|&boundary| boundary <= value)
            .min(self.labels.len() - 1)
    }

    /// Label for a raw reading
    pub fn classify(&self, raw: u8) -> &str {
        &self.labels[self.bin_index(f64::from(raw))]
    }
}

/// A potentiometer on an analog reader, read as a decade label
#[derive(Debug)]
pub struct DecadesDial<R: AnalogReader> {
    reader: R,
    channel: u8,
    bins: DecadeBins,
}

impl<R: AnalogReader> DecadesDial<R> {
    /// Create a dial over `labels` using the reader's full value range
    pub fn new<I, S>(reader: R, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bins = DecadeBins::new(labels, reader.value_range())?;
        Ok(Self {
            reader,
            channel: DIAL_CHANNEL,
            bins,
        })
    }

    /// Read the potentiometer on a different channel
    pub fn on_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Sample the potentiometer and return the decade it points at
    pub fn read_decade(&mut self) -> Result<&str> {
        let raw = self.reader.read_channel(self.channel)?;
        let decade = self.bins.classify(raw);
        debug!(raw, decade, "Dial position");
        Ok(decade)
    }

    pub fn bins(&self) -> &DecadeBins {
        &self.bins
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}
