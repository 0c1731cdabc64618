//! Run data model: named per-pixel channels in acquisition order.
//!
//! A [`RunData`] holds the raw sequences of one scan acquisition. Scalar
//! channels store one value per pixel, vector channels one fixed-length
//! record per pixel (e.g. a fluorescence spectrum). Channels are columnar
//! and indexed by acquisition order; the reconstruction never mutates them.

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::{Error, Result};

/// Acquisition timestamp parsed from a run group name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl RunTimestamp {
    /// Renders the timestamp in the `YYYY-MM-DD_HH-MM-SS` form used for
    /// output file names.
    #[must_use]
    pub fn file_stamp(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Identity of a run group, parsed from names of the form
/// `RunYYYYMMDD HHMMSS <sample>`.
///
/// Names that do not follow the acquisition convention are kept verbatim;
/// `sample` and `timestamp` are then absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunName {
    raw: String,
    sample: Option<String>,
    timestamp: Option<RunTimestamp>,
}

impl RunName {
    /// Parses a run group name.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (sample, timestamp) = match parse_acquisition_name(raw) {
            Some((sample, timestamp)) => (sample, Some(timestamp)),
            None => (None, None),
        };
        Self {
            raw: raw.to_string(),
            sample,
            timestamp,
        }
    }

    /// The verbatim group name.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Sample name, when the group name follows the acquisition convention.
    #[must_use]
    pub fn sample(&self) -> Option<&str> {
        self.sample.as_deref()
    }

    /// Acquisition timestamp, when the group name carries one.
    #[must_use]
    pub fn timestamp(&self) -> Option<RunTimestamp> {
        self.timestamp
    }

    /// Stem for the output file name: `<sample>_<YYYY-MM-DD_HH-MM-SS>` when
    /// the name parsed, the verbatim group name otherwise.
    #[must_use]
    pub fn output_stem(&self) -> String {
        match (&self.sample, &self.timestamp) {
            (Some(sample), Some(stamp)) => format!("{sample}_{}", stamp.file_stamp()),
            _ => self.raw.clone(),
        }
    }
}

fn parse_acquisition_name(raw: &str) -> Option<(Option<String>, RunTimestamp)> {
    // "Run" + 8 date digits + ' ' + 6 time digits, optionally ' ' + sample.
    let rest = raw.strip_prefix("Run")?;
    let bytes = rest.as_bytes();
    if bytes.len() < 15
        || bytes[8] != b' '
        || !bytes[..8].iter().all(u8::is_ascii_digit)
        || !bytes[9..15].iter().all(u8::is_ascii_digit)
    {
        return None;
    }
    let date = &rest[..8];
    let time = &rest[9..15];

    let timestamp = RunTimestamp {
        year: date[..4].parse().ok()?,
        month: date[4..6].parse().ok()?,
        day: date[6..8].parse().ok()?,
        hour: time[..2].parse().ok()?,
        minute: time[2..4].parse().ok()?,
        second: time[4..6].parse().ok()?,
    };
    if !(1..=12).contains(&timestamp.month)
        || !(1..=31).contains(&timestamp.day)
        || timestamp.hour > 23
        || timestamp.minute > 59
        || timestamp.second > 59
    {
        return None;
    }

    let sample = rest[15..]
        .strip_prefix(' ')
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);
    Some((sample, timestamp))
}

/// One scan acquisition: named channels sharing a pixel count.
#[derive(Debug, Clone)]
pub struct RunData {
    name: RunName,
    pixel_count: Option<usize>,
    scalars: BTreeMap<String, Vec<f64>>,
    vectors: BTreeMap<String, Array2<f64>>,
    positioners: BTreeMap<String, Vec<f64>>,
}

impl RunData {
    /// Creates an empty run with the given group name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: RunName::parse(name),
            pixel_count: None,
            scalars: BTreeMap::new(),
            vectors: BTreeMap::new(),
            positioners: BTreeMap::new(),
        }
    }

    /// The run's parsed identity.
    #[must_use]
    pub fn name(&self) -> &RunName {
        &self.name
    }

    /// Number of pixels shared by every per-pixel channel; 0 before the first
    /// channel is inserted.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.pixel_count.unwrap_or(0)
    }

    /// Inserts a scalar channel (one value per pixel).
    ///
    /// # Errors
    /// Returns [`Error::MismatchedLength`] if the channel disagrees with the
    /// pixel count established by earlier channels.
    pub fn insert_scalar(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        self.check_length(&name, values.len())?;
        self.scalars.insert(name, values);
        Ok(())
    }

    /// Inserts a vector channel (one fixed-length record per pixel).
    ///
    /// # Errors
    /// Returns [`Error::MismatchedLength`] if the record count disagrees with
    /// the pixel count established by earlier channels.
    pub fn insert_vector(&mut self, name: impl Into<String>, records: Array2<f64>) -> Result<()> {
        let name = name.into();
        self.check_length(&name, records.nrows())?;
        self.vectors.insert(name, records);
        Ok(())
    }

    /// Stores a positioner snapshot value set (not a per-pixel channel; copied
    /// verbatim into the output).
    pub fn insert_positioner(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.positioners.insert(name.into(), values);
    }

    fn check_length(&mut self, name: &str, actual: usize) -> Result<()> {
        match self.pixel_count {
            None => {
                self.pixel_count = Some(actual);
                Ok(())
            }
            Some(expected) if expected == actual => Ok(()),
            Some(expected) => Err(Error::MismatchedLength {
                name: name.to_string(),
                expected,
                actual,
            }),
        }
    }

    /// Looks up a scalar channel; absence is a capability, not an error.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&[f64]> {
        self.scalars.get(name).map(Vec::as_slice)
    }

    /// Looks up a scalar channel that must be present.
    ///
    /// # Errors
    /// Returns [`Error::MissingChannel`] when the channel is absent.
    pub fn require_scalar(&self, name: &str) -> Result<&[f64]> {
        self.scalar(name).ok_or_else(|| Error::MissingChannel {
            name: name.to_string(),
        })
    }

    /// True when the run carries the named scalar channel.
    #[must_use]
    pub fn has_scalar(&self, name: &str) -> bool {
        self.scalars.contains_key(name)
    }

    /// True when the run carries the named vector channel.
    #[must_use]
    pub fn has_vector(&self, name: &str) -> bool {
        self.vectors.contains_key(name)
    }

    /// Iterates scalar channels in name order.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.scalars
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Iterates vector channels in name order.
    pub fn vectors(&self) -> impl Iterator<Item = (&str, &Array2<f64>)> {
        self.vectors.iter().map(|(name, arr)| (name.as_str(), arr))
    }

    /// Iterates positioner snapshots in name order.
    pub fn positioners(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.positioners
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}
