//! Stepped numerical hyperparameter.
use crate::hyperparams::{uniform_samples, HyperParam, Numerical};
use crate::{Error, ErrorKind, Result};
use ndarray::Array2;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp;
use std::convert::TryFrom;
use std::num::NonZeroU64;

/// Magnitude of the sentinel values used for unbounded sides.
const UNBOUNDED: i64 = i64::MAX / 2;

/// Builder of `IntHyperParam`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IntHyperParamBuilder {
    min: Option<i64>,
    max: Option<i64>,
    include_min: bool,
    include_max: bool,
    step: NonZeroU64,
}
impl IntHyperParamBuilder {
    /// Makes a new `IntHyperParamBuilder` instance with the default settings.
    ///
    /// The default domain is unbounded on both sides, includes both ends and has a step of `1`.
    pub const fn new() -> Self {
        Self {
            min: None,
            max: None,
            include_min: true,
            include_max: true,
            // SAFETY: `1` is not zero.
            step: unsafe { NonZeroU64::new_unchecked(1) },
        }
    }

    /// Sets the lower bound of the resulting hyperparameter.
    pub fn min(&mut self, min: i64) -> &mut Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound of the resulting hyperparameter.
    pub fn max(&mut self, max: i64) -> &mut Self {
        self.max = Some(max);
        self
    }

    /// Sets whether the lower bound is a legal value.
    ///
    /// If `false`, the effective lower bound becomes `min + 1`.
    pub fn include_min(&mut self, include: bool) -> &mut Self {
        self.include_min = include;
        self
    }

    /// Sets whether the upper bound is a legal value.
    ///
    /// If `false`, the effective upper bound becomes `max - 1`.
    pub fn include_max(&mut self, include: bool) -> &mut Self {
        self.include_max = include;
        self
    }

    /// Sets the spacing between adjacent legal values.
    ///
    /// # Errors
    ///
    /// If `step` is `0`, an `ErrorKind::InvalidInput` error will be returned.
    pub fn step(&mut self, step: u64) -> Result<&mut Self> {
        self.step = track_assert_some!(NonZeroU64::new(step), ErrorKind::InvalidInput);
        Ok(self)
    }

    /// Builds a new `IntHyperParam` instance.
    ///
    /// A missing lower (upper) bound is replaced by `-(i64::MAX / 2)` (`i64::MAX / 2`).
    /// Excluded bounds are shifted inward by one before anything else is computed.
    ///
    /// # Errors
    ///
    /// If one of the following conditions is satisfied, this function returns an `ErrorKind::InvalidInput` error:
    ///
    /// - the effective `min` is greater than the effective `max`
    /// - `max - min` is not a multiple of `step`
    /// - adjusting the bounds overflows `i64`
    pub fn finish(&self) -> Result<IntHyperParam> {
        let min_bounded = self.min.is_some();
        let max_bounded = self.max.is_some();

        let mut min = self.min.unwrap_or(-UNBOUNDED);
        let mut max = self.max.unwrap_or(UNBOUNDED);
        if !self.include_min {
            min = track_assert_some!(min.checked_add(1), ErrorKind::InvalidInput; min);
        }
        if !self.include_max {
            max = track_assert_some!(max.checked_sub(1), ErrorKind::InvalidInput; max);
        }
        track_assert!(min <= max, ErrorKind::InvalidInput; min, max);

        let span = track_assert_some!(max.checked_sub(min), ErrorKind::InvalidInput; min, max);
        let span = span as u64;
        let step = self.step.get();
        track_assert_eq!(span % step, 0, ErrorKind::InvalidInput);
        let range = span / step + 1;

        tracing::debug!(
            min,
            max,
            step,
            range,
            min_bounded,
            max_bounded,
            "int hyperparameter is built"
        );
        Ok(IntHyperParam {
            min,
            max,
            step: self.step,
            range,
            min_bounded,
            max_bounded,
            include_min: self.include_min,
            include_max: self.include_max,
        })
    }
}
impl Default for IntHyperParamBuilder {
    fn default() -> Self {
        Self::new()
    }
}
impl From<IntHyperParam> for IntHyperParamBuilder {
    fn from(f: IntHyperParam) -> Self {
        // Undo the inward shift of excluded bounds.
        let min = if f.include_min { f.min } else { f.min - 1 };
        let max = if f.include_max { f.max } else { f.max + 1 };
        Self {
            min: if f.min_bounded { Some(min) } else { None },
            max: if f.max_bounded { Some(max) } else { None },
            include_min: f.include_min,
            include_max: f.include_max,
            step: f.step,
        }
    }
}

/// Hyperparameter that takes an integer from the lattice `{min, min + step, ..., max}`.
///
/// The unit interval is divided into `range` buckets of equal width (`interval`),
/// one per lattice point, and each point is mapped to the center of its bucket:
///
/// - transform: `((value - min) / step + 0.5) * interval`
/// - inverse transform: `round(value / interval - 0.5) * step + min`, clamped into `[min, max]`
///
/// A normalized value lying exactly on a bucket boundary is decoded to the neighbor
/// whose native value is even.
///
/// For example, the lattice `{1, 2, 3, 4}` is mapped to `{0.125, 0.375, 0.625, 0.875}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "IntHyperParamBuilder", into = "IntHyperParamBuilder")
)]
pub struct IntHyperParam {
    min: i64,
    max: i64,
    step: NonZeroU64,
    range: u64,
    min_bounded: bool,
    max_bounded: bool,
    include_min: bool,
    include_max: bool,
}
impl IntHyperParam {
    /// Makes a new `IntHyperParam` instance that takes every integer in `[min, max]`.
    ///
    /// # Errors
    ///
    /// See [`IntHyperParamBuilder::finish`].
    pub fn new(min: i64, max: i64) -> Result<Self> {
        track!(IntHyperParamBuilder::new().min(min).max(max).finish())
    }

    /// Returns the spacing between adjacent legal values.
    pub fn step(&self) -> NonZeroU64 {
        self.step
    }

    /// Returns the number of legal values (lattice points).
    pub fn range(&self) -> u64 {
        self.range
    }

    /// Returns the width of the bucket assigned to each lattice point (i.e., `1 / range`).
    pub fn interval(&self) -> f64 {
        1.0 / self.range as f64
    }

    /// Returns an iterator over the legal values in ascending order.
    pub fn values(&self) -> impl '_ + Iterator<Item = i64> {
        let step = self.step.get();
        (0..self.range).map(move |i| self.min + (i * step) as i64)
    }

    fn index(&self, value: i64) -> f64 {
        (i128::from(value) - i128::from(self.min)) as f64 / self.step.get() as f64
    }

    fn native(&self, index: f64) -> i128 {
        i128::from(self.min) + index as i128 * i128::from(self.step.get())
    }

    /// Rounds `index` to the nearest integer.
    ///
    /// Ties go to the index whose native value is even
    /// (or to the even index if both neighbors have the same parity).
    fn round_index(&self, index: f64) -> f64 {
        let lower = index.floor();
        if index - lower != 0.5 {
            return index.round();
        }
        let lower_is_even = if self.step.get() % 2 == 0 {
            lower.rem_euclid(2.0) == 0.0
        } else {
            self.native(lower).rem_euclid(2) == 0
        };
        if lower_is_even {
            lower
        } else {
            lower + 1.0
        }
    }
}
impl HyperParam for IntHyperParam {
    type Value = i64;

    const K: usize = 1;

    fn encode_one_dimension(&self, value: i64) -> f64 {
        (self.index(value) + 0.5) * self.interval()
    }

    fn decode_one_dimension(&self, value: f64) -> i64 {
        // NaN falls to `-1.0`; the clamp below maps it to `min`.
        let index = (value / self.interval() - 0.5)
            .max(-1.0)
            .min(self.range as f64);
        let index = self.round_index(index);

        let unclamped = self.native(index);
        let clamped = cmp::min(
            cmp::max(unclamped, i128::from(self.min)),
            i128::from(self.max),
        );
        if clamped != unclamped {
            tracing::trace!(value, min = self.min, max = self.max, "clamped");
        }
        clamped as i64
    }

    /// Generates `n_samples` points, each of which is the center of a lattice point's bucket.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n_samples: usize) -> Array2<f64> {
        uniform_samples(rng, n_samples, Self::K)
            .mapv_into(|x| self.encode_one_dimension(self.decode_one_dimension(x)))
    }
}
impl Numerical for IntHyperParam {
    fn min(&self) -> i64 {
        self.min
    }

    fn max(&self) -> i64 {
        self.max
    }

    fn include_min(&self) -> bool {
        self.include_min
    }

    fn include_max(&self) -> bool {
        self.include_max
    }

    fn is_min_bounded(&self) -> bool {
        self.min_bounded
    }

    fn is_max_bounded(&self) -> bool {
        self.max_bounded
    }

    fn contains(&self, value: i64) -> bool {
        let offset = i128::from(value) - i128::from(self.min);
        self.min <= value && value <= self.max && offset % i128::from(self.step.get()) == 0
    }
}
impl TryFrom<IntHyperParamBuilder> for IntHyperParam {
    type Error = Error;

    fn try_from(f: IntHyperParamBuilder) -> Result<Self> {
        track!(f.finish())
    }
}
