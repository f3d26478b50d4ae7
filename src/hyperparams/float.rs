//! Continuous numerical hyperparameter.
use crate::hyperparams::{HyperParam, Numerical};
use crate::{Error, ErrorKind, Result};
use ordered_float::NotNan;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Builder of `FloatHyperParam`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FloatHyperParamBuilder {
    min: Option<f64>,
    max: Option<f64>,
    include_min: bool,
    include_max: bool,
}
impl FloatHyperParamBuilder {
    /// Makes a new `FloatHyperParamBuilder` instance with the default settings.
    ///
    /// The default domain is unbounded on both sides and includes both ends.
    pub const fn new() -> Self {
        Self {
            min: None,
            max: None,
            include_min: true,
            include_max: true,
        }
    }

    /// Sets the lower bound of the resulting hyperparameter.
    ///
    /// `f64::NEG_INFINITY` is treated as "unbounded".
    pub fn min(&mut self, min: f64) -> &mut Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound of the resulting hyperparameter.
    ///
    /// `f64::INFINITY` is treated as "unbounded".
    pub fn max(&mut self, max: f64) -> &mut Self {
        self.max = Some(max);
        self
    }

    /// Sets whether the lower bound is a legal value.
    pub fn include_min(&mut self, include: bool) -> &mut Self {
        self.include_min = include;
        self
    }

    /// Sets whether the upper bound is a legal value.
    pub fn include_max(&mut self, include: bool) -> &mut Self {
        self.include_max = include;
        self
    }

    /// Builds a new `FloatHyperParam` instance.
    ///
    /// A missing lower (upper) bound is replaced by `f64::MIN` (`f64::MAX`).
    ///
    /// # Errors
    ///
    /// If one of the following conditions is satisfied, this function returns an `ErrorKind::InvalidInput` error:
    ///
    /// - `min` or `max` is NaN
    /// - `min >= max`
    /// - `max - min` is not a finite number
    ///
    /// The last condition is also met when only one side is given and it is far from the
    /// sentinel of the other side (e.g., `min = -1e300` without `max`, since `f64::MAX + 1e300`
    /// is not finite).
    pub fn finish(&self) -> Result<FloatHyperParam> {
        let min = self.min.filter(|&x| x != f64::NEG_INFINITY);
        let max = self.max.filter(|&x| x != f64::INFINITY);
        let min_bounded = min.is_some();
        let max_bounded = max.is_some();

        let min = min.unwrap_or(f64::MIN);
        let max = max.unwrap_or(f64::MAX);
        track_assert!(!min.is_nan(), ErrorKind::InvalidInput; min, max);
        track_assert!(!max.is_nan(), ErrorKind::InvalidInput; min, max);
        track_assert!(min < max, ErrorKind::InvalidInput; min, max);

        let range = max - min;
        track_assert!(range.is_finite(), ErrorKind::InvalidInput; min, max, range);

        tracing::debug!(
            min,
            max,
            range,
            min_bounded,
            max_bounded,
            "float hyperparameter is built"
        );
        Ok(unsafe {
            FloatHyperParam {
                min: NotNan::unchecked_new(min),
                max: NotNan::unchecked_new(max),
                range: NotNan::unchecked_new(range),
                min_bounded,
                max_bounded,
                include_min: self.include_min,
                include_max: self.include_max,
            }
        })
    }
}
impl Default for FloatHyperParamBuilder {
    fn default() -> Self {
        Self::new()
    }
}
impl From<FloatHyperParam> for FloatHyperParamBuilder {
    fn from(f: FloatHyperParam) -> Self {
        Self {
            min: if f.min_bounded { Some(f.min()) } else { None },
            max: if f.max_bounded { Some(f.max()) } else { None },
            include_min: f.include_min,
            include_max: f.include_max,
        }
    }
}

/// Hyperparameter that takes a real number.
///
/// Native values are linearly rescaled so that `min` is mapped to `0.0` and `max` to `1.0`:
///
/// - transform: `(value - min) / (max - min)`
/// - inverse transform: `value * (max - min) + min`
///
/// No rounding nor clamping is applied in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "FloatHyperParamBuilder", into = "FloatHyperParamBuilder")
)]
pub struct FloatHyperParam {
    min: NotNan<f64>,
    max: NotNan<f64>,
    range: NotNan<f64>,
    min_bounded: bool,
    max_bounded: bool,
    include_min: bool,
    include_max: bool,
}
impl FloatHyperParam {
    /// Makes a new `FloatHyperParam` instance that represents the closed interval `[min, max]`.
    ///
    /// # Errors
    ///
    /// See [`FloatHyperParamBuilder::finish`].
    pub fn new(min: f64, max: f64) -> Result<Self> {
        track!(FloatHyperParamBuilder::new().min(min).max(max).finish())
    }

    /// Returns the width of the domain (i.e., `max - min`).
    pub fn range(&self) -> f64 {
        self.range.into_inner()
    }
}
impl HyperParam for FloatHyperParam {
    type Value = f64;

    const K: usize = 1;

    fn encode_one_dimension(&self, value: f64) -> f64 {
        (value - self.min()) / self.range()
    }

    fn decode_one_dimension(&self, value: f64) -> f64 {
        value * self.range() + self.min()
    }
}
impl Numerical for FloatHyperParam {
    fn min(&self) -> f64 {
        self.min.into_inner()
    }

    fn max(&self) -> f64 {
        self.max.into_inner()
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

    fn contains(&self, value: f64) -> bool {
        let above_min = if self.include_min {
            self.min() <= value
        } else {
            self.min() < value
        };
        let below_max = if self.include_max {
            value <= self.max()
        } else {
            value < self.max()
        };
        above_min && below_max
    }
}
impl TryFrom<FloatHyperParamBuilder> for FloatHyperParam {
    type Error = Error;

    fn try_from(f: FloatHyperParamBuilder) -> Result<Self> {
        track!(f.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use trackable::result::TestResult;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "actual={}, expected={}",
            actual,
            expected
        );
    }

    #[test]
    fn transform_works() -> TestResult {
        let param = track!(FloatHyperParam::new(0.1, 0.9))?;
        assert_eq!(param.encode_one_dimension(0.1), 0.0);
        assert_eq!(param.encode_one_dimension(0.9), 1.0);
        assert_close(param.encode_one_dimension(0.8), 0.875);

        let normalized = track!(param.transform(&arr1(&[0.1, 0.5, 0.9])))?;
        assert_eq!(normalized.len(), 3);
        assert_close(normalized[1], 0.5);
        Ok(())
    }

    #[test]
    fn inverse_transform_works() -> TestResult {
        let param = track!(FloatHyperParam::new(0.1, 0.9))?;
        assert_eq!(param.decode_one_dimension(0.0), 0.1);
        assert_close(param.decode_one_dimension(1.0), 0.9);
        assert_close(param.decode_one_dimension(0.875), 0.8);

        // Out of range values are not clamped.
        assert_close(param.decode_one_dimension(1.5), 1.3);
        assert_close(param.decode_one_dimension(-0.5), -0.3);
        Ok(())
    }

    #[test]
    fn round_trip_works() -> TestResult {
        let param = track!(FloatHyperParam::new(-3.5, 12.25))?;
        for i in 0..=100 {
            let x = -3.5 + 15.75 * (i as f64) / 100.0;
            let y = param.decode_one_dimension(param.encode_one_dimension(x));
            assert_close(y, x);
        }
        Ok(())
    }

    #[test]
    fn transform_is_monotonic() -> TestResult {
        let param = track!(FloatHyperParam::new(-1.0, 1.0))?;
        let xs = (0..50).map(|i| -1.0 + 0.04 * i as f64);
        let ys = xs.map(|x| param.encode_one_dimension(x)).collect::<Vec<_>>();
        assert!(ys.windows(2).all(|w| w[0] <= w[1]));
        Ok(())
    }

    #[test]
    fn unbounded_sides_are_substituted() -> TestResult {
        let param = track!(FloatHyperParamBuilder::new().max(1.0).finish())?;
        assert_eq!(param.min(), f64::MIN);
        assert_eq!(param.max(), 1.0);
        assert!(!param.is_min_bounded());
        assert!(param.is_max_bounded());
        assert!(param.range().is_finite());

        let param = track!(FloatHyperParamBuilder::new()
            .min(-1.0)
            .max(f64::INFINITY)
            .finish())?;
        assert_eq!(param.max(), f64::MAX);
        assert!(!param.is_max_bounded());

        let param = track!(FloatHyperParamBuilder::new()
            .min(f64::NEG_INFINITY)
            .max(0.0)
            .finish())?;
        assert_eq!(param.min(), f64::MIN);
        Ok(())
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        assert!(FloatHyperParam::new(1.0, 0.0).is_err());
        assert!(FloatHyperParam::new(1.0, 1.0).is_err());
        assert!(FloatHyperParam::new(std::f64::NAN, 1.0).is_err());
        assert!(FloatHyperParam::new(0.0, std::f64::NAN).is_err());
        assert!(FloatHyperParam::new(f64::INFINITY, 1.0).is_err());

        // The range of a fully unbounded domain is not finite.
        assert!(FloatHyperParamBuilder::new().finish().is_err());
        assert!(FloatHyperParam::new(f64::MIN, f64::MAX).is_err());
        assert!(FloatHyperParamBuilder::new().min(-1e300).finish().is_err());
        assert!(FloatHyperParamBuilder::new().max(1e300).finish().is_err());
    }

    #[test]
    fn contains_works() -> TestResult {
        let param = track!(FloatHyperParamBuilder::new()
            .min(0.0)
            .max(1.0)
            .include_max(false)
            .finish())?;
        assert!(param.include_min());
        assert!(!param.include_max());
        assert!(param.contains(0.0));
        assert!(param.contains(0.5));
        assert!(!param.contains(1.0));
        assert!(!param.contains(-0.1));
        assert!(!param.contains(std::f64::NAN));

        // Exclusion does not change the mapping.
        assert_eq!(param.encode_one_dimension(1.0), 1.0);
        Ok(())
    }

    #[test]
    fn sample_works() -> TestResult {
        let param = track!(FloatHyperParam::new(0.1, 0.9))?;
        let mut rng = StdRng::seed_from_u64(0);
        let samples = param.sample(&mut rng, 100);
        assert_eq!(samples.shape(), &[100, FloatHyperParam::K]);
        assert!(samples.iter().all(|&x| 0.0 <= x && x < 1.0));
        assert_eq!(param.sample(&mut rng, 0).shape(), &[0, 1]);
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_is_validated() -> TestResult {
        let param = track!(FloatHyperParamBuilder::new()
            .min(-2.0)
            .max(3.5)
            .include_max(false)
            .finish())?;
        let json = track_any_err!(serde_json::to_string(&param))?;
        let restored: FloatHyperParam = track_any_err!(serde_json::from_str(&json))?;
        assert_eq!(restored, param);

        let param: FloatHyperParam = track_any_err!(serde_json::from_str(r#"{"max": 1.0}"#))?;
        assert_eq!(param.min(), f64::MIN);
        assert!(!param.is_min_bounded());

        assert!(serde_json::from_str::<FloatHyperParam>(r#"{"min": 4.0, "max": 1.0}"#).is_err());
        assert!(serde_json::from_str::<FloatHyperParam>(r#"{"min": 1.0, "max": 1.0}"#).is_err());
        assert!(serde_json::from_str::<FloatHyperParam>("{}").is_err());
        Ok(())
    }

    #[test]
    fn builder_round_trip_works() -> TestResult {
        let param = track!(FloatHyperParamBuilder::new()
            .min(-2.0)
            .include_min(false)
            .finish())?;
        let builder = FloatHyperParamBuilder::from(param.clone());
        assert_eq!(track!(FloatHyperParam::try_from(builder))?, param);
        Ok(())
    }
}
