//! Hyperparameters and their normalized search space.
//!
//! A hyperparameter only has to know how to encode and decode a single native value
//! (see [`HyperParam::encode_one_dimension`] and [`HyperParam::decode_one_dimension`]).
//! Transforming whole arrays of values is provided uniformly on top of these hooks.
use crate::{ErrorKind, Result};
use ndarray::{Array, Array2, ArrayBase, Data, Dimension};
use rand::Rng;

pub mod float;
pub mod int;

/// This trait allows for mapping a hyperparameter between its native domain and
/// the normalized search space `[0, 1)^K`.
pub trait HyperParam {
    /// Native value type of this hyperparameter.
    type Value: Copy;

    /// Number of dimensions used to represent a value in the search space.
    const K: usize;

    /// Converts the given native value to the associated normalized value.
    fn encode_one_dimension(&self, value: Self::Value) -> f64;

    /// Converts the given normalized value to the associated native value.
    fn decode_one_dimension(&self, value: f64) -> Self::Value;

    /// Generates `n_samples` points in the search space.
    ///
    /// The shape of the resulting array is `(n_samples, K)`.
    /// By default, each element is drawn independently from the uniform distribution over `[0, 1)`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n_samples: usize) -> Array2<f64> {
        uniform_samples(rng, n_samples, Self::K)
    }

    /// Transforms native values into the search space element-wise.
    ///
    /// The returned array has the same shape as `values`.
    ///
    /// # Errors
    ///
    /// If `values` has two or more axes and the length of the last one is not `K`,
    /// this function returns an `ErrorKind::InvalidInput` error.
    fn transform<S, D>(&self, values: &ArrayBase<S, D>) -> Result<Array<f64, D>>
    where
        S: Data<Elem = Self::Value>,
        D: Dimension,
    {
        track!(check_shape(values.shape(), Self::K))?;
        Ok(values.mapv(|v| self.encode_one_dimension(v)))
    }

    /// Transforms normalized values back into the native domain element-wise.
    ///
    /// The returned array has the same shape as `values`.
    ///
    /// # Errors
    ///
    /// If `values` has two or more axes and the length of the last one is not `K`,
    /// this function returns an `ErrorKind::InvalidInput` error.
    fn inverse_transform<S, D>(&self, values: &ArrayBase<S, D>) -> Result<Array<Self::Value, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        track!(check_shape(values.shape(), Self::K))?;
        Ok(values.mapv(|v| self.decode_one_dimension(v)))
    }
}

/// This trait allows for defining a hyperparameter whose domain is a numerical range.
pub trait Numerical: HyperParam {
    /// Returns the smallest value of the effective domain.
    ///
    /// If the lower side is unbounded, a finite sentinel value is returned.
    fn min(&self) -> Self::Value;

    /// Returns the largest value of the effective domain.
    ///
    /// If the upper side is unbounded, a finite sentinel value is returned.
    fn max(&self) -> Self::Value;

    /// Returns `true` if `min` itself was requested to be a legal value.
    fn include_min(&self) -> bool;

    /// Returns `true` if `max` itself was requested to be a legal value.
    fn include_max(&self) -> bool;

    /// Returns `false` if no lower bound was given (i.e., `min` is a sentinel).
    fn is_min_bounded(&self) -> bool;

    /// Returns `false` if no upper bound was given (i.e., `max` is a sentinel).
    fn is_max_bounded(&self) -> bool;

    /// Returns `true` if the given native value is a legal value of this hyperparameter.
    fn contains(&self, value: Self::Value) -> bool;
}

fn check_shape(shape: &[usize], k: usize) -> Result<()> {
    if let [_, .., last] = shape {
        track_assert!(*last == k, ErrorKind::InvalidInput; shape, k);
    }
    Ok(())
}

fn uniform_samples<R: Rng + ?Sized>(rng: &mut R, n_samples: usize, k: usize) -> Array2<f64> {
    Array2::from_shape_fn((n_samples, k), |_| rng.gen::<f64>())
}
