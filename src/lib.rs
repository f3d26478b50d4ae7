//! Numerical hyperparameters and their encoding into a normalized search space.
//!
//! Every hyperparameter maps values of its native domain (e.g., a float in `[0.1, 0.9]`,
//! or an integer in `{1, 2, 3, 4}`) onto the unit interval `[0, 1)` that optimizers explore,
//! and maps normalized points back to native values.
//!
//! # Examples
//!
//! ```
//! use hyperparams::{FloatHyperParam, HyperParam, IntHyperParam};
//!
//! # fn main() -> hyperparams::Result<()> {
//! let lr = FloatHyperParam::new(0.1, 0.9)?;
//! assert_eq!(lr.encode_one_dimension(0.1), 0.0);
//! assert_eq!(lr.encode_one_dimension(0.9), 1.0);
//!
//! let depth = IntHyperParam::new(1, 4)?;
//! assert_eq!(depth.encode_one_dimension(1), 0.125);
//! assert_eq!(depth.decode_one_dimension(0.875), 4);
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]
#[macro_use]
extern crate trackable;

pub use self::error::{Error, ErrorKind};
pub use self::hyperparams::float::{FloatHyperParam, FloatHyperParamBuilder};
pub use self::hyperparams::int::{IntHyperParam, IntHyperParamBuilder};
pub use self::hyperparams::{HyperParam, Numerical};

pub mod hyperparams;

mod error;

/// This crate specific `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
