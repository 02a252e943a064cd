use std::fmt::Debug;

pub use ::num::ToPrimitive;

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default {}

impl<T: ::num::PrimInt + Debug + Default> PrimInt for T {}

/// T values can be losslessly (or at least meaningfully) turned into `f64` for averaging
pub trait Numeric: ::num::ToPrimitive + Debug {}

impl<T: ::num::ToPrimitive + Debug> Numeric for T {}
