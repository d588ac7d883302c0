//! Base feature trait.

use crate::error::Result;

/// Trait for all feature functions.
///
/// A feature maps a fixed-length input to a fixed-length output array. Some
/// features keep state between calls (traces, random generators), so
/// [`Feature::apply`] takes `&mut self`; stateless features also expose an
/// inherent `&self` method.
pub trait Feature<T: ?Sized> {
    /// Element type of the produced array.
    type Output;

    /// Returns the expected input length.
    fn n_input(&self) -> usize;

    /// Returns the length of every output.
    fn n_output(&self) -> usize;

    /// Applies the feature to one input.
    fn apply(&mut self, input: &T) -> Result<Vec<Self::Output>>;

    /// Applies the feature to every input in order.
    ///
    /// Stops at the first input that fails.
    fn apply_batch<'a, I>(&mut self, inputs: I) -> Result<Vec<Vec<Self::Output>>>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        inputs.into_iter().map(|input| self.apply(input)).collect()
    }
}
