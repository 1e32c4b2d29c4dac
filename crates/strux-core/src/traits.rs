//! The element access capability shared by every array flavor.

use crate::error::StoreError;
use crate::model::ArrayModel;

/// Indexed element access over a logical 64-bit index space.
///
/// Implemented by each concrete array flavor (structured and primitive)
/// on top of the same partitioned storage engine. Providers that read
/// from an existing array, such as copy providers, are generic over this
/// trait rather than over a concrete flavor.
///
/// Cloning is not part of the trait: each flavor implements [`Clone`]
/// when its element type does, producing an independent deep copy.
pub trait ElementAccess {
    /// The element type stored in each slot.
    type Element;

    /// Shape of the array.
    fn model(&self) -> &ArrayModel;

    /// Logical length.
    fn len(&self) -> u64;

    /// Whether the array has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared reference to the element at `index`.
    fn element(&self, index: u64) -> Result<&Self::Element, StoreError>;

    /// Mutable reference to the element at `index`.
    fn element_mut(&mut self, index: u64) -> Result<&mut Self::Element, StoreError>;

    /// Store `value` at `index`, returning the previous element.
    fn replace(&mut self, index: u64, value: Self::Element) -> Result<Self::Element, StoreError> {
        Ok(std::mem::replace(self.element_mut(index)?, value))
    }
}
