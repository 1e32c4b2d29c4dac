//! Fixed-capacity storage blocks.
//!
//! A [`Partition`] is one contiguous `Vec<E>` whose capacity is fixed at
//! creation. It is filled strictly in order, either all at once with
//! default values or one element at a time by a builder.

/// A single contiguous block of elements with a fixed capacity.
///
/// Partitions are the physical storage unit behind a partitioned store:
/// one direct partition plus zero or more overflow partitions. They never
/// grow past their declared capacity.
#[derive(Clone, Debug)]
pub struct Partition<E> {
    /// Backing storage. Capacity reserved up front.
    data: Vec<E>,
    /// Declared capacity in elements.
    capacity: u32,
}

impl<E> Partition<E> {
    /// Create an empty partition with room for `capacity` elements.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            data: Vec::with_capacity(capacity as usize),
            capacity,
        }
    }

    /// Create a full partition of `capacity` default-initialized elements.
    pub fn filled_default(capacity: u32) -> Self
    where
        E: Default,
    {
        let mut data = Vec::with_capacity(capacity as usize);
        data.resize_with(capacity as usize, E::default);
        Self { data, capacity }
    }

    /// Append `value` at the next free offset.
    ///
    /// Returns the value back if the partition is already full.
    pub fn push(&mut self, value: E) -> Result<u32, E> {
        if self.is_full() {
            return Err(value);
        }
        let offset = self.data.len() as u32;
        self.data.push(value);
        Ok(offset)
    }

    /// Element at `offset`, if it has been written.
    #[inline]
    pub fn get(&self, offset: u32) -> Option<&E> {
        self.data.get(offset as usize)
    }

    /// Mutable element at `offset`, if it has been written.
    #[inline]
    pub fn get_mut(&mut self, offset: u32) -> Option<&mut E> {
        self.data.get_mut(offset as usize)
    }

    /// All written elements.
    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    /// All written elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.data
    }

    /// Number of elements written.
    pub fn len(&self) -> u32 {
        self.data.len() as u32
    }

    /// Whether no element has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Declared capacity in elements.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Remaining unwritten slots.
    pub fn remaining(&self) -> u32 {
        self.capacity - self.len()
    }

    /// Whether every slot has been written.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Memory reserved for the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.capacity as usize * std::mem::size_of::<E>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_default_is_full_of_defaults() {
        let p: Partition<u32> = Partition::filled_default(16);
        assert!(p.is_full());
        assert_eq!(p.len(), 16);
        assert!(p.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn push_fills_in_order() {
        let mut p = Partition::with_capacity(3);
        assert_eq!(p.push("a"), Ok(0));
        assert_eq!(p.push("b"), Ok(1));
        assert_eq!(p.remaining(), 1);
        assert_eq!(p.get(1), Some(&"b"));
        assert_eq!(p.get(2), None);
    }

    #[test]
    fn push_hands_value_back_when_full() {
        let mut p = Partition::with_capacity(1);
        p.push(String::from("first")).unwrap();
        assert_eq!(p.push(String::from("second")), Err(String::from("second")));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn zero_capacity_partition_is_full() {
        let mut p: Partition<u8> = Partition::with_capacity(0);
        assert!(p.is_full());
        assert!(p.is_empty());
        assert_eq!(p.push(1), Err(1));
    }

    #[test]
    fn clone_does_not_alias() {
        let mut a: Partition<Vec<u8>> = Partition::filled_default(2);
        let b = a.clone();
        a.get_mut(0).unwrap().push(7);
        assert!(b.get(0).unwrap().is_empty());
    }

    #[test]
    fn memory_bytes_accounts_for_capacity() {
        let p: Partition<u64> = Partition::with_capacity(10);
        assert_eq!(p.memory_bytes(), 80);
    }
}
