//! Array shape descriptions.
//!
//! An [`ArrayModel`] is an immutable value describing an array without
//! materializing it: the element type, the length, and for arrays of
//! arrays the model of each contained sub-array. Models are the input to
//! every build and the only shape description exposed to callers.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::id::Indices;

/// Identity of an element type.
///
/// Compared and hashed by [`TypeId`] only; the name is kept for
/// diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct ElementType {
    id: TypeId,
    name: &'static str,
}

impl ElementType {
    /// The identity of `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The Rust type name, as reported by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ElementType {}

impl Hash for ElementType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Immutable description of an array's shape.
///
/// `sub_model` is `Some` exactly when the elements are themselves arrays;
/// recursion bottoms out at a model whose `sub_model` is `None`. Two
/// models are equal iff element type, length, and (recursively) sub-models
/// are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayModel {
    element: ElementType,
    length: u64,
    sub: Option<Box<ArrayModel>>,
}

impl ArrayModel {
    /// A flat array of `length` elements of type `E`.
    pub fn new<E: 'static>(length: u64) -> Self {
        Self {
            element: ElementType::of::<E>(),
            length,
            sub: None,
        }
    }

    /// An array of `length` sub-arrays of Rust type `A`, each shaped by `sub`.
    ///
    /// `A` is the concrete array type stored in each slot (for example
    /// `StructuredArray<Point>`); `sub` describes its contents.
    pub fn nested<A: 'static>(length: u64, sub: ArrayModel) -> Self {
        Self {
            element: ElementType::of::<A>(),
            length,
            sub: Some(Box::new(sub)),
        }
    }

    /// Identity of the direct element type.
    pub fn element_type(&self) -> ElementType {
        self.element
    }

    /// Number of elements at this level.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Model of each contained sub-array, if the elements are arrays.
    pub fn sub_model(&self) -> Option<&ArrayModel> {
        self.sub.as_deref()
    }

    /// Whether the elements of this array are themselves arrays.
    pub fn is_nested(&self) -> bool {
        self.sub.is_some()
    }

    /// Number of dimensions (1 for a flat array).
    pub fn rank(&self) -> usize {
        self.levels().count()
    }

    /// Per-dimension lengths, outermost first.
    pub fn dimensions(&self) -> Indices {
        self.levels().map(|m| m.length).collect()
    }

    /// Identity of the innermost (non-array) element type.
    pub fn leaf_type(&self) -> ElementType {
        self.innermost().element
    }

    /// Total number of leaf elements across all dimensions.
    ///
    /// Returns `None` if the product overflows `u64`.
    pub fn leaf_count(&self) -> Option<u64> {
        self.levels()
            .try_fold(1u64, |acc, m| acc.checked_mul(m.length))
    }

    /// Whether `E` is the direct element type of this model.
    pub fn describes<E: 'static>(&self) -> bool {
        self.element.id == TypeId::of::<E>()
    }

    fn levels(&self) -> impl Iterator<Item = &ArrayModel> {
        std::iter::successors(Some(self), |m| m.sub_model())
    }

    fn innermost(&self) -> &ArrayModel {
        let mut model = self;
        while let Some(sub) = model.sub_model() {
            model = sub;
        }
        model
    }
}

impl fmt::Display for ArrayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.leaf_type())?;
        for dim in self.dimensions() {
            write!(f, "[{dim}]")?;
        }
        Ok(())
    }
}
