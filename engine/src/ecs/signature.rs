//! Component signatures.
//!
//! A [`Signature`] records which component types an entity currently has, and doubles as the
//! requirement a system places on the entities it runs over: an entity belongs to a system exactly
//! when its signature contains every bit of the system's required signature.

use std::fmt;

use fixedbitset::FixedBitSet;

use crate::{
    all_tuples,
    ecs::{
        component::{self, Component},
        error::Result,
    },
};

/// Bitset of component type ids. Bit N set means component id N is included.
///
/// The bitset grows on demand to fit any component id, so signatures of differing widths compare
/// and test against each other by their set bits alone.
#[derive(Clone, Default)]
pub struct Signature {
    bits: FixedBitSet,
}

impl Signature {
    /// The empty signature.
    pub const EMPTY: Self = Self {
        bits: FixedBitSet::new(),
    };

    /// Construct an empty signature.
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Construct an empty signature with room for `bits` component ids before it needs to grow.
    #[inline]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(bits),
        }
    }

    /// Set the bit for the given component id.
    #[inline]
    pub fn insert(&mut self, id: component::Id) {
        let index = id.index();
        self.bits.grow(index + 1);
        self.bits.insert(index);
    }

    /// Clear the bit for the given component id.
    #[inline]
    pub fn remove(&mut self, id: component::Id) {
        let index = id.index();
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Check if the bit for the given component id is set.
    #[inline]
    pub fn contains(&self, id: component::Id) -> bool {
        self.bits.contains(id.index())
    }

    /// Check if this signature contains every component in `required`.
    #[inline]
    pub fn contains_all(&self, required: &Signature) -> bool {
        self.bits.is_superset(&required.bits)
    }

    /// Clear every bit.
    #[inline]
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Check if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// The number of component ids in this signature.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate the component ids in this signature in ascending order.
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = component::Id> + '_ {
        self.bits.ones().map(component::Id::from)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bits.ones()).finish()
    }
}

impl FromIterator<component::Id> for Signature {
    fn from_iter<I: IntoIterator<Item = component::Id>>(iter: I) -> Self {
        let mut signature = Signature::new();
        for id in iter {
            signature.insert(id);
        }
        signature
    }
}

/// Trait for converting a component type, or a tuple of them, into a [`Signature`].
pub trait IntoSignature {
    /// Resolve every component type to its id through the given registry.
    ///
    /// Fails with [`UnregisteredComponentType`](crate::ecs::Error::UnregisteredComponentType) if
    /// any type was never registered.
    fn into_signature(registry: &component::Registry) -> Result<Signature>;
}

/// [`IntoSignature`] implementation for the empty tuple.
impl IntoSignature for () {
    fn into_signature(_registry: &component::Registry) -> Result<Signature> {
        Ok(Signature::EMPTY)
    }
}

/// [`IntoSignature`] implementation for single component types.
impl<C: Component> IntoSignature for C {
    fn into_signature(registry: &component::Registry) -> Result<Signature> {
        Ok([registry.id::<C>()?].into_iter().collect())
    }
}

/// [`IntoSignature`] implementation for tuples of other [`IntoSignature`] types.
macro_rules! tuple_signature {
    ($($name: ident),*) => {
        impl<$($name: IntoSignature),*> IntoSignature for ($($name,)*) {
            fn into_signature(registry: &component::Registry) -> Result<Signature> {
                let mut signature = Signature::new();
                $(
                    for id in <$name>::into_signature(registry)?.ids() {
                        signature.insert(id);
                    }
                )*
                Ok(signature)
            }
        }
    }
}

// Implement the tuple -> Signature for all tuples up to 26 elements.
all_tuples!(tuple_signature);

#[cfg(test)]
mod tests {
    use triki_macros::Component;

    use super::*;
    use crate::ecs::{Error, component::Id};

    #[derive(Component)]
    struct Comp1;
    #[derive(Component)]
    struct Comp2;
    #[derive(Component)]
    struct Comp3;

    #[test]
    fn insert_remove_contains() {
        // Given
        let mut signature = Signature::new();

        // When
        signature.insert(Id::new(3));
        signature.insert(Id::new(40));

        // Then
        assert!(signature.contains(Id::new(3)));
        assert!(signature.contains(Id::new(40)));
        assert!(!signature.contains(Id::new(4)));
        assert_eq!(signature.len(), 2);

        // When
        signature.remove(Id::new(3));
        signature.remove(Id::new(100));

        // Then
        assert!(!signature.contains(Id::new(3)));
        assert_eq!(signature.ids().collect::<Vec<_>>(), vec![Id::new(40)]);
    }

    #[test]
    fn superset_matching() {
        // Given
        let required: Signature = [Id::new(1), Id::new(2)].into_iter().collect();
        let exact: Signature = [Id::new(2), Id::new(1)].into_iter().collect();
        let wider: Signature = [Id::new(0), Id::new(1), Id::new(2), Id::new(31)]
            .into_iter()
            .collect();
        let partial: Signature = [Id::new(1), Id::new(5)].into_iter().collect();

        // Then
        assert!(exact.contains_all(&required));
        assert!(wider.contains_all(&required));
        assert!(!partial.contains_all(&required));
        assert!(!Signature::EMPTY.contains_all(&required));

        // Then - Everything satisfies the empty requirement
        assert!(Signature::EMPTY.contains_all(&Signature::EMPTY));
        assert!(partial.contains_all(&Signature::EMPTY));
    }

    #[test]
    fn equality_ignores_width() {
        // Given
        let mut wide = Signature::with_capacity(64);
        wide.insert(Id::new(2));
        let mut narrow = Signature::new();
        narrow.insert(Id::new(2));

        // Then
        assert_eq!(wide, narrow);

        // When - A high bit is set then cleared
        narrow.insert(Id::new(60));
        narrow.remove(Id::new(60));

        // Then
        assert_eq!(wide, narrow);
    }

    #[test]
    fn clear_empties() {
        // Given
        let mut signature: Signature = [Id::new(0), Id::new(7)].into_iter().collect();

        // When
        signature.clear();

        // Then
        assert!(signature.is_empty());
        assert_eq!(signature, Signature::EMPTY);
    }

    #[test]
    fn tuple_into_signature() {
        // Given
        let mut registry = component::Registry::new(8);
        let id1 = registry.register::<Comp1>().unwrap();
        let id2 = registry.register::<Comp2>().unwrap();

        // When
        let single = Comp2::into_signature(&registry).unwrap();
        let pair = <(Comp1, Comp2)>::into_signature(&registry).unwrap();
        let empty = <()>::into_signature(&registry).unwrap();

        // Then
        assert_eq!(single.ids().collect::<Vec<_>>(), vec![id2]);
        assert_eq!(pair.ids().collect::<Vec<_>>(), vec![id1, id2]);
        assert!(empty.is_empty());

        // Then - Unregistered members fail the whole conversion
        assert!(matches!(
            <(Comp1, Comp3)>::into_signature(&registry),
            Err(Error::UnregisteredComponentType(_))
        ));
    }
}
