use crate::components::{ComponentSet, TypeSet};
use std::marker::PhantomData;

/// A compiled query predicate over table shapes.
///
/// A shape `S` is compatible iff `S ⊇ has`, `S ∩ not = ∅`,
/// and either `any` is empty or `S ∩ any ≠ ∅`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Mask {
	has: TypeSet,
	not: TypeSet,
	any: TypeSet,
}

impl Mask {
	pub fn new(has: TypeSet, not: TypeSet, any: TypeSet) -> Self {
		Self { has, not, any }
	}

	pub fn build() -> MaskBuilder {
		MaskBuilder::default()
	}

	pub fn has(&self) -> &TypeSet {
		&self.has
	}

	pub fn not(&self) -> &TypeSet {
		&self.not
	}

	pub fn any(&self) -> &TypeSet {
		&self.any
	}

	pub fn has_any(&self) -> bool {
		!self.any.is_empty()
	}

	/// Whether a table of shape `types` satisfies this mask.
	pub fn matches(&self, types: &TypeSet) -> bool {
		types.is_superset_of(&self.has)
			&& !types.intersects(&self.not)
			&& (!self.has_any() || types.intersects(&self.any))
	}
}

/// A utility structure to build [Masks](Mask) from component tuples.
pub struct MaskBuilder<H: ComponentSet = (), N: ComponentSet = (), A: ComponentSet = ()> {
	phantom: PhantomData<fn() -> (H, N, A)>,
}

impl Default for MaskBuilder {
	fn default() -> Self {
		Self { phantom: PhantomData }
	}
}

impl<H: ComponentSet, N: ComponentSet, A: ComponentSet> MaskBuilder<H, N, A> {
	/// Specify which types a table must include.
	pub fn has<TH: ComponentSet>(self) -> MaskBuilder<TH, N, A> {
		MaskBuilder { phantom: PhantomData }
	}

	/// Specify which types a table must not include.
	pub fn not<TN: ComponentSet>(self) -> MaskBuilder<H, TN, A> {
		MaskBuilder { phantom: PhantomData }
	}

	/// Specify a set of types of which a table must include at least one.
	pub fn any<TA: ComponentSet>(self) -> MaskBuilder<H, N, TA> {
		MaskBuilder { phantom: PhantomData }
	}

	/// Construct a mask from the previously specified types.
	pub fn create(self) -> Mask {
		Mask::new(H::type_set(), N::type_set(), A::type_set())
	}
}
