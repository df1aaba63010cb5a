use crate::tests::{Aligned, Frozen, Health, Marker, Name, Position, Script, Velocity};
use crate::components::{lookup, lookup_id, ComponentTypeInfo, Mask, StorageKind, StorageType, TypeSet};
use crate::entities::Entity;
use std::collections::BTreeSet;
use std::any::TypeId;
use rand::Rng;

fn pool() -> Vec<StorageType> {
	vec![
		StorageType::of::<Position>(),
		StorageType::of::<Velocity>(),
		StorageType::of::<Health>(),
		StorageType::of::<Aligned>(),
		StorageType::of::<Marker>(),
		StorageType::of::<Frozen>(),
		StorageType::of::<Name>(),
		StorageType::of::<Script>(),
	]
}

fn random_subset(rng: &mut impl Rng, pool: &[StorageType]) -> Vec<StorageType> {
	pool.iter().copied().filter(|_| rng.gen_bool(0.4)).collect()
}

#[test]
pub fn storage_types_are_memoized() {
	let a = Position::storage_type();
	let b = StorageType::of::<Position>();

	assert_eq!(a, b);
	assert_eq!(a.id(), b.id());
	assert_ne!(a, StorageType::of::<Velocity>());
	assert_eq!(Some(a), lookup(TypeId::of::<Position>()));
	assert_eq!(Some(a), lookup_id(a.id()));
}

#[test]
pub fn storage_type_facts() {
	let position = StorageType::of::<Position>();
	assert_eq!(8, position.byte_size());
	assert!(!position.is_tag());
	assert!(position.is_unmanaged());
	assert!(position.has_column());

	assert!(StorageType::of::<Marker>().is_tag());
	assert!(StorageType::of::<Frozen>().is_tag());
	assert!(!StorageType::of::<Marker>().has_column());

	let aligned = StorageType::of::<Aligned>();
	assert_eq!(16, aligned.align());

	let name = StorageType::of::<Name>();
	assert_eq!(StorageKind::Object, name.kind());
	assert!(name.is_object());
	assert!(!name.is_tag());
	assert!(!name.has_column());

	assert_eq!(8, Entity::storage_type().byte_size());
}

#[test]
pub fn construction_order_does_not_matter() {
	let a = TypeSet::new([StorageType::of::<Velocity>(), StorageType::of::<Position>()]);
	let b = TypeSet::new([
		StorageType::of::<Position>(),
		StorageType::of::<Velocity>(),
		StorageType::of::<Position>(),
	]);

	assert_eq!(a, b);
	assert_eq!(2, b.len());
	assert_eq!(a, TypeSet::of::<(Velocity, Position)>());
	assert_eq!(a, TypeSet::of::<(Position, Velocity)>());

	let mut ids = a.iter().map(|t| t.id()).collect::<Vec<_>>();
	let sorted = ids.clone();
	ids.sort();
	assert_eq!(sorted, ids);
}

#[test]
pub fn with_without_and_columns() {
	let base = TypeSet::of::<(Position, Marker, Name)>();

	let extended = base.with(StorageType::of::<Velocity>());
	assert!(extended.contains(StorageType::of::<Velocity>()));
	assert_eq!(base, extended.without(StorageType::of::<Velocity>()));
	assert_eq!(base, base.with(StorageType::of::<Position>()));

	assert_eq!(TypeSet::of::<(Position,)>(), base.columns());
	assert_eq!(8, base.row_bytes());
	assert!(TypeSet::empty().is_empty());

	let union = base.union(&TypeSet::of::<(Velocity, Position)>());
	assert_eq!(TypeSet::of::<(Position, Velocity, Marker, Name)>(), union);
	assert!(union.contains_id(Velocity::storage_type().id()));
	assert!(!base.contains_id(Velocity::storage_type().id()));
}

#[test]
pub fn mask_builder_matches_explicit_sets() {
	let mask = Mask::build().has::<(Position, Velocity)>().not::<(Marker,)>().any::<(Health, Name)>().create();

	assert_eq!(&TypeSet::of::<(Velocity, Position)>(), mask.has());
	assert_eq!(&TypeSet::of::<(Marker,)>(), mask.not());
	assert_eq!(&TypeSet::of::<(Name, Health)>(), mask.any());
	assert!(mask.has_any());

	assert!(mask.matches(&TypeSet::of::<(Position, Velocity, Health)>()));
	assert!(!mask.matches(&TypeSet::of::<(Position, Velocity)>()));
	assert!(!mask.matches(&TypeSet::of::<(Position, Velocity, Health, Marker)>()));
	assert!(!mask.matches(&TypeSet::of::<(Position, Name)>()));

	assert!(Mask::default().matches(&TypeSet::empty()));
}

#[test]
pub fn mask_compatibility_matches_set_definition() {
	let pool = pool();
	let mut rng = rand::thread_rng();

	for _ in 0..500 {
		let shape = random_subset(&mut rng, &pool);
		let has = random_subset(&mut rng, &pool);
		let not = random_subset(&mut rng, &pool);
		let any = random_subset(&mut rng, &pool);

		let s: BTreeSet<_> = shape.iter().copied().collect();
		let superset = has.iter().all(|t| s.contains(t));
		let disjoint = not.iter().all(|t| !s.contains(t));
		let some = any.is_empty() || any.iter().any(|t| s.contains(t));

		let mask = Mask::new(TypeSet::new(has), TypeSet::new(not), TypeSet::new(any));
		assert_eq!(superset && disjoint && some, mask.matches(&TypeSet::new(shape)));
	}
}
