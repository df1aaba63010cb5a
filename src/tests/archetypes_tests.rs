use crate::tests::{Aligned, Frozen, Health, Marker, Position, Velocity};
use crate::archetypes::{Archetypes, ArchetypesConfig};
use crate::components::{ComponentTypeInfo, StorageType, TypeSet};
use crate::entities::{Entity, EntityMeta, Identity};
use crate::storage::TableId;
use crate::error::EcsError;
use crate::create_table;

#[test]
pub fn spawned_entities_start_in_the_empty_table() {
	let mut archetypes = Archetypes::new();
	let entity = archetypes.spawn().unwrap();

	assert!(archetypes.is_alive(entity));
	assert_eq!(1, archetypes.len());
	assert_eq!(TableId::EMPTY, archetypes.table_of(entity).unwrap());
	assert_eq!(&TypeSet::of::<(Entity,)>(), archetypes.tables()[0].types());
	assert_eq!(entity, archetypes.get_component::<Entity>(entity).unwrap());
}

#[test]
pub fn generations_are_monotonic() {
	let mut archetypes = Archetypes::new();
	let first = archetypes.spawn().unwrap();
	archetypes.despawn(first).unwrap();

	assert!(!archetypes.is_alive(first));
	assert!(archetypes.meta(first).is_err());

	let second = archetypes.spawn().unwrap();
	assert_eq!(first.index(), second.index());
	assert_eq!(first.generation() + 1, second.generation());
	assert!(archetypes.is_alive(second));
	assert!(!archetypes.is_alive(first));

	archetypes.despawn(second).unwrap();
	let third = archetypes.spawn().unwrap();
	assert_eq!(first.generation() + 2, third.generation());
	assert!(!archetypes.is_alive(first));
	assert!(!archetypes.is_alive(second));
}

#[test]
pub fn dead_and_unknown_identities_are_rejected() {
	let mut archetypes = Archetypes::new();
	let entity = archetypes.spawn().unwrap();
	archetypes.despawn(entity).unwrap();

	let unknown = Entity::from(Identity::new(9_999, 1));
	let next = Entity::from(Identity::new(entity.index(), entity.generation() + 1));
	for stale in [entity, unknown, next] {
		let identity = stale.identity();
		assert_eq!(Err(EcsError::NotAlive(identity)), archetypes.despawn(stale));
		assert_eq!(Err(EcsError::NotAlive(identity)), archetypes.add_component(stale, Health(1)));
		assert_eq!(Err(EcsError::NotAlive(identity)), archetypes.remove_component::<Health>(stale));
		assert_eq!(Err(EcsError::NotAlive(identity)), archetypes.get_component::<Health>(stale));
		assert!(!archetypes.has_component::<Health>(stale));
		assert!(!archetypes.has_component::<Entity>(stale));
	}
}

#[test]
pub fn shape_tracks_add_and_remove() {
	let mut archetypes = Archetypes::new();
	let entity = archetypes.spawn().unwrap();

	archetypes.add_component(entity, Position { x: 1.0, y: 1.0 }).unwrap();
	assert!(archetypes.has_component::<Position>(entity));
	assert!(!archetypes.has_component::<Velocity>(entity));

	archetypes.add_component(entity, Velocity { x: 2.0, y: 2.0 }).unwrap();
	assert_eq!(
		TypeSet::of::<(Entity, Position, Velocity)>(),
		archetypes.component_types(entity).unwrap()
	);

	archetypes.remove_component::<Position>(entity).unwrap();
	assert!(!archetypes.has_component::<Position>(entity));
	assert_eq!(Velocity { x: 2.0, y: 2.0 }, archetypes.get_component::<Velocity>(entity).unwrap());

	let missing = archetypes.remove_component::<Position>(entity);
	assert!(matches!(missing, Err(EcsError::ComponentNotFound { .. })));
	let missing = archetypes.get_component::<Position>(entity);
	assert!(matches!(missing, Err(EcsError::ComponentNotFound { .. })));
}

#[test]
pub fn overwriting_a_value_does_not_migrate() {
	let mut archetypes = Archetypes::new();
	let entity = archetypes.spawn().unwrap();

	archetypes.add_component(entity, Health(10)).unwrap();
	let meta = archetypes.meta(entity).unwrap();
	let tables = archetypes.table_count();

	archetypes.add_component(entity, Health(20)).unwrap();
	assert_eq!(meta, archetypes.meta(entity).unwrap());
	assert_eq!(tables, archetypes.table_count());
	assert_eq!(Health(20), archetypes.get_component::<Health>(entity).unwrap());

	archetypes.set_component(entity, Health(30)).unwrap();
	*archetypes.get_component_mut::<Health>(entity).unwrap() = Health(31);
	assert_eq!(meta, archetypes.meta(entity).unwrap());
	assert_eq!(Health(31), archetypes.get_component::<Health>(entity).unwrap());
}

#[test]
pub fn strict_entry_points_do_not_overwrite_or_add() {
	let mut archetypes = Archetypes::new();
	let entity = archetypes.spawn().unwrap();

	let missing = archetypes.set_component(entity, Health(1));
	assert!(matches!(missing, Err(EcsError::ComponentNotFound { .. })));
	assert!(!archetypes.has_component::<Health>(entity));

	archetypes.add_unique_component(entity, Health(1)).unwrap();
	let duplicate = archetypes.add_unique_component(entity, Health(2));
	assert!(matches!(duplicate, Err(EcsError::DuplicateComponent { .. })));
	assert_eq!(Health(1), archetypes.get_component::<Health>(entity).unwrap());
}

#[test]
pub fn migration_preserves_bytes_of_shared_components() {
	let mut archetypes = Archetypes::with_config(ArchetypesConfig::new().with_table_capacity(1)).unwrap();

	let entities = (0..64)
		.map(|i| {
			let entity = archetypes.spawn().unwrap();
			archetypes.add_component(entity, Position { x: i as f32, y: -(i as f32) }).unwrap();
			archetypes.add_component(entity, Aligned(i as u64 * 3)).unwrap();
			entity
		})
		.collect::<Vec<_>>();

	for (i, entity) in entities.iter().enumerate() {
		archetypes.add_component(*entity, Health(i as u32)).unwrap();
	}
	for (i, entity) in entities.iter().enumerate() {
		assert_eq!(Position { x: i as f32, y: -(i as f32) }, archetypes.get_component(*entity).unwrap());
		assert_eq!(Aligned(i as u64 * 3), archetypes.get_component(*entity).unwrap());
		assert_eq!(Health(i as u32), archetypes.get_component(*entity).unwrap());
	}

	for entity in entities.iter().step_by(2) {
		archetypes.remove_component::<Health>(*entity).unwrap();
	}
	for (i, entity) in entities.iter().enumerate() {
		assert_eq!(Position { x: i as f32, y: -(i as f32) }, archetypes.get_component(*entity).unwrap());
		assert_eq!(Aligned(i as u64 * 3), archetypes.get_component(*entity).unwrap());
		assert_eq!(i % 2 == 1, archetypes.has_component::<Health>(*entity));
		assert_eq!(*entity, archetypes.get_component::<Entity>(*entity).unwrap());
	}
}

#[test]
pub fn tags_are_shape_only() {
	let mut archetypes = Archetypes::new();
	let entity = archetypes.spawn().unwrap();
	archetypes.add_component(entity, Position { x: 4.0, y: 2.0 }).unwrap();
	let before = archetypes.table_of(entity).unwrap();

	archetypes.add_component(entity, Marker).unwrap();
	assert!(archetypes.has_component::<Marker>(entity));
	assert!(matches!(archetypes.get_component::<Marker>(entity), Err(EcsError::InvalidArgument(_))));

	let after = archetypes.table_of(entity).unwrap();
	assert_ne!(before, after);
	let before = archetypes.table(before).unwrap();
	let after = archetypes.table(after).unwrap();
	assert_eq!(before.storage_id(), after.storage_id());
	assert_ne!(before.types(), after.types());

	archetypes.add_component(entity, Frozen {}).unwrap();
	archetypes.remove_component::<Marker>(entity).unwrap();
	assert!(!archetypes.has_component::<Marker>(entity));
	assert!(archetypes.has_component::<Frozen>(entity));
	assert_eq!(Position { x: 4.0, y: 2.0 }, archetypes.get_component(entity).unwrap());
}

#[test]
pub fn entity_component_cannot_be_changed() {
	let mut archetypes = Archetypes::new();
	let entity = archetypes.spawn().unwrap();

	let removed = archetypes.remove_component::<Entity>(entity);
	assert!(matches!(removed, Err(EcsError::InvalidArgument(_))));
	let added = archetypes.add_component(entity, entity);
	assert!(matches!(added, Err(EcsError::InvalidArgument(_))));
}

#[test]
pub fn despawn_returns_rows_for_reuse() {
	let mut archetypes = Archetypes::new();
	let a = archetypes.spawn().unwrap();
	let b = archetypes.spawn().unwrap();
	let row = archetypes.meta(a).unwrap().row();

	archetypes.despawn(a).unwrap();
	let c = archetypes.spawn().unwrap();
	assert_eq!(row, archetypes.meta(c).unwrap().row());
	assert_eq!(2, archetypes.tables()[0].len());
	assert!(archetypes.is_alive(b));
}

#[test]
pub fn despawn_batch_is_all_or_nothing() {
	let mut archetypes = Archetypes::new();
	let entities = (0..4).map(|_| archetypes.spawn().unwrap()).collect::<Vec<_>>();
	let dead = archetypes.spawn().unwrap();
	archetypes.despawn(dead).unwrap();

	let result = archetypes.despawn_batch(&[entities[0], dead]);
	assert_eq!(Err(EcsError::NotAlive(dead.identity())), result);
	assert!(archetypes.is_alive(entities[0]));

	archetypes.despawn_batch(&[entities[0], entities[1], entities[0]]).unwrap();
	assert_eq!(2, archetypes.len());
	assert!(!archetypes.is_alive(entities[1]));
}

#[test]
pub fn entity_metadata_grows_past_initial_capacity() {
	let config = ArchetypesConfig::new().with_entity_capacity(1).with_table_capacity(1);
	let mut archetypes = Archetypes::with_config(config).unwrap();

	let entities = (0..100).map(|_| archetypes.spawn().unwrap()).collect::<Vec<_>>();
	for (i, entity) in entities.iter().enumerate() {
		assert_eq!(i as u32, entity.index());
		assert!(archetypes.is_alive(*entity));
	}
	assert_eq!(100, archetypes.len());
}

#[test]
pub fn invalid_configuration_is_rejected() {
	let zero_entities = Archetypes::with_config(ArchetypesConfig::new().with_entity_capacity(0));
	assert!(matches!(zero_entities, Err(EcsError::InvalidArgument(_))));

	let zero_rows = Archetypes::with_config(ArchetypesConfig::new().with_table_capacity(0));
	assert!(matches!(zero_rows, Err(EcsError::InvalidArgument(_))));
}

#[test]
pub fn tables_are_reused_per_shape() {
	let mut archetypes = Archetypes::new();
	let table = create_table!(archetypes, [Position, Velocity]).unwrap();
	assert_eq!(table, create_table!(archetypes, [Velocity, Position]).unwrap());

	let a = archetypes.spawn().unwrap();
	archetypes.add_component(a, Velocity::default()).unwrap();
	archetypes.add_component(a, Position::default()).unwrap();

	let b = archetypes.spawn().unwrap();
	archetypes.add_component(b, Position::default()).unwrap();
	archetypes.add_component(b, Velocity::default()).unwrap();

	assert_eq!(table, archetypes.table_of(a).unwrap());
	assert_eq!(table, archetypes.table_of(b).unwrap());
	assert_eq!(2, archetypes.table(table).unwrap().len());

	let rows = archetypes.table(table).unwrap();
	let storage = archetypes.storage(rows.storage_id()).unwrap();
	let found = rows.rows().filter_map(|row| rows.entity_at(row, storage)).collect::<Vec<_>>();
	assert_eq!(vec![a, b], found);

	archetypes.reserve(table, 1000).unwrap();
	let storage = archetypes.table(table).unwrap().storage_id();
	assert!(archetypes.storage(storage).unwrap().capacity() >= 1000);
}

#[test]
pub fn removal_by_storage_type() {
	let mut archetypes = Archetypes::new();
	let entity = archetypes.spawn().unwrap();
	archetypes.add_component(entity, Health(3)).unwrap();

	let ty: StorageType = Health::storage_type();
	assert!(archetypes.has_component_type(entity, ty));
	archetypes.remove_component_type(entity, ty).unwrap();
	assert!(!archetypes.has_component_type(entity, ty));
	assert_eq!(TableId::EMPTY, archetypes.table_of(entity).unwrap());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
pub fn locations_past_i32_are_rejected() {
	EntityMeta::new(TableId { index: i32::MAX as usize + 1 }, 0);
}
