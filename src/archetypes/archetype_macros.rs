/// Get or create the table holding exactly the listed component types in an
/// [Archetypes](crate::archetypes::Archetypes) store.
///
/// ```ignore
/// let table = create_table!(archetypes, [Position, Velocity])?;
/// ```
#[macro_export]
macro_rules! create_table {
    ($archetypes: expr, [$($t: ty),*]) => {
		$archetypes.table_for(&$crate::components::TypeSet::new([
			$(<$t as $crate::components::ComponentTypeInfo>::storage_type()),*
		]))
	};
}
