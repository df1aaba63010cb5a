use crate::components::ComponentId;
use crate::storage::TableId;
use std::hash::Hash;

/// A cached structural change: which table an entity of `table` lands in
/// after adding or removing `component`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) struct ArchetypeTransition {
	pub table: TableId,
	pub component: ComponentId,
	pub kind: ArchetypeTransitionKind,
}

#[repr(u64)]
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub(crate) enum ArchetypeTransitionKind {
	Add = 0,
	Remove = 1,
}

impl Hash for ArchetypeTransition {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		let kind = self.kind as u64;
		let table = (self.table.index as u64) << 33;
		let component = (self.component.value() as u64) << 1;
		state.write_u64(kind | table | component);
	}
}
