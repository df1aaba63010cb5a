use crate::entities::Identity;
use crate::error::{EcsError, Result};
use crate::storage::TableId;
use std::collections::VecDeque;

/// Where an entity's row currently lives.
/// `(-1, -1)` marks a despawned slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EntityMeta {
	pub table_id: i32,
	pub row: i32,
}

impl EntityMeta {
	pub const DESPAWNED: EntityMeta = EntityMeta { table_id: -1, row: -1 };

	pub(crate) fn new(table: TableId, row: usize) -> Self {
		debug_assert!(
			table.index <= i32::MAX as usize && row <= i32::MAX as usize,
			"Entity location does not fit in an i32. Please seek help."
		);
		Self {
			table_id: table.index as i32,
			row: row as i32,
		}
	}

	pub fn is_despawned(&self) -> bool {
		self.table_id < 0
	}

	pub fn table(&self) -> TableId {
		debug_assert!(!self.is_despawned());
		TableId { index: self.table_id as usize }
	}

	pub fn row(&self) -> usize {
		debug_assert!(!self.is_despawned());
		self.row as usize
	}
}

impl Default for EntityMeta {
	fn default() -> Self {
		Self::DESPAWNED
	}
}

/// Generation counters and table locations for every entity slot, plus the recycle queue.
pub(crate) struct EntityMetas {
	generations: Vec<u32>,
	metas: Vec<EntityMeta>,
	free: VecDeque<u32>,
	issued: u32,
	alive: usize,
}

impl EntityMetas {
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			generations: vec![1; capacity],
			metas: vec![EntityMeta::DESPAWNED; capacity],
			free: VecDeque::new(),
			issued: 0,
			alive: 0,
		}
	}

	/// Take a recycled slot, or issue a fresh one, growing the arrays geometrically.
	pub fn allocate(&mut self) -> Identity {
		let index = match self.free.pop_front() {
			Some(index) => index,
			None => {
				let index = self.issued;
				if index as usize >= self.generations.len() {
					self.grow();
				}
				self.issued += 1;
				index
			},
		};

		self.alive += 1;
		Identity {
			index,
			generation: self.generations[index as usize],
		}
	}

	/// Retire a slot: bump its generation and queue the index for reuse.
	pub fn release(&mut self, identity: Identity) -> Result<()> {
		if !self.is_issued(identity) {
			return Err(EcsError::NotAlive(identity));
		}
		let index = identity.index as usize;

		self.metas[index] = EntityMeta::DESPAWNED;
		self.generations[index] = self.generations[index].wrapping_add(1);
		self.free.push_back(identity.index);
		self.alive -= 1;
		Ok(())
	}

	pub fn is_alive(&self, identity: Identity) -> bool {
		self.is_issued(identity) && !self.metas[identity.index as usize].is_despawned()
	}

	/// The slot was handed out with this generation, whether or not it has been placed in a table yet.
	fn is_issued(&self, identity: Identity) -> bool {
		let index = identity.index as usize;
		index < self.issued as usize && self.generations[index] == identity.generation
	}

	pub fn get(&self, identity: Identity) -> Result<EntityMeta> {
		if !self.is_alive(identity) {
			return Err(EcsError::NotAlive(identity));
		}
		Ok(self.metas[identity.index as usize])
	}

	pub fn set(&mut self, identity: Identity, meta: EntityMeta) {
		debug_assert!(self.is_issued(identity));
		self.metas[identity.index as usize] = meta;
	}

	pub fn alive(&self) -> usize {
		self.alive
	}

	fn grow(&mut self) {
		let capacity = usize::max(1, self.generations.len() * 2);
		log::trace!("growing entity metadata from {} to {} slots", self.generations.len(), capacity);

		self.generations.resize(capacity, 1);
		self.metas.resize(capacity, EntityMeta::DESPAWNED);
	}
}
