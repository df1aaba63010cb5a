use crate::storage::{Table, TableId, TableStorage};
use crate::error::{EcsError, Result};
use crate::entities::Identity;

/// Move `identity`'s row from table `old` to table `new`, returning its new row.
///
/// Values of column types present in both shapes are byte-copied; object component lists
/// for types present in both shapes are re-keyed under the new table. When both tables share
/// a storage the row changes owner in place and nothing is copied.
pub(crate) fn move_entry(
	identity: Identity, old_row: usize, old: TableId, new: TableId, tables: &mut [Table],
	storages: &mut [TableStorage],
) -> Result<usize> {
	if old == new {
		return Ok(old_row);
	}

	let (src, dst) = pair_mut(tables, old.index, new.index);
	if !src.owns_row(old_row) {
		return Err(EcsError::invalid(format!("row {} does not belong to table {}", old_row, old.index)));
	}

	let new_row = if src.storage_id() == dst.storage_id() {
		src.release_row(old_row)?;
		dst.adopt_row(old_row);
		old_row
	} else {
		let (src_storage, dst_storage) =
			pair_mut(storages, src.storage_id().index, dst.storage_id().index);

		let new_row = dst.add(identity, dst_storage)?;
		TableStorage::copy_row(src_storage, old_row, dst_storage, new_row);
		src.remove(old_row, src_storage)?;
		new_row
	};

	let types = src.types().clone();
	for ty in types.iter().filter(|t| t.is_object()) {
		if let Some(values) = src.objects.take(identity.index, ty.id()) {
			if dst.types().contains(ty) {
				dst.objects.put(identity.index, ty.id(), values);
			}
		}
	}

	Ok(new_row)
}

/// Borrow two distinct elements of a slice mutably.
pub(crate) fn pair_mut<T>(slice: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
	assert_ne!(a, b, "pair_mut requires two distinct indices");
	if a < b {
		let (left, right) = slice.split_at_mut(b);
		(&mut left[a], &mut right[0])
	} else {
		let (left, right) = slice.split_at_mut(a);
		(&mut right[0], &mut left[b])
	}
}
