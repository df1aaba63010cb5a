use std::ops::{Deref, DerefMut};
use parking_lot::Mutex;
use std::sync::Arc;

/// A shared free-list of reusable scratch values.
///
/// Values are returned to the pool when their [PoolBorrow] is dropped.
/// Borrowed values keep whatever contents they had when they were returned.
#[derive(Default)]
pub struct Pool<T: Default> {
	values: Arc<Mutex<Vec<T>>>,
}

pub struct PoolBorrow<T> {
	value: Option<T>,
	values: Arc<Mutex<Vec<T>>>,
}

impl<T: Default> Pool<T> {
	pub fn take_one(&self) -> PoolBorrow<T> {
		let value = self.values.lock().pop().unwrap_or_default();
		PoolBorrow {
			value: Some(value),
			values: self.values.clone(),
		}
	}

	/// Number of values currently resting in the pool.
	pub fn idle(&self) -> usize {
		self.values.lock().len()
	}
}

impl<T> Deref for PoolBorrow<T> {
	type Target = T;
	fn deref(&self) -> &Self::Target {
		match &self.value {
			Some(value) => value,
			None => unreachable!("pool borrow is only emptied on drop"),
		}
	}
}

impl<T> DerefMut for PoolBorrow<T> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		match &mut self.value {
			Some(value) => value,
			None => unreachable!("pool borrow is only emptied on drop"),
		}
	}
}

impl<T> Drop for PoolBorrow<T> {
	fn drop(&mut self) {
		if let Some(value) = self.value.take() {
			self.values.lock().push(value);
		}
	}
}
