//! Errors raised by the store. Every failure is a caller contract violation;
//! nothing is retried and nothing is logged here.

use crate::entities::Identity;
use thiserror::Error;

pub type Result<T, E = EcsError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
	/// The identity's generation does not match its slot, or the index was never issued.
	#[error("entity {0} is not alive")]
	NotAlive(Identity),

	#[error("entity {entity} has no component {component}")]
	ComponentNotFound {
		entity: Identity,
		component: &'static str,
	},

	#[error("entity {entity} already has component {component}")]
	DuplicateComponent {
		entity: Identity,
		component: &'static str,
	},

	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("the query yielded no elements")]
	NoElements,

	#[error("the query yielded more than one element")]
	MoreThanOneElements,
}

impl EcsError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		EcsError::InvalidArgument(message.into())
	}
}
