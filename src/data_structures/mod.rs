mod pool;
mod column;
mod bit_field;
mod range_allocator;

pub use pool::*;
pub use bit_field::*;
pub use range_allocator::*;

pub(crate) use column::*;
