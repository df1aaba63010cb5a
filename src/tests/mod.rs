use crate::components::{Component, ObjectComponent};

mod type_set_tests;
mod archetypes_tests;

#[derive(Component, Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Copy, Clone, Debug, Default, PartialEq)]
pub struct Velocity {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Health(pub u32);

#[derive(Component, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(align(16))]
pub struct Aligned(pub u64);

#[derive(Component, Copy, Clone, Debug, Default)]
pub struct Marker;

#[derive(Component, Copy, Clone, Debug, Default)]
pub struct Frozen {}

#[derive(ObjectComponent, Debug, PartialEq, Eq)]
pub struct Name(pub String);

#[derive(ObjectComponent, Debug)]
pub struct Script(pub &'static str);
