pub mod cards;
pub mod collection;
pub mod sets;
