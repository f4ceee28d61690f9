//! Low-level utilities: hashing, layout, persistence, file copying.

pub mod copy;
pub mod hash;
pub mod layout;
pub mod store;
pub mod text;
