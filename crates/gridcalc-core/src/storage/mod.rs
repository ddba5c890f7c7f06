//! Storage for persisted grid state: the JSON slot format and the slot backends.

mod json;
mod slot;

pub use json::{decode_state, encode_state};
pub use slot::{DirStorage, MemoryStorage, SlotStorage};
