//! Raw storage: uninitialised chunks and the table that owns them.

pub(crate) mod chunk;
pub(crate) mod table;

pub(crate) use chunk::Chunk;
pub(crate) use table::{ChunkTable, GrowFailure};
