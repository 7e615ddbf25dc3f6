mod memory;

pub use memory::MemoryDirectory;
