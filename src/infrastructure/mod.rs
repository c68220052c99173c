pub mod desktop;
pub mod in_memory;
