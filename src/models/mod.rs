pub mod file;

pub use file::ResolvedFile;
