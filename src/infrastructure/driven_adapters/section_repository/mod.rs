//! Section Repository Implementations

mod json_file;

pub use json_file::JsonFileSectionRepository;
