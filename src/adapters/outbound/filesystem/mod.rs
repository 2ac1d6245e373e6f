/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod key_file_store;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use key_file_store::KeyFileStore;
