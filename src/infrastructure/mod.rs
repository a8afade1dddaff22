pub mod command_store;
pub mod session_file;

pub use command_store::FileCommandStore;
pub use session_file::FileSessionStore;
