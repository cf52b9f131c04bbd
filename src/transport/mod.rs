//! View-scoped background streams: per-order chat and per-key file
//! notifications. Tasks are spawned on view mount and cancelled on unmount
//! via a shared flag read between awaits.

pub mod chat;
pub mod files;

pub use chat::{ChatError, ChatHandle, ChatOutgoing};
pub use files::{FileBatch, FileError, FileKeyBinding, FileWatcher};
