pub mod clipboard;
pub mod http;

pub use clipboard::{copy_to_clipboard, ClipboardWriter};
pub use http::HttpClient;
