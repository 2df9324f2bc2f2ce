mod document;
mod reader;

pub use document::*;
pub use reader::load_session_log;

#[cfg(test)]
mod tests;
