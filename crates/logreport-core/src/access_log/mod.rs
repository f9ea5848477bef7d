mod parser;
mod reader;
mod selector;

pub use parser::{LineParser, ParsedRecord};
pub use reader::RecordReader;
pub use selector::{LogFileDescriptor, select_latest};
