pub mod task_parser;
pub mod task_serializer;

pub use task_parser::{DroppedLine, LineError, parse_record, parse_tasks};
pub use task_serializer::{serialize_record, serialize_tasks};

/// Escape sequences in task text and the characters they stand for.
/// A backslash outside these sequences is an ordinary character.
const ESCAPES: [(&str, char); 3] = [("\\x0A", '\n'), ("\\x0D", '\r'), ("\\x5C", '\\')];
