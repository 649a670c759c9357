/// Maximum recursion depth for AST traversal to prevent stack overflow on deeply nested code.
pub const MAX_RECURSION_DEPTH: usize = 400;
/// Number of files to process per chunk in parallel processing.
pub const CHUNK_SIZE: usize = 500;
/// Default configuration filename.
pub const CONFIG_FILENAME: &str = ".pymodern.toml";
/// Python project configuration filename.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";
/// Reserved rule ID for files that fail to parse or cannot be read.
pub const RULE_ID_PARSE_ERROR: &str = "PM000";
/// Maximum number of characters of matched source kept in a finding snippet.
pub const MAX_SNIPPET_CHARS: usize = 120;
/// Default file extensions included in a scan.
pub const DEFAULT_EXTENSIONS: &[&str] = &["py", "pyi"];
