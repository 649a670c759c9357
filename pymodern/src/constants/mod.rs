//! Shared limits, filename constants, lazily compiled regexes, and name sets.

mod limits;
mod regexes;
mod sets;

pub use limits::{
    CHUNK_SIZE, CONFIG_FILENAME, DEFAULT_EXTENSIONS, MAX_RECURSION_DEPTH, MAX_SNIPPET_CHARS,
    PYPROJECT_FILENAME, RULE_ID_PARSE_ERROR,
};
pub use regexes::{get_rule_id_re, get_suppression_re};
pub use sets::{get_default_exclude_folders, get_legacy_typing_aliases, get_os_path_functions};

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_legacy_typing_aliases as LEGACY_TYPING_ALIASES;
pub use get_os_path_functions as OS_PATH_FUNCTIONS;
pub use get_rule_id_re as RULE_ID_RE;
pub use get_suppression_re as SUPPRESSION_RE;
