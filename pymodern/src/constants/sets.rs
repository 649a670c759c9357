use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Returns default folders excluded from scanning.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut set = FxHashSet::default();
        for folder in [
            "__pycache__",
            ".pytest_cache",
            ".mypy_cache",
            ".ruff_cache",
            ".tox",
            "htmlcov",
            ".coverage",
            "*.egg-info",
            ".eggs",
            "venv",
            ".venv",
            "env",
            ".env",
            ".nox",
            ".pytype",
            "build",
            "dist",
            "site-packages",
            "node_modules",
            ".npm",
            "target",
            "vendor",
            ".git",
            ".svn",
            ".hg",
            ".idea",
            ".vscode",
            ".vs",
            ".cache",
            ".tmp",
            "tmp",
            "logs",
        ] {
            set.insert(folder);
        }
        set
    })
}

/// Returns the `typing` names with a builtin generic replacement (PEP 585).
pub fn get_legacy_typing_aliases() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut set = FxHashSet::default();
        for name in ["List", "Dict", "Set", "Tuple", "FrozenSet", "Type"] {
            set.insert(name);
        }
        set
    })
}

/// Returns the `os.path` function names most commonly replaced by `pathlib`.
pub fn get_os_path_functions() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut set = FxHashSet::default();
        for name in [
            "join", "exists", "isfile", "isdir", "basename", "dirname", "splitext", "abspath",
            "getsize", "expanduser", "realpath", "relpath",
        ] {
            set.insert(name);
        }
        set
    })
}
