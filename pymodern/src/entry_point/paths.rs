use crate::cli::Cli;

/// Validates that --root and positional paths are not used together.
/// Returns Ok(()) if valid, Err(2) if both are provided.
pub(crate) fn validate_path_args(cli: &Cli) -> Result<(), i32> {
    if cli.root.is_some() && !cli.paths.is_empty() {
        eprintln!("Error: Cannot use both --root and positional path arguments");
        return Err(2);
    }
    Ok(())
}

/// Resolves effective paths and audit root based on CLI arguments.
///
/// `--root` doubles as the only audit path and the relative-path boundary;
/// otherwise the root is the common ancestor of any absolute paths, or `.`.
pub(crate) fn resolve_audit_context(cli: &Cli) -> (Vec<std::path::PathBuf>, std::path::PathBuf) {
    if let Some(ref root) = cli.root {
        return (vec![root.clone()], root.clone());
    }

    let paths = if cli.paths.is_empty() {
        vec![std::path::PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };

    let mut root = std::path::PathBuf::from(".");
    if let Some(first_abs) = paths.iter().find(|p| p.is_absolute()) {
        let mut common = if first_abs.is_dir() {
            first_abs.clone()
        } else {
            first_abs
                .parent()
                .map(std::path::Path::to_path_buf)
                .unwrap_or_else(|| first_abs.clone())
        };

        for path in paths.iter().filter(|p| p.is_absolute()) {
            while !path.starts_with(&common) {
                if let Some(parent) = common.parent() {
                    common = parent.to_path_buf();
                } else {
                    break;
                }
            }
        }
        root = common;
    }

    (paths, root)
}

/// Checks that every audit path exists. Returns Err(2) on the first missing one.
pub(crate) fn check_paths_exist(paths: &[std::path::PathBuf]) -> Result<(), i32> {
    for path in paths {
        if !path.exists() {
            eprintln!(
                "Error: The file or directory '{}' does not exist.",
                path.display()
            );
            return Err(2);
        }
    }
    Ok(())
}
