//! Base-directory and filename resolution.
//!
//! Filenames only ever get metadata substitution. Directories additionally
//! understand two shorthands in metadata-templated paths: a leading `./`
//! roots the remainder under the run's default input folder, and a leading
//! `&/` roots it under the default output folder.

use std::path::PathBuf;

use crate::config::FolderChoice;
use crate::context::RunContext;

/// Compute the directory the configured images are loaded from.
pub fn resolve_base_directory(
    folder: FolderChoice,
    custom_path: &str,
    ctx: &RunContext,
) -> PathBuf {
    match folder {
        FolderChoice::DefaultInput => ctx.default_input_dir().to_path_buf(),
        FolderChoice::DefaultOutput => ctx.default_output_dir().to_path_buf(),
        FolderChoice::Custom => expand(custom_path),
        FolderChoice::CustomWithMetadata => {
            let substituted = ctx.substitute_metadata(custom_path);
            if let Some(rest) = strip_shorthand(&substituted, '.') {
                ctx.default_input_dir().join(rest)
            } else if let Some(rest) = strip_shorthand(&substituted, '&') {
                ctx.default_output_dir().join(rest)
            } else {
                expand(&substituted)
            }
        }
    }
}

/// Substitute run metadata into a filename template. No path manipulation.
pub fn resolve_file_name(template: &str, ctx: &RunContext) -> String {
    ctx.substitute_metadata(template)
}

/// `<sigil>/rest` or `<sigil>\rest` → `rest`. The sigil alone, or a sigil
/// followed by anything else, is not shorthand.
fn strip_shorthand(path: &str, sigil: char) -> Option<&str> {
    let rest = path.strip_prefix(sigil)?;
    rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\'))
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn context() -> RunContext {
        RunContext::new("/data/in", "/data/out").with_metadata("Plate", "P01")
    }

    #[test]
    fn test_default_input_choice() {
        let ctx = context();
        let dir = resolve_base_directory(FolderChoice::DefaultInput, "ignored", &ctx);
        assert_eq!(dir, Path::new("/data/in"));
    }

    #[test]
    fn test_default_output_choice() {
        let ctx = context();
        let dir = resolve_base_directory(FolderChoice::DefaultOutput, "ignored", &ctx);
        assert_eq!(dir, Path::new("/data/out"));
    }

    #[test]
    fn test_custom_choice_does_not_substitute() {
        let ctx = context();
        let dir = resolve_base_directory(FolderChoice::Custom, "/images/\\g<Plate>", &ctx);
        assert_eq!(dir, Path::new("/images/\\g<Plate>"));
    }

    #[test]
    fn test_metadata_choice_substitutes() {
        let ctx = context();
        let dir =
            resolve_base_directory(FolderChoice::CustomWithMetadata, "/images/\\g<Plate>", &ctx);
        assert_eq!(dir, Path::new("/images/P01"));
    }

    #[test]
    fn test_input_shorthand_roots_under_input_dir() {
        let ctx = context();
        let dir = resolve_base_directory(FolderChoice::CustomWithMetadata, "./\\g<Plate>", &ctx);
        assert_eq!(dir, Path::new("/data/in/P01"));
    }

    #[test]
    fn test_output_shorthand_roots_under_output_dir() {
        let ctx = context();
        let dir = resolve_base_directory(FolderChoice::CustomWithMetadata, "&/\\g<Plate>", &ctx);
        assert_eq!(dir, Path::new("/data/out/P01"));
    }

    #[test]
    fn test_backslash_shorthand_variant() {
        let ctx = context();
        let dir = resolve_base_directory(FolderChoice::CustomWithMetadata, ".\\plates", &ctx);
        assert_eq!(dir, Path::new("/data/in").join("plates"));
    }

    #[test]
    fn test_bare_dot_is_not_shorthand() {
        let ctx = context();
        let dir = resolve_base_directory(FolderChoice::CustomWithMetadata, ".", &ctx);
        assert_eq!(dir, Path::new("."));
    }

    #[test]
    fn test_dotfile_prefix_is_not_shorthand() {
        let ctx = context();
        let dir = resolve_base_directory(FolderChoice::CustomWithMetadata, ".hidden/x", &ctx);
        assert_eq!(dir, Path::new(".hidden/x"));
    }

    #[test]
    fn test_resolve_file_name_substitutes() {
        let ctx = context();
        assert_eq!(
            resolve_file_name("illum_\\g<Plate>.tif", &ctx),
            "illum_P01.tif"
        );
    }

    #[test]
    fn test_resolve_file_name_leaves_unknown_tags() {
        let ctx = context();
        assert_eq!(
            resolve_file_name("illum_\\g<Site>.tif", &ctx),
            "illum_\\g<Site>.tif"
        );
    }
}
