use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use codespan_reporting::diagnostic::{Diagnostic, Label};
use serde::Deserialize;
use tracing::info;

use renderer::template::{self, TemplateSet};

use crate::error::CliError;

pub const CONFIG_FILE_NAME: &str = ".docblox2md.toml";

/// On-disk configuration. Only the `[output]` template overrides are read.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    output: toml::Table,
}

/// Places a config file is looked for, most specific first: the working
/// directory, the home directory, then the directory holding the executable.
pub fn candidate_paths(cwd: &Path, home: Option<&Path>, install: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![cwd.join(CONFIG_FILE_NAME)];
    paths.extend(
        [home, install]
            .into_iter()
            .flatten()
            .map(|dir| dir.join(CONFIG_FILE_NAME)),
    );
    paths
}

/// The first candidate that exists.
pub fn discover(cwd: &Path, home: Option<&Path>, install: Option<&Path>) -> Option<PathBuf> {
    candidate_paths(cwd, home, install)
        .into_iter()
        .find(|path| path.is_file())
}

fn install_dir() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    exe.parent().map(Path::to_path_buf)
}

/// Build the template set for this run: an explicit file if given,
/// otherwise the first discovered one, otherwise the built-in defaults.
pub fn resolve_templates(explicit: Option<&Path>) -> Result<TemplateSet, CliError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let home = env::var_os("HOME").map(PathBuf::from);
            discover(&cwd, home.as_deref(), install_dir().as_deref())
        }
    };

    match path {
        Some(path) => {
            info!("using custom config {}", path.display());
            load_templates(&path)
        }
        None => Ok(TemplateSet::default()),
    }
}

pub fn load_templates(path: &Path) -> Result<TemplateSet, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_templates(path, text)
}

/// Merge the `[output]` table of a config file over the default templates.
pub fn parse_templates(path: &Path, text: String) -> Result<TemplateSet, CliError> {
    match toml::from_str::<ConfigFile>(&text) {
        Ok(config) => Ok(template::merge(&TemplateSet::default(), &config.output)),
        Err(error) => Err(CliError::ConfigParse {
            path: path.to_path_buf(),
            text,
            error,
        }),
    }
}

/// Convert a TOML error to a codespan-reporting Diagnostic for display.
pub fn parse_error_diagnostic(error: &toml::de::Error, file_id: usize) -> Diagnostic<usize> {
    let diagnostic = Diagnostic::error().with_message("invalid configuration file");
    match error.span() {
        Some(span) => diagnostic
            .with_labels(vec![Label::primary(file_id, span).with_message(error.message())]),
        None => diagnostic.with_notes(vec![error.message().to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use renderer::template::Fields;

    use super::*;

    fn write(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, text).expect("write config");
        path
    }

    #[test]
    fn working_directory_wins_over_home() {
        let cwd = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let home_config = write(home.path(), "");

        assert_eq!(discover(cwd.path(), Some(home.path()), None), Some(home_config));

        let cwd_config = write(cwd.path(), "");
        assert_eq!(discover(cwd.path(), Some(home.path()), None), Some(cwd_config));
    }

    #[test]
    fn install_directory_is_the_last_resort() {
        let cwd = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let install = tempfile::tempdir().unwrap();
        let install_config = write(install.path(), "");

        assert_eq!(
            discover(cwd.path(), Some(home.path()), Some(install.path())),
            Some(install_config)
        );

        let home_config = write(home.path(), "");
        assert_eq!(
            discover(cwd.path(), Some(home.path()), Some(install.path())),
            Some(home_config)
        );
    }

    #[test]
    fn candidates_keep_their_order() {
        let paths = candidate_paths(Path::new("/work"), None, Some(Path::new("/opt/bin")));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work").join(CONFIG_FILE_NAME),
                PathBuf::from("/opt/bin").join(CONFIG_FILE_NAME),
            ]
        );
    }

    #[test]
    fn nothing_discovered_without_files() {
        let cwd = tempfile::tempdir().unwrap();
        assert_eq!(discover(cwd.path(), None, None), None);
    }

    #[test]
    fn output_table_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"
[output.header]
pre = "\n---\n"

[output.params]
item = { template = "{name} | {type} | {desc}\n" }
"#,
        );
        let templates = load_templates(&path).expect("config to load");
        let fields = Fields::new().with("name", "a").with("type", "int");

        assert_eq!(templates.header.pre.apply(&Fields::new()), "\n---\n");
        assert_eq!(templates.params.item.apply(&fields), "a | int | \n");
        assert_eq!(templates.returns.post.apply(&Fields::new()), "");
    }

    #[test]
    fn empty_file_means_defaults() {
        let templates = parse_templates(Path::new("empty.toml"), String::new()).unwrap();
        let fields = Fields::new().with("text", "x");
        assert_eq!(templates.header.item.apply(&fields), "`x`\n");
    }

    #[test]
    fn syntax_errors_keep_their_span() {
        let err = parse_templates(Path::new("bad.toml"), "[output\n".to_string()).unwrap_err();
        match err {
            CliError::ConfigParse { error, text, .. } => {
                assert_eq!(text, "[output\n");
                assert!(error.span().is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_templates(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }
}
