use crate::env::GoEnvironment;
use crate::errors::GoenvError;
use crate::helpers::{escape_double_quoted, normalize_path};
use serde::Serialize;
use starbase_styles::color;
use starbase_utils::fs;
use std::env;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::{debug, info};

const ACTIVATE_TEMPLATE: &str = include_str!("../templates/activate.sh.tpl");

/// Values substituted into the activation script. Every value is escaped
/// for a double quoted shell string.
#[derive(Debug, Default, Serialize)]
pub struct ActivateContext {
    pub gobin: String,
    pub gocache: String,
    pub gopath: String,
    pub goroot: String,
    pub prompt: String,
    pub version: String,
}

/// Binds an extracted toolchain to an isolated environment.
pub struct EnvironmentMaterializer<'env> {
    env: &'env GoEnvironment,
}

impl<'env> EnvironmentMaterializer<'env> {
    pub fn new(env: &'env GoEnvironment) -> Self {
        Self { env }
    }

    pub fn get_activate_path(&self) -> PathBuf {
        self.env.bin_dir.join("activate")
    }

    /// Derive the Go variables for the environment. The environment root
    /// always comes first in GOPATH, followed by the extra paths.
    pub fn create_context(
        &self,
        install_dir: &Path,
        version: &str,
        extra_paths: &[PathBuf],
    ) -> Result<ActivateContext, GoenvError> {
        let mut gopath = vec![self.env.root.clone()];
        gopath.extend(extra_paths.iter().cloned());

        Ok(ActivateContext {
            gobin: path_to_string(&self.env.bin_dir),
            gocache: path_to_string(&self.env.cache_dir),
            gopath: escape_double_quoted(&join_gopath(&gopath)?),
            goroot: path_to_string(&get_goroot(install_dir)),
            prompt: get_prompt_label(&self.env.get_name()),
            version: escape_double_quoted(version),
        })
    }

    /// Render the activation script and write it to `<root>/bin/activate`,
    /// replacing any previous script.
    pub fn materialize(
        &self,
        install_dir: &Path,
        version: &str,
        extra_paths: &[PathBuf],
    ) -> Result<PathBuf, GoenvError> {
        let script_path = self.get_activate_path();
        let context = self.create_context(install_dir, version, extra_paths)?;

        debug!(
            script = ?script_path,
            goroot = %context.goroot,
            gopath = %context.gopath,
            "Creating activation script"
        );

        fs::create_dir_all(&self.env.bin_dir)?;
        fs::write_file(&script_path, render_activate_script(&context, &script_path)?)?;

        info!("Created activation script {}", color::path(&script_path));

        Ok(script_path)
    }
}

pub fn render_activate_script(
    context: &ActivateContext,
    script_path: &Path,
) -> Result<String, GoenvError> {
    let handle_error = |error: tera::Error| GoenvError::Template {
        path: script_path.to_path_buf(),
        error,
    };

    let mut tera = Tera::default();

    tera.add_raw_template("activate.sh", ACTIVATE_TEMPLATE)
        .map_err(handle_error)?;

    tera.render(
        "activate.sh",
        &Context::from_serialize(context).map_err(handle_error)?,
    )
    .map_err(handle_error)
}

/// Label shown in the shell prompt. PS1 is re-expanded on every prompt, so
/// anything outside a small safe set becomes `_`.
pub fn get_prompt_label(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | '@' | '+' | ' ') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

pub fn get_goroot(install_dir: &Path) -> PathBuf {
    install_dir.join("go")
}

/// Join paths with the platform's search path separator.
pub fn join_gopath(paths: &[PathBuf]) -> Result<String, GoenvError> {
    for path in paths {
        if env::join_paths([path]).is_err() {
            return Err(GoenvError::InvalidGopath(path.to_path_buf()));
        }
    }

    env::join_paths(paths)
        .map(|joined| joined.to_string_lossy().into_owned())
        .map_err(|_| GoenvError::InvalidGopath(PathBuf::new()))
}

/// Find workspaces within the environment root that should be added to
/// GOPATH: immediate, non-hidden child directories containing a `src`
/// directory. Paths in `exclude` are skipped.
pub fn find_gopath_entries(root: &Path, exclude: &[PathBuf]) -> Result<Vec<PathBuf>, GoenvError> {
    let mut entries = vec![];

    if !root.is_dir() {
        return Ok(entries);
    }

    let exclude = exclude
        .iter()
        .map(|path| normalize_path(path))
        .collect::<Vec<_>>();

    for entry in fs::read_dir(root)? {
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');

        if hidden || !path.is_dir() || !path.join("src").is_dir() {
            continue;
        }

        if exclude.contains(&normalize_path(&path)) {
            debug!(path = ?path, "Excluding directory from GOPATH");

            continue;
        }

        entries.push(path);
    }

    entries.sort();

    Ok(entries)
}

/// Instructions printed when only installing, with exports for each
/// shell family.
pub fn format_install_instructions(goroot: &Path) -> String {
    let goroot = goroot.display();

    format!(
        r#"Go installed, run the following commands (for your shell) to start using Go.

bash/zsh:

    export GOROOT={goroot}
    export PATH="{goroot}/bin:${{PATH}}"

csh/tcsh:

    setenv GOROOT {goroot}
    setenv PATH {goroot}/bin:$PATH

fish:

    set -xg GOROOT {goroot}
    set -xg PATH {goroot}/bin $PATH
"#
    )
}

fn path_to_string(path: &Path) -> String {
    escape_double_quoted(&path.to_string_lossy())
}
