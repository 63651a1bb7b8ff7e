//! Template directory resolution.
//! Finds the template root whose `hooks/source` directory holds the files
//! to copy, trying a fixed list of strategies in priority order.

use log::debug;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEPLOYMENT_PATHS, DEVELOPER_PATHS, HIDDEN_TEMPLATE_DIR, HOOKS_DIR, SOURCE_DIR,
    TEMPLATE_PATH_ENV,
};
use crate::error::{Error, Result};

/// A way of guessing where the template root lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Template root given on the command line, via env or by the host payload
    Override,
    /// `source` directory next to the running hook binary
    SelfRelative,
    /// `hooks/source` or `.template/hooks/source` in the project dir or any parent
    UpwardSearch,
    /// Fixed container install locations
    DeploymentPaths,
    /// Checkouts under the user's home directory
    DeveloperPaths,
}

impl Strategy {
    /// Strategies in the order they are tried.
    pub const ORDER: [Strategy; 5] = [
        Strategy::Override,
        Strategy::SelfRelative,
        Strategy::UpwardSearch,
        Strategy::DeploymentPaths,
        Strategy::DeveloperPaths,
    ];

    /// Lists the locations this strategy would probe, most specific first.
    pub fn candidates(&self, ctx: &ResolveContext) -> Vec<Candidate> {
        match self {
            Strategy::Override => ctx
                .template_override
                .iter()
                .map(Candidate::template_root)
                .collect(),
            Strategy::SelfRelative => ctx
                .hook_path
                .as_deref()
                .and_then(Path::parent)
                .and_then(|hook_dir| {
                    let template_dir = hook_dir.parent()?;
                    Some(Candidate {
                        template_dir: template_dir.to_path_buf(),
                        source_dir: hook_dir.join(SOURCE_DIR),
                    })
                })
                .into_iter()
                .collect(),
            Strategy::UpwardSearch => ctx
                .project_dir
                .ancestors()
                .flat_map(|dir| {
                    [
                        Candidate::template_root(dir),
                        Candidate::template_root(dir.join(HIDDEN_TEMPLATE_DIR)),
                    ]
                })
                .collect(),
            Strategy::DeploymentPaths => ctx
                .deployment_paths
                .iter()
                .map(Candidate::template_root)
                .collect(),
            Strategy::DeveloperPaths => ctx
                .developer_paths
                .iter()
                .map(Candidate::template_root)
                .collect(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Override => "explicit template directory",
            Strategy::SelfRelative => "hook location",
            Strategy::UpwardSearch => "upward search",
            Strategy::DeploymentPaths => "deployment paths",
            Strategy::DeveloperPaths => "developer paths",
        };
        f.write_str(name)
    }
}

/// A single probed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub template_dir: PathBuf,
    pub source_dir: PathBuf,
}

impl Candidate {
    /// Candidate for a template root laid out as `<root>/hooks/source`.
    pub fn template_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            template_dir: root.to_path_buf(),
            source_dir: root.join(HOOKS_DIR).join(SOURCE_DIR),
        }
    }
}

/// Everything the resolver reads from its surroundings.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// Generated project root; relative candidates are joined onto it
    pub project_dir: PathBuf,
    /// Path of the running hook file
    pub hook_path: Option<PathBuf>,
    pub template_override: Option<PathBuf>,
    pub deployment_paths: Vec<PathBuf>,
    pub developer_paths: Vec<PathBuf>,
}

impl ResolveContext {
    /// Context that only searches upward from `project_dir`.
    pub fn new<P: Into<PathBuf>>(project_dir: P) -> Self {
        Self {
            project_dir: project_dir.into(),
            ..Default::default()
        }
    }

    /// Context built from the running process: its executable path, the
    /// built-in deployment paths and the current user's developer paths.
    pub fn from_environment<P: Into<PathBuf>>(
        project_dir: P,
        template_override: Option<PathBuf>,
    ) -> Self {
        let hook_path = match std::env::current_exe() {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("Cannot determine hook location: {e}");
                None
            }
        };

        Self {
            project_dir: project_dir.into(),
            hook_path,
            template_override,
            deployment_paths: DEPLOYMENT_PATHS.iter().map(PathBuf::from).collect(),
            developer_paths: developer_paths(
                dirs::home_dir().as_deref(),
                std::env::var_os(TEMPLATE_PATH_ENV),
            ),
        }
    }
}

/// Builds the developer path list: built-in locations under `home`, then each
/// entry of `extra` (a platform path list). Relative extras are joined onto `home`.
pub fn developer_paths(home: Option<&Path>, extra: Option<OsString>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    match home {
        Some(home) => paths.extend(DEVELOPER_PATHS.iter().map(|rel| home.join(rel))),
        None => debug!("No home directory, skipping built-in developer paths"),
    }

    if let Some(extra) = extra {
        for path in std::env::split_paths(&extra) {
            if path.as_os_str().is_empty() {
                continue;
            }
            match (path.is_absolute(), home) {
                (true, _) => paths.push(path),
                (false, Some(home)) => paths.push(home.join(path)),
                (false, None) => debug!(
                    "Ignoring relative {} entry '{}' without a home directory",
                    TEMPLATE_PATH_ENV,
                    path.display()
                ),
            }
        }
    }

    paths
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub strategy: Strategy,
    pub template_dir: PathBuf,
    pub source_dir: PathBuf,
}

/// Tries every strategy in [`Strategy::ORDER`] and returns the first
/// candidate whose source directory exists.
///
/// # Errors
/// * `Error::TemplateNotFound` listing every probed path if nothing matches
pub fn resolve_template_dir(ctx: &ResolveContext) -> Result<Resolution> {
    let mut tried = Vec::new();
    let mut seen = HashSet::new();

    for strategy in Strategy::ORDER {
        for candidate in strategy.candidates(ctx) {
            let template_dir = absolutize(&ctx.project_dir, candidate.template_dir);
            let source_dir = absolutize(&ctx.project_dir, candidate.source_dir);
            if !seen.insert(source_dir.clone()) {
                continue;
            }

            debug!("Checking {} candidate: {}", strategy, source_dir.display());
            if source_dir.is_dir() {
                debug!("Found template directory: {}", template_dir.display());
                return Ok(Resolution {
                    strategy,
                    template_dir,
                    source_dir,
                });
            }
            tried.push(source_dir);
        }
    }

    Err(Error::TemplateNotFound { tried })
}

fn absolutize(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
