//! Command-line interface implementation for the postgen hook.
//! Every argument is optional: the host runs the hook with none.

use clap::Parser;
use std::io::Read;
use std::path::{absolute, PathBuf};

use crate::constants::TEMPLATE_DIR_ENV;
use crate::copier::{copy_template_sources, CopyReport};
use crate::error::{Error, Result};
use crate::hooks::{read_hook_input, HookInput};
use crate::resolver::ResolveContext;

/// Command-line arguments structure for the hook.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Copies bundled template sources into a freshly generated project",
    long_about = None
)]
pub struct Args {
    /// Template root to use instead of discovering it
    #[arg(long, value_name = "DIR", env = TEMPLATE_DIR_ENV)]
    pub template_dir: Option<PathBuf>,

    /// Generated project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Read the host's hook payload (template_dir, output_dir, context) from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Report what would be copied without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with a failure status when no template directory can be found
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling on invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}

/// Project directory and explicit template root for one run.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation {
    pub project_dir: PathBuf,
    pub template_override: Option<PathBuf>,
}

/// Combines the arguments with the host payload read from `stdin`.
///
/// Flags win over the payload: `--project-dir` over `output_dir` and
/// `--template-dir` (or its env variable) over `template_dir`. `stdin` is
/// only read with `--stdin`.
///
/// # Errors
/// * `Error::HookInputError` if the payload is not valid JSON
/// * `Error::IoError` if stdin or the current directory cannot be read
pub fn get_invocation<R: Read>(args: &Args, stdin: R) -> Result<Invocation> {
    let host_input = if args.stdin {
        read_hook_input(stdin)?
    } else {
        None
    };
    let (host_template_dir, host_output_dir) = match host_input {
        Some(HookInput {
            template_dir,
            output_dir,
            ..
        }) => (template_dir, output_dir),
        None => (None, None),
    };

    let project_dir = match args.project_dir.clone().or(host_output_dir) {
        Some(dir) => absolute(dir)?,
        None => std::env::current_dir()?,
    };
    let template_override = args
        .template_dir
        .clone()
        .or(host_template_dir)
        .map(absolute)
        .transpose()?;

    Ok(Invocation {
        project_dir,
        template_override,
    })
}

/// Runs the hook for the current process.
///
/// # Returns
/// * `Ok(Some(report))` after copying
/// * `Ok(None)` if no template directory was found and `--strict` is off
pub fn run<R: Read>(args: Args, stdin: R) -> Result<Option<CopyReport>> {
    let invocation = get_invocation(&args, stdin)?;
    let ctx = ResolveContext::from_environment(
        invocation.project_dir,
        invocation.template_override,
    );
    run_with_context(&args, &ctx)
}

/// Copies the template sources into `ctx.project_dir`, treating a missing
/// template directory as a soft failure unless `--strict` is given.
pub fn run_with_context(args: &Args, ctx: &ResolveContext) -> Result<Option<CopyReport>> {
    let report = match copy_template_sources(ctx, &ctx.project_dir, args.dry_run) {
        Ok((_, report)) => report,
        Err(err @ Error::TemplateNotFound { .. }) if !args.strict => {
            log::error!("{err}");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    println!(
        "Post-generation completed in {}: {} copied, {} missing, {} skipped.",
        ctx.project_dir.display(),
        report.copied.len(),
        report.missing.len(),
        report.skipped.len()
    );
    Ok(Some(report))
}
