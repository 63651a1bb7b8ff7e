//! Entry point of the post-generation hook.
//! Resolves where the template lives and copies its bundled sources into
//! the freshly generated project.

use postgen::{
    cli::{get_args, run},
    error::default_error_handler,
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args, std::io::stdin().lock()) {
        default_error_handler(err);
    }
}
