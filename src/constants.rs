//! Common constants used throughout the postgen hook.

/// Entries copied from the template's source directory, in processing order.
pub const MANIFEST: [&str; 3] = ["src", "app-config.json", "App.tsx"];

/// Directory holding the template hooks
pub const HOOKS_DIR: &str = "hooks";

/// Directory next to the hook binary that holds the files to copy
pub const SOURCE_DIR: &str = "source";

/// Hidden directory some hosts use to keep the template inside the project tree
pub const HIDDEN_TEMPLATE_DIR: &str = ".template";

/// Container-style install locations checked when the hook runs from a packaged image.
pub const DEPLOYMENT_PATHS: [&str; 4] = [
    "/app/template",
    "/opt/app-any-site/template",
    "/usr/src/app/template",
    "/template",
];

/// Local checkout locations, relative to the user's home directory.
pub const DEVELOPER_PATHS: [&str; 3] = [
    "templates/app-any-site",
    ".templates/app-any-site",
    "Projects/app-any-site-template",
];

/// Names the template root directly, bypassing discovery
pub const TEMPLATE_DIR_ENV: &str = "POSTGEN_TEMPLATE_DIR";

/// Extra developer paths, in the platform's path-list syntax
pub const TEMPLATE_PATH_ENV: &str = "POSTGEN_TEMPLATE_PATH";
