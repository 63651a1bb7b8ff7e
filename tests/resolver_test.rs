use std::fs;
use std::path::{Path, PathBuf};

use postgen::error::Error;
use postgen::resolver::{resolve_template_dir, ResolveContext, Strategy};
use tempfile::TempDir;

fn make_template<P: AsRef<Path>>(root: P) -> PathBuf {
    let root = root.as_ref();
    fs::create_dir_all(root.join("hooks/source")).unwrap();
    root.to_path_buf()
}

fn make_project(temp: &TempDir) -> PathBuf {
    let project = temp.path().join("workspace/my-app");
    fs::create_dir_all(&project).unwrap();
    project
}

#[test]
fn test_self_relative() {
    let temp = TempDir::new().unwrap();
    let template = make_template(temp.path().join("template"));
    let project = make_project(&temp);

    let mut ctx = ResolveContext::new(&project);
    ctx.hook_path = Some(template.join("hooks/post_gen_project"));

    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.strategy, Strategy::SelfRelative);
    assert_eq!(resolution.template_dir, template);
    assert_eq!(resolution.source_dir, template.join("hooks/source"));
}

#[test]
fn test_self_relative_without_source_falls_through() {
    let temp = TempDir::new().unwrap();
    let hook_dir = temp.path().join("moved/hooks");
    fs::create_dir_all(&hook_dir).unwrap();
    let project = make_project(&temp);
    let template = make_template(temp.path().join("workspace"));

    let mut ctx = ResolveContext::new(&project);
    ctx.hook_path = Some(hook_dir.join("post_gen_project"));

    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.strategy, Strategy::UpwardSearch);
    assert_eq!(resolution.template_dir, template);
}

#[test]
fn test_upward_search_finds_parent() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    let template = make_template(temp.path().join("workspace"));

    let resolution = resolve_template_dir(&ResolveContext::new(&project)).unwrap();
    assert_eq!(resolution.strategy, Strategy::UpwardSearch);
    assert_eq!(resolution.template_dir, template);
}

#[test]
fn test_upward_search_finds_hidden_template() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    let template = make_template(project.join(".template"));

    let resolution = resolve_template_dir(&ResolveContext::new(&project)).unwrap();
    assert_eq!(resolution.strategy, Strategy::UpwardSearch);
    assert_eq!(resolution.template_dir, template);
    assert_eq!(resolution.source_dir, project.join(".template/hooks/source"));
}

#[test]
fn test_upward_search_prefers_nearest_directory() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    make_template(temp.path());
    let nearer = make_template(temp.path().join("workspace"));

    let resolution = resolve_template_dir(&ResolveContext::new(&project)).unwrap();
    assert_eq!(resolution.template_dir, nearer);
}

#[test]
fn test_deployment_paths() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    let deployed = make_template(temp.path().join("opt/template"));

    let mut ctx = ResolveContext::new(&project);
    ctx.deployment_paths = vec![temp.path().join("app/template"), deployed.clone()];

    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.strategy, Strategy::DeploymentPaths);
    assert_eq!(resolution.template_dir, deployed);
}

#[test]
fn test_developer_paths() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    let checkout = make_template(temp.path().join("home/dev/templates/app-any-site"));

    let mut ctx = ResolveContext::new(&project);
    ctx.deployment_paths = vec![temp.path().join("app/template")];
    ctx.developer_paths = vec![checkout.clone()];

    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.strategy, Strategy::DeveloperPaths);
    assert_eq!(resolution.template_dir, checkout);
}

#[test]
fn test_earlier_strategy_wins() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    let hooked = make_template(temp.path().join("hooked"));
    make_template(temp.path().join("workspace"));
    let deployed = make_template(temp.path().join("deployed"));
    let checkout = make_template(temp.path().join("checkout"));

    let mut ctx = ResolveContext::new(&project);
    ctx.hook_path = Some(hooked.join("hooks/post_gen_project"));
    ctx.deployment_paths = vec![deployed.clone()];
    ctx.developer_paths = vec![checkout.clone()];
    assert_eq!(resolve_template_dir(&ctx).unwrap().strategy, Strategy::SelfRelative);

    ctx.hook_path = None;
    assert_eq!(resolve_template_dir(&ctx).unwrap().strategy, Strategy::UpwardSearch);

    fs::remove_dir_all(temp.path().join("workspace/hooks")).unwrap();
    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.strategy, Strategy::DeploymentPaths);
    assert_eq!(resolution.template_dir, deployed);

    ctx.deployment_paths.clear();
    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.strategy, Strategy::DeveloperPaths);
    assert_eq!(resolution.template_dir, checkout);
}

#[test]
fn test_override_outranks_discovery() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    make_template(temp.path().join("workspace"));
    let explicit = make_template(temp.path().join("explicit"));

    let mut ctx = ResolveContext::new(&project);
    ctx.template_override = Some(explicit.clone());

    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.strategy, Strategy::Override);
    assert_eq!(resolution.template_dir, explicit);
}

#[test]
fn test_invalid_override_falls_through() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    let template = make_template(temp.path().join("workspace"));

    let mut ctx = ResolveContext::new(&project);
    ctx.template_override = Some(temp.path().join("nowhere"));

    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.strategy, Strategy::UpwardSearch);
    assert_eq!(resolution.template_dir, template);
}

#[test]
fn test_relative_candidates_resolve_against_project() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    let vendored = make_template(project.join("vendor/template"));

    let mut ctx = ResolveContext::new(&project);
    ctx.deployment_paths = vec![PathBuf::from("vendor/template")];

    let resolution = resolve_template_dir(&ctx).unwrap();
    assert_eq!(resolution.template_dir, vendored);
}

#[test]
fn test_nothing_found_lists_tried_paths() {
    let temp = TempDir::new().unwrap();
    let project = make_project(&temp);
    let missing = temp.path().join("app/template");

    let mut ctx = ResolveContext::new(&project);
    ctx.template_override = Some(missing.clone());
    ctx.deployment_paths = vec![missing.clone()];

    match resolve_template_dir(&ctx) {
        Err(Error::TemplateNotFound { tried }) => {
            assert!(tried.contains(&project.join("hooks/source")));
            assert!(tried.contains(&project.join(".template/hooks/source")));
            let probes = tried.iter().filter(|p| **p == missing.join("hooks/source")).count();
            assert_eq!(probes, 1, "duplicate candidates are probed once");
        }
        other => panic!("Expected TemplateNotFound, got {other:?}"),
    }
}
