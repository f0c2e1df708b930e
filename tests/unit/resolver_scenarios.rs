//! End-to-end resolver scenarios over on-disk metadata fixtures.

use crate::common::SitePackagesFixture;
use piptree::metadata::MetadataIndex;
use piptree::models::DependencyNode;
use piptree::resolver::{ForestBuilder, ResolverConfig, ResolverContext};

fn resolve(fixture: &SitePackagesFixture) -> Vec<DependencyNode> {
    resolve_with(fixture, ResolverConfig::default())
}

fn resolve_with(fixture: &SitePackagesFixture, config: ResolverConfig) -> Vec<DependencyNode> {
    let index = MetadataIndex::discover(&[fixture.path().to_path_buf()]).unwrap();
    let mut ctx = ResolverContext::new(config);
    ForestBuilder::new(&index).build(&mut ctx)
}

#[test]
fn test_realistic_environment() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("flask", "3.0.0", &["Werkzeug >=3.0", "click >=8.1.3"], &[]);
    fixture.add_package("Werkzeug", "3.0.1", &["MarkupSafe >=2.1.1"], &[]);
    fixture.add_package("click", "8.1.7", &["colorama ; platform_system == 'Windows'"], &[]);
    fixture.add_package("MarkupSafe", "2.1.3", &[], &[]);

    let forest = resolve(&fixture);
    let names: Vec<_> = forest.iter().map(|t| t.name.as_str()).collect();
    // Werkzeug, click and MarkupSafe are all direct children of someone.
    assert_eq!(names, vec!["flask"]);

    let flask = &forest[0];
    assert_eq!(flask.version, "3.0.0");
    assert_eq!(flask.purl, "pkg:pypi/flask@3.0.0");
    assert!(flask.version_specifiers.is_none());

    let werkzeug = &flask.dependencies[0];
    assert_eq!(werkzeug.name, "Werkzeug");
    assert_eq!(werkzeug.purl, "pkg:pypi/werkzeug@3.0.1");
    assert_eq!(werkzeug.version_specifiers.as_deref(), Some(">=3.0"));
    assert_eq!(werkzeug.dependencies[0].name, "MarkupSafe");

    // colorama is not installed; click has no children.
    let click = &flask.dependencies[1];
    assert_eq!(click.name, "click");
    assert!(click.dependencies.is_empty());
}

#[test]
fn test_cyclic_metadata_terminates() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("alpha", "1.0", &["beta"], &[]);
    fixture.add_package("beta", "1.0", &["alpha"], &[]);

    let forest = resolve(&fixture);
    // Each package is the other's direct child; neither survives as a root,
    // and resolution terminates despite the cycle.
    assert!(forest.is_empty());
}

#[test]
fn test_cycle_through_shared_root() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("app", "1.0", &["alpha"], &[]);
    fixture.add_package("alpha", "1.0", &["beta"], &[]);
    fixture.add_package("beta", "1.0", &["alpha"], &[]);

    let forest = resolve(&fixture);
    assert_eq!(forest.len(), 1);
    let alpha = &forest[0].dependencies[0];
    let beta = &alpha.dependencies[0];
    assert_eq!(beta.name, "beta");
    // beta never re-lists alpha on this branch.
    assert!(beta.dependencies.is_empty());
}

#[test]
fn test_extras_resolution_and_all_expansion() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package(
        "toolkit",
        "1.0.0",
        &[
            "core-lib >=1.0",
            "extra-lib >=2.0 ; extra == 'all'",
            "missing-lib ; extra == 'all'",
            "tls-lib ; extra == 'tls'",
        ],
        &["all", "tls"],
    );
    fixture.add_package("core-lib", "1.4.0", &[], &[]);
    fixture.add_package("extra-lib", "2.5.0", &[], &[]);
    fixture.add_package("tls-lib", "0.9.0", &[], &[]);

    let forest = resolve(&fixture);
    let toolkit = forest.iter().find(|t| t.name == "toolkit").unwrap();

    // Extras map groups entries by activating extra.
    assert_eq!(toolkit.extra_deps["all"].len(), 2);
    assert_eq!(toolkit.extra_deps["tls"][0].name, "tls-lib");

    // The "all" extra is expanded into full nested entries for installed
    // packages; the missing one is silently dropped.
    let dep_names: Vec<_> = toolkit.dependencies.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(dep_names, vec!["core-lib", "extra-lib"]);
    let expanded = &toolkit.dependencies[1];
    assert_eq!(expanded.version, "2.5.0");
    assert_eq!(expanded.version_specifiers.as_deref(), Some(">=2.0"));
    assert_eq!(expanded.purl, "pkg:pypi/extra-lib@2.5.0");
}

#[test]
fn test_editable_install_version_recovery() {
    let fixture = SitePackagesFixture::new();
    fixture.add_editable_package("devproj", "0.1.0", "file:///home/dev/devproj");

    let forest = resolve(&fixture);
    assert_eq!(forest[0].name, "devproj");
    assert_eq!(forest[0].version, "0.1.0");
}

#[test]
fn test_unpinnable_version_is_latest() {
    let fixture = SitePackagesFixture::new();
    // Metadata without a Version field at all.
    let info = fixture.path().join("odd-0.dist-info");
    std::fs::create_dir_all(&info).unwrap();
    std::fs::write(info.join("METADATA"), "Name: odd\n").unwrap();

    let forest = resolve(&fixture);
    assert_eq!(forest[0].version, "latest");
}

#[test]
fn test_broken_package_does_not_abort_run() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("good", "1.0", &[], &[]);
    let broken = fixture.path().join("broken-1.0.dist-info");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("METADATA"), "Version: 1.0\n").unwrap();

    let forest = resolve(&fixture);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].name, "good");
}

#[test]
fn test_depth_property_holds() {
    let fixture = SitePackagesFixture::new();
    // A linear chain longer than the configured depth.
    for i in 0..8 {
        let next = format!("pkg{}", i + 1);
        fixture.add_package(&format!("pkg{i}"), "1.0", &[next.as_str()], &[]);
    }
    fixture.add_package("pkg8", "1.0", &[], &[]);

    let config = ResolverConfig {
        max_depth: 4,
        ..ResolverConfig::default()
    };
    let forest = resolve_with(&fixture, config);
    let root = forest.iter().find(|t| t.name == "pkg0").unwrap();

    fn max_depth(node: &DependencyNode) -> usize {
        1 + node.dependencies.iter().map(max_depth).max().unwrap_or(0)
    }
    // Root sits at depth 0; no node nests deeper than max_depth.
    let deepest = root.dependencies.iter().map(max_depth).max().unwrap_or(0);
    assert_eq!(deepest, 4);
}

#[test]
fn test_global_budget_spans_roots() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("r1", "1.0", &["shared1"], &[]);
    fixture.add_package("r2", "1.0", &["shared2"], &[]);
    fixture.add_package("shared1", "1.0", &["leaf"], &[]);
    fixture.add_package("shared2", "1.0", &["leaf"], &[]);
    fixture.add_package("leaf", "1.0", &[], &[]);

    let config = ResolverConfig {
        max_nodes: 2,
        ..ResolverConfig::default()
    };
    let forest = resolve_with(&fixture, config);
    let total: usize = forest.iter().map(count_nodes).sum();
    // The budget accumulated across both root traversals; later subtrees
    // were truncated rather than restarted per root.
    let r2 = forest.iter().find(|t| t.name == "r2").unwrap();
    assert!(r2.dependencies.iter().all(|d| d.dependencies.is_empty()));
    assert!(total < 10);
}

fn count_nodes(node: &DependencyNode) -> usize {
    1 + node.dependencies.iter().map(count_nodes).sum::<usize>()
}

#[test]
fn test_shared_dependency_under_two_roots() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("appa", "1.0", &["shared-q"], &[]);
    fixture.add_package("appr", "1.0", &["shared-q"], &[]);
    fixture.add_package("shared-q", "2.0", &[], &[]);

    let forest = resolve(&fixture);
    let names: Vec<_> = forest.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["appa", "appr"]);
    assert_eq!(forest[0].dependencies[0].name, "shared-q");
    assert_eq!(forest[1].dependencies[0].name, "shared-q");
}

#[test]
fn test_deterministic_output() {
    let fixture = SitePackagesFixture::new();
    fixture.add_package("b-pkg", "1.0", &["a-pkg"], &[]);
    fixture.add_package("a-pkg", "1.0", &[], &[]);
    fixture.add_package("z-pkg", "1.0", &["b-pkg", "a-pkg"], &[]);

    let first = piptree::output::to_json(&resolve(&fixture)).unwrap();
    let second = piptree::output::to_json(&resolve(&fixture)).unwrap();
    assert_eq!(first, second);
}
