#![allow(non_snake_case)]

use super::*;
use crate::MANIFEST_FILE;
use std::fs;
use tempfile::TempDir;
use test_case::test_case;

/// Install bundles described as `(name, requirements)` and return the loader.
fn install(temp: &TempDir, specs: &[(&str, &[&str])]) -> BundleLoader {
    let cache = CodeCache::open(temp.path().join("cache")).unwrap();
    let mut loader = BundleLoader::new(Arc::new(cache));
    let mut paths = Vec::new();
    for (name, requires) in specs {
        let mut manifest = BundleManifest::new(name, "1.0.0");
        for required in *requires {
            manifest = manifest.with_requirement(required);
        }
        let dir = temp.path().join("plugins").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), manifest.to_json().unwrap()).unwrap();
        paths.push(dir);
    }
    let report = loader.load_bundles(&paths);
    assert!(report.failed.is_empty());
    loader
}

fn state_of(loader: &BundleLoader, name: &str) -> BundleState {
    loader.find_bundle(name).unwrap().state()
}

fn reason_for<'a>(report: &'a ResolutionReport, name: &str) -> &'a UnresolvedReason {
    let matching: Vec<_> = report
        .unresolved
        .iter()
        .filter(|u| u.symbolic_name == name)
        .collect();
    assert_eq!(matching.len(), 1, "{name} must be reported exactly once");
    &matching[0].reason
}

#[test]
fn resolve_all_bundles___no_requirements___all_resolved() {
    let temp = TempDir::new().unwrap();
    let mut loader = install(&temp, &[("a", &[]), ("b", &[])]);

    let report = loader.resolve_all_bundles();

    assert!(report.is_complete());
    assert_eq!(report.resolved.len(), 2);
    assert_eq!(state_of(&loader, "a"), BundleState::Resolved);
    assert_eq!(state_of(&loader, "b"), BundleState::Resolved);
}

#[test]
fn resolve_all_bundles___transitive_chain___resolved_regardless_of_order() {
    let temp = TempDir::new().unwrap();
    let mut loader = install(&temp, &[("c", &["b"]), ("b", &["a"]), ("a", &[])]);

    let report = loader.resolve_all_bundles();

    assert!(report.is_complete());
    for name in ["a", "b", "c"] {
        assert_eq!(state_of(&loader, name), BundleState::Resolved);
    }
}

#[test]
fn resolve_all_bundles___missing_dependency___reported_once() {
    let temp = TempDir::new().unwrap();
    let mut loader = install(&temp, &[("x", &["org.absent"]), ("y", &[])]);

    let report = loader.resolve_all_bundles();

    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(
        reason_for(&report, "x"),
        &UnresolvedReason::MissingDependency("org.absent".to_string())
    );
    assert_eq!(state_of(&loader, "x"), BundleState::Installed);
    assert_eq!(state_of(&loader, "y"), BundleState::Resolved);
}

#[test]
fn resolve_all_bundles___dependency_on_unresolved___propagates() {
    let temp = TempDir::new().unwrap();
    let mut loader = install(&temp, &[("top", &["mid"]), ("mid", &["org.absent"])]);

    let report = loader.resolve_all_bundles();

    assert_eq!(report.unresolved.len(), 2);
    assert_eq!(
        reason_for(&report, "top"),
        &UnresolvedReason::UnresolvedDependency("mid".to_string())
    );
    assert_eq!(
        reason_for(&report, "mid"),
        &UnresolvedReason::MissingDependency("org.absent".to_string())
    );
}

#[test]
fn resolve_all_bundles___cycle___members_stay_installed() {
    let temp = TempDir::new().unwrap();
    let mut loader = install(
        &temp,
        &[("a", &["b"]), ("b", &["c"]), ("c", &["a"]), ("outside", &["a"]), ("free", &[])],
    );

    let report = loader.resolve_all_bundles();

    for name in ["a", "b", "c"] {
        assert_eq!(state_of(&loader, name), BundleState::Installed);
        let UnresolvedReason::Cycle(members) = reason_for(&report, name) else {
            panic!("{name} should be reported as a cycle member");
        };
        assert_eq!(members.len(), 3);
    }
    assert_eq!(
        reason_for(&report, "outside"),
        &UnresolvedReason::UnresolvedDependency("a".to_string())
    );
    assert_eq!(state_of(&loader, "free"), BundleState::Resolved);
}

#[test]
fn resolve_all_bundles___overlapping_cycles___every_member_reported_as_cycle() {
    let temp = TempDir::new().unwrap();
    let mut loader = install(
        &temp,
        &[("a", &["b"]), ("b", &["c"]), ("c", &["b", "a"]), ("leaf", &["c"])],
    );

    let report = loader.resolve_all_bundles();

    let expected = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    for name in ["a", "b", "c"] {
        assert_eq!(state_of(&loader, name), BundleState::Installed);
        assert_eq!(reason_for(&report, name), &UnresolvedReason::Cycle(expected.clone()));
    }
    assert_eq!(
        reason_for(&report, "leaf"),
        &UnresolvedReason::UnresolvedDependency("c".to_string())
    );
}

#[test]
fn resolve_all_bundles___system_bundle_requirement___always_satisfied() {
    let temp = TempDir::new().unwrap();
    let mut loader = install(&temp, &[("ui", &[SYSTEM_BUNDLE_NAME])]);

    let report = loader.resolve_all_bundles();

    assert!(report.is_complete());
    assert_eq!(state_of(&loader, "ui"), BundleState::Resolved);
}

#[test]
fn resolve_all_bundles___second_pass___only_considers_installed() {
    let temp = TempDir::new().unwrap();
    let mut loader = install(&temp, &[("a", &[])]);
    loader.resolve_all_bundles();

    let report = loader.resolve_all_bundles();

    assert!(report.resolved.is_empty());
    assert!(report.unresolved.is_empty());
}

/// Parse `"a:b,c; b:c; c"` into bundle specs.
fn parse_specs(layout: &str) -> Vec<(String, Vec<String>)> {
    layout
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((name, deps)) => (
                name.to_string(),
                deps.split(',').map(|d| d.trim().to_string()).collect(),
            ),
            None => (entry.to_string(), Vec::new()),
        })
        .collect()
}

#[test_case("a:a2; a2", true ; "simple dependency")]
#[test_case("a:b,c; b:c; c", true ; "diamond")]
#[test_case("a:b; b:a", false ; "two cycle")]
#[test_case("a:b; b:nope", false ; "missing leaf")]
#[test_case("a:a1; a1:a2; a2:a3; a3", true ; "deep chain")]
fn resolve_all_bundles___root_bundle(layout: &str, expect_resolved: bool) {
    let temp = TempDir::new().unwrap();
    let parsed = parse_specs(layout);
    let deps: Vec<Vec<&str>> = parsed
        .iter()
        .map(|(_, d)| d.iter().map(String::as_str).collect())
        .collect();
    let specs: Vec<(&str, &[&str])> = parsed
        .iter()
        .zip(&deps)
        .map(|((name, _), d)| (name.as_str(), d.as_slice()))
        .collect();
    let mut loader = install(&temp, &specs);

    loader.resolve_all_bundles();

    assert_eq!(state_of(&loader, "a").is_resolved(), expect_resolved);
}

#[test]
fn UnresolvedReason___display___names_the_cause() {
    assert_eq!(
        UnresolvedReason::MissingDependency("x".to_string()).to_string(),
        "required bundle 'x' is not installed"
    );
    assert_eq!(
        UnresolvedReason::Cycle(vec!["a".to_string(), "b".to_string()]).to_string(),
        "dependency cycle: a -> b"
    );
}
