//! Build profile guarantees the service depends on at runtime.

const WORKSPACE_MANIFEST: &str = include_str!("../../Cargo.toml");

#[test]
fn test_release_profile_unwinds_on_panic() {
    let aborts = WORKSPACE_MANIFEST
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").replace(' ', ""))
        .any(|line| line == "panic=\"abort\"");
    assert!(
        !aborts,
        "panic = \"abort\" would stop CatchPanicLayer from returning 500s"
    );
}
