//! Behaviour-driven tests for wheel packaging.
//!
//! Each scenario runs the full pipeline: discovery, classification, file
//! collection, and archive creation.

use camino::{Utf8Path, Utf8PathBuf};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use std::io::Read;
use tempfile::TempDir;
use wheelwright_packager::discovery::discover;
use wheelwright_packager::distribution::classify;
use wheelwright_packager::package_files::collect_package_files;
use wheelwright_packager::wheel::naming::Version;
use wheelwright_packager::wheel::packaging::{WheelOutput, WheelParams, package_wheel};
use wheelwright_packager::wheel::tag::TagComponent;
use wheelwright_packager::wheel::target::TargetTriple;
use zip::ZipArchive;

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

struct PackagingWorld {
    _dir: TempDir,
    root: Utf8PathBuf,
    target: Option<TargetTriple>,
    include_data: bool,
    output: Option<WheelOutput>,
}

#[fixture]
fn world() -> PackagingWorld {
    let dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
    fs::create_dir_all(root.join("python")).expect("mkdir source tree");
    PackagingWorld {
        _dir: dir,
        root,
        target: None,
        include_data: true,
        output: None,
    }
}

fn wheel_path(world: &PackagingWorld) -> &Utf8Path {
    &world.output.as_ref().expect("wheel packaged").wheel_path
}

fn archive(world: &PackagingWorld) -> ZipArchive<fs::File> {
    let file = fs::File::open(wheel_path(world)).expect("open wheel");
    ZipArchive::new(file).expect("valid zip")
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a package file \"{path}\"")]
fn given_package_file(world: &mut PackagingWorld, path: String) {
    let file = world.root.join("python").join(&path);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(&file, path.as_bytes()).expect("write");
}

#[given("a target triple \"{triple}\"")]
fn given_target(world: &mut PackagingWorld, triple: String) {
    world.target = Some(TargetTriple::try_from(triple).expect("valid target"));
}

#[given("package data is excluded")]
fn given_no_package_data(world: &mut PackagingWorld) {
    world.include_data = false;
}

#[when("the \"{namespace}\" namespace is packaged as \"{name}\" version \"{version}\"")]
fn when_packaged(world: &mut PackagingWorld, namespace: String, name: String, version: String) {
    let source_tree = world.root.join("python");
    let packages = discover(&namespace, &source_tree).expect("discovery succeeds");
    let files = collect_package_files(&source_tree, &packages, world.include_data)
        .expect("collection succeeds");
    let params = WheelParams {
        descriptor: classify(name, packages, world.include_data),
        version: Version::try_from(version).expect("valid version"),
        python_tag: TagComponent::try_from("py3").expect("valid tag"),
        abi_tag: TagComponent::try_from("none").expect("valid tag"),
        target: world.target.clone().expect("target set"),
        files,
        output_dir: world.root.join("dist"),
    };
    world.output = Some(package_wheel(&params).expect("packaging succeeds"));
}

#[then("the wheel file is \"{expected}\"")]
fn then_wheel_file(world: &mut PackagingWorld, expected: String) {
    let path = wheel_path(world);
    assert!(path.is_file(), "wheel must exist");
    assert_eq!(path.file_name(), Some(expected.as_str()));
}

#[then("the wheel contains \"{entry}\"")]
fn then_wheel_contains(world: &mut PackagingWorld, entry: String) {
    let mut archive = archive(world);
    assert!(archive.by_name(&entry).is_ok(), "missing entry {entry}");
}

#[then("the wheel does not contain \"{entry}\"")]
fn then_wheel_lacks(world: &mut PackagingWorld, entry: String) {
    let mut archive = archive(world);
    assert!(archive.by_name(&entry).is_err(), "unexpected entry {entry}");
}

#[then("the WHEEL metadata declares a non-pure distribution")]
fn then_wheel_not_pure(world: &mut PackagingWorld) {
    let output = world.output.as_ref().expect("wheel packaged");
    let entry_name = format!("{}/WHEEL", output.name.dist_info_dir());
    let mut archive = archive(world);
    let mut contents = String::new();
    archive
        .by_name(&entry_name)
        .expect("WHEEL entry")
        .read_to_string(&mut contents)
        .expect("read WHEEL");
    assert!(contents.contains("Root-Is-Purelib: false"));
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Package discovered sources into a platform wheel"
)]
fn scenario_platform_wheel(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Package data is left out when disabled"
)]
fn scenario_without_data(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "An empty namespace still yields a platform wheel"
)]
fn scenario_empty_namespace(world: PackagingWorld) {
    let _ = world;
}
