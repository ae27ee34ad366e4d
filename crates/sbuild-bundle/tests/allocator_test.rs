use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mockall::mock;
use sbuild_bundle::{
    BuildLog, BundleAllocator, BundleError, BundleEvent, FsLabel, StagingFs, TracingLog,
    create_bundle,
};
use sbuild_core::{BuildOptions, BundleConfig};
use tempfile::TempDir;

mock! {
    Fs {}

    impl StagingFs for Fs {
        fn temp_root(&self) -> PathBuf;
        fn create_unique_dir(&self, root: &Path, prefix: &str) -> std::io::Result<PathBuf>;
        fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
    }
}

#[derive(Default)]
struct RecordingLog(Mutex<Vec<BundleEvent>>);

impl BuildLog for RecordingLog {
    fn record(&self, event: &BundleEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn allocator_in(root: &Path) -> BundleAllocator {
    BundleAllocator::new().with_config(BundleConfig {
        prefix: "sbuild-".to_owned(),
        temp_root: Some(root.to_path_buf()),
    })
}

fn dir_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

// ── Host Filesystem Tests ──

#[test]
fn creates_staging_root_with_rootfs() {
    let tmp = TempDir::new().unwrap();
    let bundle = allocator_in(tmp.path()).create_bundle("").unwrap();

    assert!(bundle.path.is_absolute());
    assert!(bundle.path.is_dir());
    assert!(bundle.path.starts_with(tmp.path()));
    assert_eq!(
        bundle.fs_objects.get(&FsLabel::Rootfs),
        Some(Path::new("fs"))
    );

    let rootfs = bundle.rootfs().unwrap();
    assert_eq!(rootfs, bundle.path.join("fs"));
    assert!(rootfs.is_dir());
}

#[test]
fn empty_prefix_uses_default() {
    let tmp = TempDir::new().unwrap();
    let bundle = allocator_in(tmp.path()).create_bundle("").unwrap();

    assert!(dir_name(&bundle.path).starts_with("sbuild--"));
}

#[test]
fn prefix_hint_names_directory() {
    let tmp = TempDir::new().unwrap();
    let bundle = allocator_in(tmp.path()).create_bundle("alpine").unwrap();

    let name = dir_name(&bundle.path);
    assert!(name.starts_with("alpine-"));
    assert!(name.len() > "alpine-".len());
}

#[test]
fn configured_prefix_used_for_empty_hint() {
    let tmp = TempDir::new().unwrap();
    let allocator = BundleAllocator::new().with_config(BundleConfig {
        prefix: "nightly".to_owned(),
        temp_root: Some(tmp.path().to_path_buf()),
    });
    let bundle = allocator.create_bundle("").unwrap();

    assert!(dir_name(&bundle.path).starts_with("nightly-"));
}

#[test]
fn each_bundle_gets_its_own_directory() {
    let tmp = TempDir::new().unwrap();
    let allocator = allocator_in(tmp.path());

    let a = allocator.create_bundle("same").unwrap();
    let b = allocator.create_bundle("same").unwrap();

    assert_ne!(a.path, b.path);
    assert!(a.rootfs().unwrap().is_dir());
    assert!(b.rootfs().unwrap().is_dir());
}

#[test]
fn fresh_bundle_has_empty_state() {
    let tmp = TempDir::new().unwrap();
    let bundle = allocator_in(tmp.path()).create_bundle("").unwrap();

    assert_eq!(bundle.fs_objects.len(), 1);
    assert!(bundle.json_objects.is_empty());
    assert!(bundle.bind_paths.is_empty());
    assert!(bundle.sections.is_empty());
    assert!(!bundle.force);
    assert!(!bundle.update);
    assert!(!bundle.no_test);
}

#[test]
fn create_with_options_applies_build_options() {
    let tmp = TempDir::new().unwrap();
    let options = BuildOptions {
        sections: vec!["setup".to_owned(), "post".to_owned()],
        force: true,
        update: false,
        no_test: true,
    };
    let bundle = allocator_in(tmp.path())
        .create_with_options("", &options)
        .unwrap();

    assert_eq!(bundle.sections, vec!["setup", "post"]);
    assert!(bundle.force);
    assert!(!bundle.update);
    assert!(bundle.no_test);
}

#[test]
fn missing_temp_root_is_allocation_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("does-not-exist");
    let result = allocator_in(&missing).create_bundle("");

    assert!(matches!(result, Err(BundleError::Allocation { .. })));
}

#[test]
fn prefix_with_separator_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let result = allocator_in(tmp.path()).create_bundle("a/b");

    match result {
        Err(BundleError::Allocation { temp_root, source }) => {
            assert_eq!(temp_root, tmp.path());
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput);
        }
        other => panic!("expected allocation error, got {other:?}"),
    }
    // Nothing was created for the rejected prefix
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn rejected_prefix_never_reaches_filesystem() {
    let mut fs = MockFs::new();
    fs.expect_temp_root()
        .returning(|| PathBuf::from("/staging"));
    fs.expect_create_unique_dir().never();
    fs.expect_create_dir_all().never();

    let allocator = BundleAllocator::with_capabilities(fs, TracingLog);
    let result = allocator.create_bundle("nested/name");

    assert!(matches!(result, Err(BundleError::Allocation { .. })));
}

#[test]
fn default_allocator_uses_system_temp_dir() {
    let bundle = create_bundle("sbuild-test").unwrap();

    assert!(bundle.path.starts_with(std::env::temp_dir()));
    assert!(bundle.rootfs().unwrap().is_dir());

    std::fs::remove_dir_all(&bundle.path).unwrap();
}

// ── Injected Capability Tests ──

#[test]
fn allocation_uses_injected_filesystem() {
    let mut fs = MockFs::new();
    fs.expect_temp_root()
        .returning(|| PathBuf::from("/staging"));
    fs.expect_create_unique_dir()
        .withf(|root, prefix| root.to_str() == Some("/staging") && prefix.to_string() == "sbuild--")
        .times(1)
        .returning(|_, _| Ok(PathBuf::from("/staging/sbuild--a1b2")));
    fs.expect_create_dir_all()
        .withf(|path| path.to_str() == Some("/staging/sbuild--a1b2/fs"))
        .times(1)
        .returning(|_| Ok(()));

    let allocator = BundleAllocator::with_capabilities(fs, TracingLog);
    let bundle = allocator.create_bundle("").unwrap();

    assert_eq!(bundle.path, PathBuf::from("/staging/sbuild--a1b2"));
    assert_eq!(
        bundle.rootfs().unwrap(),
        PathBuf::from("/staging/sbuild--a1b2/fs")
    );
}

#[test]
fn allocation_failure_creates_nothing_else() {
    let mut fs = MockFs::new();
    fs.expect_temp_root()
        .returning(|| PathBuf::from("/staging"));
    fs.expect_create_unique_dir().returning(|_, _| {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ))
    });
    fs.expect_create_dir_all().never();

    let log = RecordingLog::default();
    let allocator = BundleAllocator::with_capabilities(fs, log);
    let result = allocator.create_bundle("");

    match result {
        Err(BundleError::Allocation { temp_root, source }) => {
            assert_eq!(temp_root, PathBuf::from("/staging"));
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected allocation error, got {other:?}"),
    }
    assert!(allocator.log().0.lock().unwrap().is_empty());
}

#[test]
fn rootfs_failure_is_directory_creation_error() {
    let mut fs = MockFs::new();
    fs.expect_temp_root()
        .returning(|| PathBuf::from("/staging"));
    fs.expect_create_unique_dir()
        .returning(|_, _| Ok(PathBuf::from("/staging/sbuild--x")));
    fs.expect_create_dir_all().returning(|_| {
        Err(std::io::Error::new(
            std::io::ErrorKind::StorageFull,
            "no space",
        ))
    });

    let allocator = BundleAllocator::with_capabilities(fs, RecordingLog::default());
    let result = allocator.create_bundle("");

    match result {
        Err(BundleError::DirectoryCreation { label, path, .. }) => {
            assert_eq!(label, "rootfs");
            assert_eq!(path, PathBuf::from("/staging/sbuild--x/fs"));
        }
        other => panic!("expected directory creation error, got {other:?}"),
    }
    // The staging root is left behind and was reported
    let events = allocator.log().0.lock().unwrap();
    assert_eq!(
        *events,
        vec![BundleEvent::StagingCreated {
            path: PathBuf::from("/staging/sbuild--x")
        }]
    );
}

#[test]
fn configured_temp_root_overrides_filesystem_default() {
    let mut fs = MockFs::new();
    fs.expect_temp_root().never();
    fs.expect_create_unique_dir()
        .withf(|root, _| root.to_str() == Some("/builds"))
        .returning(|_, prefix| Ok(Path::new("/builds").join(format!("{prefix}0"))));
    fs.expect_create_dir_all().returning(|_| Ok(()));

    let allocator =
        BundleAllocator::with_capabilities(fs, TracingLog).with_config(BundleConfig {
            prefix: "sbuild-".to_owned(),
            temp_root: Some(PathBuf::from("/builds")),
        });
    let bundle = allocator.create_bundle("ci").unwrap();

    assert_eq!(bundle.path, PathBuf::from("/builds/ci-0"));
}

#[test]
fn log_records_staging_then_rootfs() {
    let mut fs = MockFs::new();
    fs.expect_temp_root()
        .returning(|| PathBuf::from("/staging"));
    fs.expect_create_unique_dir()
        .returning(|_, _| Ok(PathBuf::from("/staging/b")));
    fs.expect_create_dir_all().returning(|_| Ok(()));

    let allocator = BundleAllocator::with_capabilities(fs, RecordingLog::default());
    allocator.create_bundle("").unwrap();

    let events = allocator.log().0.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            BundleEvent::StagingCreated {
                path: PathBuf::from("/staging/b")
            },
            BundleEvent::FsObjectCreated {
                label: "rootfs".to_owned(),
                path: PathBuf::from("/staging/b/fs")
            },
        ]
    );
}
