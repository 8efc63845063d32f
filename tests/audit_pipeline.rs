/// End-to-end pipeline tests over a throwaway git repository
use git2::Repository;
use repo_audit::analyzers::{du, filetypes, manifests, risks, structure};
use repo_audit::bundle::{self, BundleSpec, FlattenRule};
use repo_audit::config::AuditConfig;
use repo_audit::git::GitLister;
use repo_audit::index;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn init_repo(dir: &Path, files: &[(&str, String)]) {
    let repo = Repository::init(dir).expect("init repo");
    let mut git_index = repo.index().expect("open index");
    for (path, content) in files {
        let full = dir.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&full, content).expect("write file");
        git_index.add_path(Path::new(path)).expect("add path");
    }
    git_index.write().expect("write index");

    let tree_id = git_index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("find tree");
    let sig = git2::Signature::now("audit", "audit@example.com").expect("signature");
    repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .expect("commit");
}

fn lines(n: usize) -> String {
    (1..=n).map(|i| format!("line {i}\n")).collect()
}

fn sample_repo() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    init_repo(
        dir.path(),
        &[
            ("a/x.go", lines(10)),
            ("a/y.go", lines(20)),
            ("b/z.txt", lines(5)),
        ],
    );
    dir
}

#[test]
fn index_has_one_record_per_tracked_path() {
    let repo = sample_repo();
    let out_dir = TempDir::new().unwrap();
    let index_path = out_dir.path().join("repo_index.ndjson");

    let lister = GitLister::discover(repo.path()).expect("discover");
    let files = lister.list_tracked().expect("list");
    let summary = index::build_index(files, &index_path).expect("build");

    assert_eq!(summary.written, 3);
    assert_eq!(summary.degraded, 0);

    let records = index::read_records(&index_path).expect("read");
    assert_eq!(records.len(), 3);

    let mut paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
    paths.sort();
    assert_eq!(paths, vec!["a/x.go", "a/y.go", "b/z.txt"]);

    for record in &records {
        assert_eq!(record.depth, record.path.matches('/').count());
        assert!(record.blob_sha.is_some());
        assert!(record.size_bytes > 0);
    }
}

#[test]
fn filetype_profile_counts_and_avg_loc() {
    let repo = sample_repo();
    let out_dir = TempDir::new().unwrap();
    let index_path = out_dir.path().join("repo_index.ndjson");
    let profile_path = out_dir.path().join("filetype_profile.json");

    let lister = GitLister::discover(repo.path()).expect("discover");
    index::build_index(lister.list_tracked().expect("list"), &index_path).expect("build");

    let config = AuditConfig::default();
    let profile =
        filetypes::analyze_filetypes(repo.path(), &index_path, &profile_path, &config.limits)
            .expect("profile");

    assert_eq!(
        profile.counts,
        vec![("go".to_string(), 2), ("txt".to_string(), 1)]
    );
    let go = profile.loc_estimates.get("go").expect("go estimate");
    assert_eq!(go.sample_files, 2);
    assert_eq!(go.avg_loc, 15);
    let txt = profile.loc_estimates.get("txt").expect("txt estimate");
    assert_eq!(txt.avg_loc, 5);

    assert!(profile_path.exists());
}

#[test]
fn sampling_works_when_discovered_from_a_subdirectory() {
    let repo = sample_repo();
    let out_dir = TempDir::new().unwrap();
    let index_path = out_dir.path().join("repo_index.ndjson");

    // Discovery walks up from a/, so records are repo-root relative;
    // analyzers must resolve against the discovered root, not the
    // directory the tool happened to run from
    let lister = GitLister::discover(repo.path().join("a")).expect("discover");
    let root = lister.repo_path().to_path_buf();
    index::build_index(lister.list_tracked().expect("list"), &index_path).expect("build");

    let config = AuditConfig::default();
    let profile = filetypes::analyze_filetypes(
        &root,
        &index_path,
        &out_dir.path().join("filetype_profile.json"),
        &config.limits,
    )
    .expect("profile");

    let go = profile.loc_estimates.get("go").expect("go estimate");
    assert_eq!(go.sample_files, 2);
    assert_eq!(go.avg_loc, 15);
}

#[test]
fn structure_rollup_counts_prefixes() {
    let repo = sample_repo();
    let out_dir = TempDir::new().unwrap();
    let index_path = out_dir.path().join("repo_index.ndjson");
    let structure_path = out_dir.path().join("structure.json");

    let lister = GitLister::discover(repo.path()).expect("discover");
    index::build_index(lister.list_tracked().expect("list"), &index_path).expect("build");

    let config = AuditConfig::default();
    let report = structure::analyze_structure(&index_path, &structure_path, &config.limits)
        .expect("structure");

    assert_eq!(report.total_files, 3);
    let a = report.top_paths.iter().find(|s| s.path == "a").unwrap();
    assert_eq!(a.file_count, 2);
    let b = report.top_paths.iter().find(|s| s.path == "b").unwrap();
    assert_eq!(b.file_count, 1);
}

#[test]
fn du_ranks_bigger_directory_first() {
    let repo = sample_repo();
    let out_dir = TempDir::new().unwrap();

    let config = AuditConfig::default();
    let entries = du::scan_du(
        repo.path(),
        &out_dir.path().join("du_top.json"),
        &config.scan,
        &config.limits,
    )
    .expect("du");

    let pos = |p: &str| entries.iter().position(|e| e.path == p);
    let a = pos("a").expect("a ranked");
    let b = pos("b").expect("b ranked");
    assert!(a < b, "a holds more bytes than b and must rank first");
    // .git is excluded from the ranking entirely
    assert!(entries.iter().all(|e| !e.path.starts_with(".git")));
}

#[test]
fn manifest_and_risk_scans_over_live_tree() {
    let repo = sample_repo();
    fs::write(repo.path().join("package.json"), "{}").unwrap();
    fs::create_dir_all(repo.path().join(".github/workflows")).unwrap();
    fs::write(repo.path().join(".github/workflows/ci.yml"), "on: push").unwrap();
    fs::write(repo.path().join("a/secret_notes.md"), "x").unwrap();

    let out_dir = TempDir::new().unwrap();
    let config = AuditConfig::default();

    let scan = manifests::scan_manifests(
        repo.path(),
        &out_dir.path().join("manifests.txt"),
        &out_dir.path().join("cicd_workflows.txt"),
        &config.scan,
    )
    .expect("manifests");
    assert_eq!(scan.manifests, vec!["package.json"]);
    assert_eq!(scan.workflows, vec![".github/workflows/ci.yml"]);

    // Risk scan prefers the tracked universe, which does not include
    // the untracked secret_notes.md
    let matches = risks::scan_risks(
        repo.path(),
        &out_dir.path().join("risk_paths.txt"),
        &config.scan,
        &config.limits,
    )
    .expect("risks");
    assert!(matches.is_empty());
}

#[test]
fn bundle_packages_existing_artifacts_with_warnings() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("audit")).unwrap();
    fs::write(dir.path().join("audit/structure.json"), "{}").unwrap();
    fs::write(dir.path().join("runner_config.json"), "{}").unwrap();

    let spec = BundleSpec {
        files: [
            "audit/structure.json",
            "audit/filetype_profile.json",
            "audit/du_top.json",
            "audit/manifests.txt",
            "runner_config.json",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect(),
        flatten: FlattenRule::Names(vec!["runner_config.json".to_string()]),
    };

    let out = dir.path().join("audit_bundle.tar.gz");
    let outcome = bundle::create_bundle(dir.path(), &spec, &out).expect("bundle");

    // 2 of 5 exist: exactly those 2 members, 3 warnings
    assert_eq!(
        outcome.added,
        vec!["audit/structure.json", "runner_config.json"]
    );
    assert_eq!(outcome.missing.len(), 3);
    assert!(out.exists());
}

#[test]
fn full_pipeline_artifacts_land_on_disk() {
    let repo = sample_repo();
    let config = AuditConfig::default();
    let audit_dir = repo.path().join("audit");

    let lister = GitLister::discover(repo.path()).expect("discover");
    index::build_index(
        lister.list_tracked().expect("list"),
        &audit_dir.join("repo_index.ndjson"),
    )
    .expect("index");
    du::scan_du(
        repo.path(),
        &audit_dir.join("du_top.json"),
        &config.scan,
        &config.limits,
    )
    .expect("du");
    filetypes::analyze_filetypes(
        repo.path(),
        &audit_dir.join("repo_index.ndjson"),
        &audit_dir.join("filetype_profile.json"),
        &config.limits,
    )
    .expect("filetypes");
    structure::analyze_structure(
        &audit_dir.join("repo_index.ndjson"),
        &audit_dir.join("structure.json"),
        &config.limits,
    )
    .expect("structure");
    manifests::scan_manifests(
        repo.path(),
        &audit_dir.join("manifests.txt"),
        &audit_dir.join("cicd_workflows.txt"),
        &config.scan,
    )
    .expect("manifests");
    risks::scan_risks(
        repo.path(),
        &audit_dir.join("surface_risk_paths_limited.txt"),
        &config.scan,
        &config.limits,
    )
    .expect("risks");

    let outcome = bundle::create_bundle(
        repo.path(),
        &config.bundles.audit,
        &repo.path().join("audit_bundle.tar.gz"),
    )
    .expect("bundle");

    // Every report artifact exists; only runner_config.json is missing
    assert_eq!(outcome.added.len(), 7);
    assert_eq!(outcome.missing, vec![PathBuf::from("runner_config.json")]);
}
