use gitstamp_core::{CommandRunner, ErrorKind, GitStampError, Preset};
use std::process::Command;
use tempfile::TempDir;

/// Run a git command and assert it succeeded
fn git(root: &std::path::Path, args: &[&str]) -> std::process::Output {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

/// Helper to create a test git repo with one commit on branch `main`
fn create_test_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    dir
}

fn init_repo(root: &std::path::Path) {
    git(root, &["init"]);
    git(root, &["config", "user.email", "test@test.com"]);
    git(root, &["config", "user.name", "Test User"]);
    git(root, &["config", "commit.gpgsign", "false"]);
    git(root, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    std::fs::write(root.join("README.md"), "# fixture\n").unwrap();
    git(root, &["add", "."]);
    git(root, &["commit", "-m", "init"]);
}

fn head_sha(root: &std::path::Path) -> String {
    let head = git(root, &["rev-parse", "HEAD"]);
    String::from_utf8_lossy(&head.stdout).trim().to_string()
}

#[test]
fn test_hash_matches_head() {
    let repo = create_test_repo();
    let hash = gitstamp_core::hash(repo.path(), None).unwrap();
    assert_eq!(hash.len(), 40);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(hash, head_sha(repo.path()));
}

#[test]
fn test_branch_and_author() {
    let repo = create_test_repo();
    assert_eq!(gitstamp_core::branch(repo.path(), None).unwrap(), "main");
    assert_eq!(
        gitstamp_core::last_commit_by(repo.path(), None).unwrap(),
        "Test User <test@test.com>"
    );
}

#[test]
fn test_last_commit_on_uses_default_date_format() {
    let repo = create_test_repo();
    let direct = git(repo.path(), &["log", "-1", "--pretty=format:%cd"]);
    assert_eq!(
        gitstamp_core::last_commit_on(repo.path(), None).unwrap(),
        String::from_utf8_lossy(&direct.stdout).trim_end()
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_directory_reaches_git_unchanged() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let root = dir.path().join(OsStr::from_bytes(b"repo\xff"));
    std::fs::create_dir(&root).unwrap();
    init_repo(&root);

    assert_eq!(gitstamp_core::hash(&root, None).unwrap(), head_sha(&root));
}

#[test]
fn test_version_tracks_tags_and_dirty_state() {
    let repo = create_test_repo();
    let root = repo.path();

    let sha = head_sha(root);
    let untagged = gitstamp_core::version(root, None).unwrap();
    assert!(sha.starts_with(&untagged), "{untagged} is not a prefix of {sha}");

    git(root, &["tag", "v1.2.3"]);
    assert_eq!(gitstamp_core::version(root, None).unwrap(), "v1.2.3");

    std::fs::write(root.join("README.md"), "# changed\n").unwrap();
    assert_eq!(gitstamp_core::version(root, None).unwrap(), "v1.2.3-dirty");
}

#[test]
fn test_non_repository_is_execution_failure() {
    let dir = TempDir::new().unwrap();
    let err = gitstamp_core::hash(dir.path(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExecutionFailure);
    match err {
        GitStampError::CommandFailed { code, stderr, .. } => {
            assert_ne!(code, Some(0));
            assert!(!stderr.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_directory_is_invalid_argument() {
    let err = gitstamp_core::branch("", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.to_string(), "no git repository directory provided.");
}

#[tokio::test]
async fn test_async_matches_blocking() {
    let repo = create_test_repo();
    let runner = CommandRunner::new();

    for preset in Preset::ALL {
        let blocking = runner.preset(preset, repo.path(), None).unwrap();
        let non_blocking = runner.preset_async(preset, repo.path(), None).await.unwrap();
        assert_eq!(blocking, non_blocking, "{preset} differs");
    }
}

#[tokio::test]
async fn test_stamp_collects_all_presets() {
    let repo = create_test_repo();
    let stamp = CommandRunner::new().stamp(repo.path()).await.unwrap();
    assert_eq!(stamp.hash, head_sha(repo.path()));
    assert_eq!(stamp.branch, "main");
    assert_eq!(stamp.last_commit_by, "Test User <test@test.com>");
}

#[tokio::test]
async fn test_callback_delivers_result() {
    let repo = create_test_repo();
    let (tx, rx) = tokio::sync::oneshot::channel();

    CommandRunner::new()
        .run_with_callback(repo.path(), "rev-parse --abbrev-ref HEAD", move |result| {
            let _ = tx.send(result);
        })
        .await
        .unwrap();

    assert_eq!(rx.await.unwrap().unwrap(), "main");
}
