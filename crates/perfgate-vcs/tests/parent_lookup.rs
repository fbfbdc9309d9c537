//! Parent lookup against a real repository built with libgit2

use git2::{Commit, Oid, Repository, Signature};
use perfgate_vcs::{GitCli, GitRepository, ParentLookup, VcsError};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    path: std::path::PathBuf,
    root: Oid,
    left: Oid,
    right: Oid,
    merge: Oid,
}

fn commit(repo: &Repository, parents: &[&Commit<'_>], message: &str) -> Oid {
    let sig = Signature::now("perfgate", "perfgate@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    repo.commit(None, &sig, &sig, message, &tree, parents)
        .unwrap()
}

/// root <- left, root <- right, merge(left, right)
fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    let root = commit(&repo, &[], "root");
    let root_commit = repo.find_commit(root).unwrap();
    let left = commit(&repo, &[&root_commit], "left");
    let right = commit(&repo, &[&root_commit], "right");
    let left_commit = repo.find_commit(left).unwrap();
    let right_commit = repo.find_commit(right).unwrap();
    let merge = commit(&repo, &[&left_commit, &right_commit], "merge");

    Fixture {
        path: dir.path().to_path_buf(),
        _dir: dir,
        root,
        left,
        right,
        merge,
    }
}

#[tokio::test]
async fn libgit2_root_commit_has_no_parents() {
    let fx = fixture();
    let repo = GitRepository::open(&fx.path).unwrap();

    let parents = repo.parents(&fx.root.to_string()).await.unwrap();
    assert!(parents.is_empty());
}

#[tokio::test]
async fn libgit2_merge_parents_are_ordered() {
    let fx = fixture();
    let repo = GitRepository::discover(&fx.path).unwrap();

    let parents = repo.parents(&fx.merge.to_string()).await.unwrap();
    assert_eq!(parents, vec![fx.left.to_string(), fx.right.to_string()]);

    let parents = repo.parents(&fx.left.to_string()).await.unwrap();
    assert_eq!(parents, vec![fx.root.to_string()]);
}

#[tokio::test]
async fn libgit2_unknown_commit_is_git_error() {
    let fx = fixture();
    let repo = GitRepository::open(&fx.path).unwrap();

    let err = repo
        .parents("0000000000000000000000000000000000000001")
        .await
        .unwrap_err();
    assert!(matches!(err, VcsError::Git(_)));
}

#[tokio::test]
async fn libgit2_open_missing_repository() {
    let dir = TempDir::new().unwrap();
    let result = GitRepository::open(dir.path().join("nope"));
    assert!(matches!(result, Err(VcsError::RepositoryNotFound { .. })));
}

#[tokio::test]
async fn git_cli_matches_libgit2() {
    let fx = fixture();
    let git = GitCli::new().repo_dir(&fx.path);

    let parents = git.parents(&fx.merge.to_string()).await.unwrap();
    assert_eq!(parents, vec![fx.left.to_string(), fx.right.to_string()]);

    let parents = git.parents(&fx.right.to_string()).await.unwrap();
    assert_eq!(parents, vec![fx.root.to_string()]);

    let parents = git.parents(&fx.root.to_string()).await.unwrap();
    assert!(parents.is_empty());
}

#[tokio::test]
async fn git_cli_unknown_commit_is_tool_invocation() {
    let fx = fixture();
    let git = GitCli::new().repo_dir(&fx.path);

    let err = git.parents("not-a-commit").await.unwrap_err();
    assert!(err.is_tool_invocation());
}

#[tokio::test]
async fn git_cli_dash_prefixed_commit_is_not_an_option() {
    let fx = fixture();
    let target = fx.path.join("written-by-git");
    let git = GitCli::new().repo_dir(&fx.path);

    let err = git
        .parents(&format!("--output={}", target.display()))
        .await
        .unwrap_err();

    assert!(err.is_tool_invocation());
    assert!(!target.exists());
}

/// Executable standing in for `git` that prints `body` as a shell script
#[cfg(unix)]
fn fake_git(dir: &TempDir, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("fake-git");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[tokio::test]
async fn git_cli_stderr_with_zero_exit_is_tool_invocation() {
    let dir = TempDir::new().unwrap();
    let git = GitCli::new().git_binary(
        fake_git(&dir, "echo abc123\necho 'warning: x' >&2\nexit 0")
            .display()
            .to_string(),
    );

    match git.parents("HEAD").await.unwrap_err() {
        VcsError::ToolInvocation { code, stderr, .. } => {
            assert_eq!(code, Some(0));
            assert_eq!(stderr, "warning: x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn git_cli_clean_zero_exit_returns_parents() {
    let dir = TempDir::new().unwrap();
    let git = GitCli::new().git_binary(
        fake_git(&dir, "echo 'abc123 def456'")
            .display()
            .to_string(),
    );

    assert_eq!(git.parents("HEAD").await.unwrap(), vec!["abc123", "def456"]);
}
