//! Git-backed workspaces for declaration lookup.
//!
//! A [`Workspace`] is a scratch checkout of a repository inside a
//! `TempDir`. Every fetch operation checks out the requested revision in
//! the scratch copy, so the caller's repository is never mutated and
//! concurrent workspaces never fight over HEAD.

use crate::Settings;
use crate::declaration::Declaration;
use crate::error::{RepoError, RepoResult};
use crate::parsing::get_registry;
use crate::target::Target;
use crate::types::Range;
use git2::{
    AutotagOption, Cred, CredentialType, FetchOptions, ProxyOptions, RemoteCallbacks, Repository,
    build::{CheckoutBuilder, RepoBuilder},
};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

/// A scratch checkout of a repository, plus the parsers to read it
pub struct Workspace {
    dir: TempDir,
    repo: Repository,
    default_branch: String,
    settings: Arc<Settings>,
}

impl Workspace {
    /// Clone a remote repository into a scratch directory
    pub fn clone(repo_url: &str, settings: Arc<Settings>) -> RepoResult<Self> {
        let dir = TempDir::new()?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(credential_callback);

        let mut fetch_opts = FetchOptions::new();
        if let Some(depth) = settings.fetch.depth {
            fetch_opts.depth(depth);
        }
        if settings.fetch.download_tags {
            fetch_opts.download_tags(AutotagOption::All);
        }
        fetch_opts.remote_callbacks(callbacks);

        // Respect environment proxy settings
        let mut proxy_opts = ProxyOptions::new();
        proxy_opts.auto();
        fetch_opts.proxy_options(proxy_opts);

        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_opts);

        let repo = builder
            .clone(repo_url, dir.path())
            .map_err(|e| RepoError::GitOperation {
                operation: format!("clone {repo_url}: {e}"),
            })?;

        debug!(url = repo_url, dir = %dir.path().display(), "cloned workspace");
        Self::from_parts(dir, repo, settings)
    }

    /// Copy a local repository into a scratch directory, so checkouts
    /// never touch the source tree
    pub fn open_local(local_dir: impl AsRef<Path>, settings: Arc<Settings>) -> RepoResult<Self> {
        let dir = TempDir::new()?;
        copy_tree(local_dir.as_ref(), dir.path())?;

        let repo = Repository::open(dir.path()).map_err(|e| RepoError::GitOperation {
            operation: format!("open copied repository: {e}"),
        })?;

        debug!(
            source = %local_dir.as_ref().display(),
            dir = %dir.path().display(),
            "copied local workspace"
        );
        Self::from_parts(dir, repo, settings)
    }

    fn from_parts(dir: TempDir, repo: Repository, settings: Arc<Settings>) -> RepoResult<Self> {
        let default_branch = {
            let head = repo.head().map_err(|e| RepoError::GitOperation {
                operation: format!("resolve HEAD: {e}"),
            })?;
            head.shorthand().unwrap_or("HEAD").to_string()
        };

        Ok(Self {
            dir,
            repo,
            default_branch,
            settings,
        })
    }

    /// Branch the repository was on when the workspace was created
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Path of the scratch checkout
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Fetch declarations matching `target` in `file_path` at `rev`.
    ///
    /// Files with an extension no parser claims produce an empty result,
    /// not an error; a missing file is an error.
    pub fn fetch_declarations(
        &self,
        target: &Target,
        rev: &str,
        file_path: impl AsRef<Path>,
    ) -> RepoResult<Vec<Declaration>> {
        let (_, declarations) = self.parse_file_at(rev, file_path.as_ref())?;
        Ok(declarations
            .into_iter()
            .filter(|decl| target.matches(decl))
            .collect())
    }

    /// Source text of each declaration matching `target`
    pub fn fetch_definition(
        &self,
        target: &Target,
        rev: &str,
        file_path: impl AsRef<Path>,
    ) -> RepoResult<Vec<String>> {
        let (source, declarations) = self.parse_file_at(rev, file_path.as_ref())?;
        Ok(declarations
            .into_iter()
            .filter(|decl| target.matches(decl))
            .map(|decl| slice_lines(&source, decl.range))
            .collect())
    }

    /// Documentation of each declaration matching `target`; declarations
    /// without a comment contribute an empty string
    pub fn fetch_documentation(
        &self,
        target: &Target,
        rev: &str,
        file_path: impl AsRef<Path>,
    ) -> RepoResult<Vec<String>> {
        let declarations = self.fetch_declarations(target, rev, file_path)?;
        Ok(declarations
            .into_iter()
            .map(|decl| decl.doc_comment.unwrap_or_default())
            .collect())
    }

    /// Inclusive zero-based line slice of a file at a revision
    pub fn fetch_lines(
        &self,
        rev: &str,
        file_path: impl AsRef<Path>,
        start: usize,
        end: usize,
    ) -> RepoResult<Vec<String>> {
        if end < start {
            return Err(RepoError::InvalidLineRange { start, end });
        }

        self.checkout(rev)?;
        let full_path = self.resolve_file(file_path.as_ref())?;
        let content = std::fs::read_to_string(full_path)?;

        Ok(content
            .lines()
            .skip(start)
            .take(end - start + 1)
            .map(|line| line.to_string())
            .collect())
    }

    /// All declarations of a file at a revision
    pub fn list_declarations(
        &self,
        rev: &str,
        file_path: impl AsRef<Path>,
    ) -> RepoResult<Vec<Declaration>> {
        let (_, declarations) = self.parse_file_at(rev, file_path.as_ref())?;
        Ok(declarations)
    }

    /// Check out a revision (branch, tag, or commit SHA) in the scratch
    /// copy, detaching HEAD for anything that is not a local branch
    pub fn checkout(&self, rev: &str) -> RepoResult<()> {
        let obj = self
            .repo
            .revparse_single(rev)
            .map_err(|e| RepoError::GitOperation {
                operation: format!("could not resolve revision '{rev}': {e}"),
            })?;

        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.repo
            .checkout_tree(&obj, Some(&mut checkout))
            .map_err(|e| RepoError::GitOperation {
                operation: format!("checkout tree for '{rev}': {e}"),
            })?;

        if self.repo.find_branch(rev, git2::BranchType::Local).is_ok() {
            self.repo
                .set_head(&format!("refs/heads/{rev}"))
                .map_err(|e| RepoError::GitOperation {
                    operation: format!("set head: {e}"),
                })?;
        } else {
            let commit = obj.peel_to_commit().map_err(|e| RepoError::GitOperation {
                operation: format!("peel '{rev}' to commit: {e}"),
            })?;
            self.repo
                .set_head_detached(commit.id())
                .map_err(|e| RepoError::GitOperation {
                    operation: format!("set detached head: {e}"),
                })?;
        }

        debug!(rev, "checked out revision");
        Ok(())
    }

    /// Commit SHA the scratch copy currently points at
    pub fn current_commit(&self) -> RepoResult<String> {
        let head = self.repo.head().map_err(|e| RepoError::GitOperation {
            operation: format!("get HEAD: {e}"),
        })?;
        let commit = head.peel_to_commit().map_err(|e| RepoError::GitOperation {
            operation: format!("peel to commit: {e}"),
        })?;
        Ok(commit.id().to_string())
    }

    fn parse_file_at(&self, rev: &str, file_path: &Path) -> RepoResult<(String, Vec<Declaration>)> {
        self.checkout(rev)?;
        let full_path = self.resolve_file(file_path)?;

        let source =
            std::fs::read_to_string(&full_path).map_err(|e| RepoError::Extract(
                crate::error::ExtractError::FileRead {
                    path: full_path.clone(),
                    source: e,
                },
            ))?;

        let extension = full_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let registry = get_registry().lock().map_err(|_| RepoError::GitOperation {
            operation: "language registry lock poisoned".to_string(),
        })?;

        let Some(definition) = registry.get_by_extension(extension) else {
            debug!(extension, "no parser claims this extension");
            return Ok((source, Vec::new()));
        };

        let mut parser = registry.create_parser(definition.id(), &self.settings)?;
        let declarations = parser.parse(&source);
        Ok((source, declarations))
    }

    fn resolve_file(&self, file_path: &Path) -> RepoResult<PathBuf> {
        let full_path = self.dir.path().join(file_path);
        if !full_path.exists() {
            return Err(RepoError::FileNotFound {
                path: file_path.to_path_buf(),
            });
        }
        Ok(full_path)
    }
}

impl Display for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on branch {}",
            self.dir.path().display(),
            self.default_branch
        )
    }
}

/// Credential callback for git2 authentication
fn credential_callback(
    _url: &str,
    username_from_url: Option<&str>,
    allowed_types: CredentialType,
) -> Result<Cred, git2::Error> {
    if allowed_types.is_ssh_key() {
        if let Ok(cred) = Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")) {
            return Ok(cred);
        }
    }

    if let Ok(cred) = Cred::default() {
        return Ok(cred);
    }

    if allowed_types.is_user_pass_plaintext() {
        if let (Ok(username), Ok(password)) =
            (std::env::var("GIT_USERNAME"), std::env::var("GIT_PASSWORD"))
        {
            return Cred::userpass_plaintext(&username, &password);
        }
    }

    Err(git2::Error::from_str("no credentials available"))
}

/// Copy a directory tree, .git included, into the destination
fn copy_tree(source: &Path, dest: &Path) -> RepoResult<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| RepoError::GitOperation {
            operation: format!("walk source tree: {e}"),
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .expect("walkdir yields paths under its root");
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
        // Symlinks are skipped; git checkouts recreate what matters
    }
    Ok(())
}

/// Join the lines covered by a declaration's range
fn slice_lines(source: &str, range: Range) -> String {
    source
        .lines()
        .skip(range.start_line as usize)
        .take((range.end_line - range.start_line) as usize + 1)
        .collect::<Vec<_>>()
        .join("\n")
}
