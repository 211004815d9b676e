//! Writes a pattern into a git repository as backdated empty commits

use std::fs;
use std::path::PathBuf;

use chrono::{Days, NaiveDate, TimeZone};
use git2::{Commit, Repository, RepositoryInitOptions, Signature, Time};
use serde::Serialize;

use super::validation::validate_name;
use crate::types::{CommitLevel, GistoryError, RepoSettings, Result};

/// Placeholder account when the author name is not a GitHub handle
const USERNAME_PLACEHOLDER: &str = "your-username";

/// Wall-clock time of every generated commit (local to the configured offset)
const COMMIT_TIME: (u32, u32, u32) = (11, 11, 11);

/// What was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    pub path: PathBuf,
    pub branch: String,
    pub commits: usize,
    /// First day with at least one commit
    pub first_date: Option<NaiveDate>,
    /// Last day with at least one commit
    pub last_date: Option<NaiveDate>,
}

impl RepoSummary {
    /// Steps to publish the repository on GitHub
    pub fn push_instructions(&self, username: &str) -> String {
        let username = if validate_name(username).is_ok() {
            username
        } else {
            USERNAME_PLACEHOLDER
        };
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        format!(
            "Finally, add repo to GitHub\n\
             1. Create repo {name} on GitHub\n\
             2. Add remote\n   \
                cd {path}\n   \
                git remote add origin git@github.com:{username}/{name}.git\n\
             3. Push to remote\n   \
                git push -u origin {branch}",
            path = self.path.display(),
            branch = self.branch,
        )
    }
}

/// Creates the repository described by [`RepoSettings`]
pub struct RepoWriter {
    settings: RepoSettings,
}

impl RepoWriter {
    pub fn new(settings: RepoSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RepoSettings {
        &self.settings
    }

    /// Initialize the repository (discarding any previous history) and write
    /// `level.commits()` commits for each day starting at `start`.
    pub fn write(&self, start: NaiveDate, levels: &[CommitLevel]) -> Result<RepoSummary> {
        let path = self.settings.repo_path();
        let git_dir = path.join(".git");
        if git_dir.exists() {
            tracing::debug!("Clearing git dir at {}", git_dir.display());
            fs::remove_dir_all(&git_dir)?;
        }
        fs::create_dir_all(&path)?;

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(&self.settings.branch);
        let repo = Repository::init_opts(&path, &opts)?;
        tracing::info!(
            "Initialized {} on branch {}",
            path.display(),
            self.settings.branch
        );

        let tree_id = repo.treebuilder(None)?.write()?;
        let tree = repo.find_tree(tree_id)?;
        let ref_name = format!("refs/heads/{}", self.settings.branch);

        let mut parent: Option<Commit<'_>> = None;
        let mut commits = 0;
        let mut first_date = None;
        let mut last_date = None;

        for (offset, level) in levels.iter().enumerate() {
            if level.commits() == 0 {
                continue;
            }

            let date = start.checked_add_days(Days::new(offset as u64)).ok_or_else(|| {
                GistoryError::InvalidArg(format!("date out of range: {start} + {offset} days"))
            })?;
            let signature = self.signature(date)?;

            for _ in 0..level.commits() {
                let message = format!("Commit #{commits}");
                let parents: Vec<&Commit<'_>> = parent.iter().collect();
                let oid = repo.commit(
                    Some(&ref_name),
                    &signature,
                    &signature,
                    &message,
                    &tree,
                    &parents,
                )?;
                parent = Some(repo.find_commit(oid)?);
                commits += 1;
            }

            first_date.get_or_insert(date);
            last_date = Some(date);
        }

        if commits == 0 {
            tracing::warn!("pattern has no commits, {} is empty", path.display());
        } else {
            tracing::info!("Wrote {commits} commits to {}", path.display());
        }

        Ok(RepoSummary {
            path,
            branch: self.settings.branch.clone(),
            commits,
            first_date,
            last_date,
        })
    }

    /// Author and committer for commits on `date`
    fn signature(&self, date: NaiveDate) -> Result<Signature<'static>> {
        let (h, m, s) = COMMIT_TIME;
        let naive = date
            .and_hms_opt(h, m, s)
            .ok_or_else(|| GistoryError::InvalidArg(format!("invalid commit time on {date}")))?;
        let local = self
            .settings
            .timezone
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| GistoryError::InvalidArg("Cannot convert datetime".to_string()))?;

        let offset_minutes = self.settings.timezone.local_minus_utc() / 60;
        let time = Time::new(local.timestamp(), offset_minutes);
        Ok(Signature::new(
            &self.settings.user_name,
            &self.settings.email,
            &time,
        )?)
    }
}
