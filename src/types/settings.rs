//! Repository settings

use std::path::PathBuf;

use chrono::FixedOffset;

/// Everything needed to write the generated repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSettings {
    /// Repository directory name
    pub name: String,
    /// Author/committer name
    pub user_name: String,
    /// Author/committer email. Must match a GitHub email for the
    /// commits to show up on the profile.
    pub email: String,
    /// Branch HEAD points at
    pub branch: String,
    /// Offset used for commit timestamps
    pub timezone: FixedOffset,
    /// Directory the repository is created in
    pub output_dir: PathBuf,
}

impl RepoSettings {
    /// Full path of the repository working directory
    pub fn repo_path(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }
}
