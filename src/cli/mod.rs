mod args;
mod render;

pub use args::{PatternArgs, RepoArgs};
pub use render::{render_text, PreviewJson};

use clap::{ArgAction, Parser, Subcommand};

use crate::services::calendar::build_cells;
use crate::services::repo_writer::RepoWriter;
use crate::services::settings::SettingsService;
use crate::tui;

/// Draw on your GitHub contribution graph with backdated commits
#[derive(Parser)]
#[command(name = "gistory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Print the contribution graph a pattern would produce
    Preview {
        #[command(flatten)]
        pattern: PatternArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a repository whose commits draw the pattern
    Generate {
        #[command(flatten)]
        pattern: PatternArgs,

        #[command(flatten)]
        repo: RepoArgs,
    },
}

impl Cli {
    /// Whether the TUI will own the terminal
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            None | Some(Commands::Tui) => {
                let service = match SettingsService::new() {
                    Ok(service) => Some(service),
                    Err(e) => {
                        tracing::warn!("settings unavailable: {e}");
                        None
                    }
                };
                tui::run(service)
            }
            Some(Commands::Preview { pattern, json }) => {
                let start = pattern.start_date;
                let levels = pattern.to_request()?.generate(start)?;
                let cells = build_cells(start, &levels);

                if json {
                    let doc = PreviewJson::new(start, &levels, &cells);
                    println!("{}", serde_json::to_string_pretty(&doc)?);
                } else {
                    println!("{}", render_text(&cells));
                    let commits: usize = levels.iter().map(|l| l.commits()).sum();
                    println!("\n{} days, {} commits", levels.len(), commits);
                }
                Ok(())
            }
            Some(Commands::Generate { pattern, repo }) => {
                let start = pattern.start_date;
                let request = pattern.to_request()?;

                let saved = SettingsService::new()
                    .map(|service| service.load())
                    .unwrap_or_default();
                let mut settings = repo.apply(saved);
                settings.fill_from_git_config();
                let repo_settings = settings.to_repo_settings()?;

                let levels = request.generate(start)?;
                let summary = RepoWriter::new(repo_settings).write(start, &levels)?;

                println!(
                    "Created {} commits in {}",
                    summary.commits,
                    summary.path.display()
                );
                if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
                    println!("Commits span {first} to {last}");
                }
                println!();
                println!("{}", summary.push_instructions(&settings.user_name));
                Ok(())
            }
        }
    }
}
