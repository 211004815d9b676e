//! End-to-end: pattern request -> preview cells -> repository on disk

use std::fs;

use chrono::{FixedOffset, NaiveDate, TimeZone};
use git2::{Repository, Sort};
use tempfile::TempDir;

use gistory::patterns::{Font, PatternRequest};
use gistory::services::calendar::{build_cells, columns, CellStats};
use gistory::services::repo_writer::RepoWriter;
use gistory::services::settings::{Settings, SettingsService};
use gistory::types::CommitLevel;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn settings(dir: &TempDir, timezone: &str) -> Settings {
    Settings {
        repo_name: "canvas".to_string(),
        user_name: "octocat".to_string(),
        email: "octocat@example.com".to_string(),
        branch: "main".to_string(),
        timezone: timezone.to_string(),
        output_dir: Some(dir.path().to_path_buf()),
    }
}

/// Commit dates, oldest first, in the commit's own timezone
fn commit_dates(repo: &Repository) -> Vec<NaiveDate> {
    let mut walk = repo.revwalk().unwrap();
    walk.push_head().unwrap();
    walk.set_sorting(Sort::TIME | Sort::REVERSE).unwrap();
    walk.map(|oid| {
        let commit = repo.find_commit(oid.unwrap()).unwrap();
        let time = commit.time();
        let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap();
        offset
            .timestamp_opt(time.seconds(), 0)
            .unwrap()
            .date_naive()
    })
    .collect()
}

#[test]
fn test_pattern_file_to_repository() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("pattern.txt");
    // Two weeks: first column all zero, second column Few on Monday only
    fs::write(&file, "00\n01\n00\n00\n00\n00\n00\n").unwrap();

    let start = date(2024, 1, 7);
    let request = PatternRequest::PatternFile { path: file };
    let levels = request.generate(start).unwrap();
    assert_eq!(levels.len(), 14);

    let cells = build_cells(start, &levels);
    let stats = CellStats::from_cells(start, &cells);
    assert_eq!(stats.data, 14);
    assert_eq!(stats.leading_padding, 0);
    assert_eq!(stats.trailing_padding, 0);
    assert_eq!(columns(&cells).len(), 2);

    let repo_settings = settings(&dir, "+0700").to_repo_settings().unwrap();
    let summary = RepoWriter::new(repo_settings).write(start, &levels).unwrap();
    assert_eq!(summary.commits, 1);
    assert_eq!(summary.first_date, Some(date(2024, 1, 15)));

    let repo = Repository::open(dir.path().join("canvas")).unwrap();
    assert_eq!(commit_dates(&repo), vec![date(2024, 1, 15)]);
}

#[test]
fn test_daily_commit_counts_per_day() {
    let dir = TempDir::new().unwrap();
    let start = date(2024, 1, 7);
    let levels = PatternRequest::Daily {
        end_date: date(2024, 1, 9),
        commit_count: CommitLevel::Many,
    }
    .generate(start)
    .unwrap();

    let repo_settings = settings(&dir, "-0430").to_repo_settings().unwrap();
    let summary = RepoWriter::new(repo_settings).write(start, &levels).unwrap();
    assert_eq!(summary.commits, 9);

    let repo = Repository::open(&summary.path).unwrap();
    let dates = commit_dates(&repo);
    assert_eq!(dates.len(), 9);
    for day in [date(2024, 1, 7), date(2024, 1, 8), date(2024, 1, 9)] {
        assert_eq!(dates.iter().filter(|d| **d == day).count(), 3);
    }
    assert_eq!(
        repo.head().unwrap().shorthand(),
        Some("main"),
        "HEAD should point at the configured branch"
    );
}

#[test]
fn test_text_pattern_preview_has_glyph_columns() {
    let start = date(2024, 1, 7);
    let levels = PatternRequest::Text {
        text: "HI".to_string(),
        font: Font::SubwayTracker,
        commit_count: CommitLevel::ALot,
    }
    .generate(start)
    .unwrap();

    // Whole weeks, since every glyph column is 7 days tall
    assert_eq!(levels.len() % 7, 0);
    assert!(levels.contains(&CommitLevel::ALot));
    assert!(levels
        .iter()
        .all(|l| matches!(l, CommitLevel::Zero | CommitLevel::ALot)));

    let cells = build_cells(start, &levels);
    assert_eq!(columns(&cells).len(), levels.len() / 7);
}

#[test]
fn test_settings_persist_between_runs() {
    let dir = TempDir::new().unwrap();
    let service = SettingsService::with_dir(dir.path().to_path_buf());
    let saved = settings(&dir, "+0530");
    service.save(&saved).unwrap();

    let loaded = SettingsService::with_dir(dir.path().to_path_buf()).load();
    assert_eq!(loaded, saved);
    assert_eq!(
        loaded.to_repo_settings().unwrap().timezone,
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    );
}
