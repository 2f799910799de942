//! CLI demo entry point.
//!
//! # Responsibility
//! - Verify `bilink_core` linkage by building a small project/task/label
//!   graph purely through association endpoints.
//! - Print the resulting graph as JSON; `--verify` also checks every
//!   relationship from both ends and exits non-zero on a violation.

mod board;

use bilink_core::{core_version, init_logging, AssociationEndpoint, LogConfig};
use board::{Board, Label, Project, Task};
use log::{error, info};
use std::process::ExitCode;

const LOG_LEVEL_ENV: &str = "BILINK_LOG";

fn main() -> ExitCode {
    let mut config = LogConfig::default();
    if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
        config.level = level;
    }
    if let Err(err) = init_logging(&config) {
        eprintln!("bilink: logging disabled: {err}");
    }

    let verify = std::env::args().skip(1).any(|arg| arg == "--verify");
    info!(
        "event=cli_start module=cli status=ok version={} verify={}",
        core_version(),
        verify
    );

    let board = build_demo_board();

    if verify {
        if let Err(err) = board.verify() {
            error!("event=verify module=cli status=error reason={err}");
            eprintln!("bilink: {err}");
            return ExitCode::FAILURE;
        }
        info!("event=verify module=cli status=ok");
    }

    match serde_json::to_string_pretty(&board.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("bilink: failed to render board: {err}");
            ExitCode::FAILURE
        }
    }
}

fn build_demo_board() -> Board {
    let mut board = Board::default();
    let website = board.add_project("website");
    let backend = board.add_project("backend");
    let design = board.add_task("design landing page");
    let deploy = board.add_task("deploy");
    let docs = board.add_task("write docs");
    let urgent = board.add_label("urgent");
    let infra = board.add_label("infra");

    Project::tasks(website).add_all(&mut board, &[design, deploy, docs]);
    // Re-homing from the task side also drops it from `website`.
    Task::project(deploy).add(&mut board, backend);

    Task::labels(deploy).add_all(&mut board, &[urgent, infra]);
    Label::tasks(urgent).add(&mut board, design);
    Label::tasks(infra).add(&mut board, docs);
    Task::labels(docs).remove_all(&mut board);

    board
}

#[cfg(test)]
mod tests {
    use super::build_demo_board;

    #[test]
    fn demo_board_is_symmetric() {
        let board = build_demo_board();
        assert_eq!(board.verify(), Ok(()));
    }

    #[test]
    fn demo_board_snapshot_reflects_moves() {
        let snapshot = build_demo_board().snapshot();

        let website = snapshot
            .projects
            .iter()
            .find(|project| project.name == "website")
            .expect("website project");
        assert!(!website.tasks.contains("deploy"));
        assert_eq!(website.tasks.len(), 2);

        let deploy = snapshot
            .tasks
            .iter()
            .find(|task| task.title == "deploy")
            .expect("deploy task");
        assert_eq!(deploy.project.as_deref(), Some("backend"));
        assert_eq!(deploy.labels.len(), 2);

        let infra = snapshot
            .labels
            .iter()
            .find(|label| label.name == "infra")
            .expect("infra label");
        assert_eq!(infra.tasks.len(), 1);
        assert!(infra.tasks.contains("deploy"));
    }
}
