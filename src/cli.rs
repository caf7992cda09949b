// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use anyhow::Result;

use crate::filter::{self, DifficultyFilter, FilterCriteria, PageState, TagFilter};
use crate::models::Difficulty;
use crate::problem_manager::ProblemManager;

/// Judgeboard: terminal problem browser and editor for a coding judge platform
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional path to the Judgeboard configuration file
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the judge API base URL from the config
    #[clap(long, value_name = "URL")]
    pub server: Option<String>,

    /// Suppress TUI auto-launch (e.g., for scripting)
    #[clap(long)]
    pub headless: bool,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect problems without launching the TUI
    #[clap(subcommand)]
    Problem(ProblemCommands),
}

#[derive(Subcommand, Debug)]
pub enum ProblemCommands {
    /// List problems, filtered and paginated like the TUI table
    List {
        /// Case-insensitive title substring
        #[clap(long)]
        search: Option<String>,
        #[clap(long, value_enum)]
        difficulty: Option<DifficultyArg>,
        #[clap(long)]
        tag: Option<String>,
        /// 1-based page of 10 problems
        #[clap(long, default_value_t = 1)]
        page: usize,
    },
    /// Print one problem as JSON
    Show { id: Uuid },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

pub async fn handle_command(command: Commands, problem_manager: &ProblemManager) -> Result<()> {
    match command {
        Commands::Problem(problem_command) => {
            handle_problem_command(problem_command, problem_manager).await
        }
    }
}

async fn handle_problem_command(
    command: ProblemCommands,
    problem_manager: &ProblemManager,
) -> Result<()> {
    match command {
        ProblemCommands::List {
            search,
            difficulty,
            tag,
            page,
        } => {
            let problems = problem_manager.list_problems().await?;
            let criteria = FilterCriteria {
                search: search.unwrap_or_default(),
                difficulty: match difficulty {
                    Some(arg) => DifficultyFilter::Only(arg.into()),
                    None => DifficultyFilter::All,
                },
                tag: match tag {
                    Some(tag) => TagFilter::Tag(tag),
                    None => TagFilter::All,
                },
            };
            let filtered = filter::filter_problems(&problems, &criteria);
            let total_pages = PageState::total_pages(filtered.len());
            let mut page_state = PageState::default();
            page_state.jump_to(page, total_pages);

            for problem in page_state.page_slice(&filtered) {
                println!(
                    "{}  {:<8}  {:<40}  {}",
                    problem.id,
                    problem.difficulty.as_key(),
                    truncated(&problem.title, 40),
                    problem.tags.join(", ")
                );
            }
            println!(
                "page {} / {} ({} problems)",
                page_state.current(),
                total_pages.max(1),
                filtered.len()
            );
            Ok(())
        }
        ProblemCommands::Show { id } => {
            let problem = problem_manager.get_problem(id).await?;
            println!("{}", serde_json::to_string_pretty(&problem)?);
            Ok(())
        }
    }
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
