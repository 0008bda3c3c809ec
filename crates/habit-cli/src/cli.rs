//! Command handlers and their clap argument structures.
//!
//! Every command goes through the [`DataProvider`], so each invocation
//! produces at most one change signal, which is logged at debug level.
//! Output is markdown built from the core display types and printed through
//! the [`TerminalRenderer`].

use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use habit_core::{
    models::{Color, Schedule, Tracker, TrackerCategory, TrackerId, WeekDay},
    Categories, CompletionHistory, CreateResult, DataProvider, DeleteResult, TrackerError,
    UpdateResult,
};
use jiff::{civil::Date, Zoned};
use log::debug;

use crate::renderer::TerminalRenderer;

const DEFAULT_EMOJI: &str = "⭐";
const DEFAULT_COLOR: &str = "#33CF69";

/// Category management commands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    #[command(alias = "a")]
    Add(CategoryTitleArgs),
    /// Rename a category, keeping its trackers
    #[command(alias = "r")]
    Rename(RenameCategoryArgs),
    /// Delete a category together with its trackers
    #[command(aliases = ["d", "rm"])]
    Delete(CategoryTitleArgs),
    /// List all categories
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show the trackers of one category
    #[command(alias = "s")]
    Show(CategoryTitleArgs),
}

#[derive(Args)]
pub struct CategoryTitleArgs {
    /// Category title
    pub title: String,
}

#[derive(Args)]
pub struct RenameCategoryArgs {
    /// Current title
    pub title: String,
    /// New title
    pub new_title: String,
}

/// Tracker management commands
#[derive(Subcommand)]
pub enum TrackerCommands {
    /// Create a habit (with --schedule) or a one-off event
    #[command(alias = "a")]
    Add(AddTrackerArgs),
    /// Change a tracker's attributes or move it to another category
    #[command(alias = "u")]
    Update(UpdateTrackerArgs),
    /// Delete a tracker and its completion marks
    #[command(aliases = ["d", "rm"])]
    Delete(TrackerIdArgs),
    /// Show a tracker and its completion history
    #[command(alias = "s")]
    Show(TrackerIdArgs),
}

#[derive(Args)]
pub struct AddTrackerArgs {
    /// Name of the tracker
    pub name: String,
    /// Category to file the tracker under, created if missing
    #[arg(short, long)]
    pub category: String,
    /// Emoji shown next to the name
    #[arg(short, long, default_value = DEFAULT_EMOJI)]
    pub emoji: String,
    /// Colour as #RRGGBB or #RRGGBBAA
    #[arg(long, default_value = DEFAULT_COLOR)]
    pub color: Color,
    /// Weekdays the habit repeats on, e.g. mon,wed,fri. Omit for an event
    #[arg(short, long, value_delimiter = ',')]
    pub schedule: Option<Vec<WeekDay>>,
}

#[derive(Args)]
pub struct UpdateTrackerArgs {
    /// ID of the tracker to update
    pub id: TrackerId,
    /// New name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New emoji
    #[arg(short, long)]
    pub emoji: Option<String>,
    /// New colour as #RRGGBB or #RRGGBBAA
    #[arg(long)]
    pub color: Option<Color>,
    /// New weekdays, habits only
    #[arg(short, long, value_delimiter = ',')]
    pub schedule: Option<Vec<WeekDay>>,
    /// Move the tracker to this category, created if missing
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct TrackerIdArgs {
    /// ID of the tracker
    pub id: TrackerId,
}

#[derive(Args)]
pub struct CompletionArgs {
    /// ID of the tracker
    pub id: TrackerId,
    /// Day as YYYY-MM-DD. Defaults to today
    #[arg(short, long)]
    pub date: Option<Date>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Day as YYYY-MM-DD. Defaults to today
    #[arg(short, long)]
    pub date: Option<Date>,
    /// Only show trackers whose name contains this text
    #[arg(long)]
    pub search: Option<String>,
    /// Print the view as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

fn today() -> Date {
    Zoned::now().date()
}

/// Runs commands against a data provider and renders their results.
pub struct Cli {
    provider: DataProvider,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(mut provider: DataProvider, renderer: TerminalRenderer) -> Self {
        provider.set_observer(Rc::new(|| debug!("event=data_changed module=cli")));
        Self { provider, renderer }
    }

    pub fn handle_category_command(mut self, command: CategoryCommands) -> Result<()> {
        match command {
            CategoryCommands::Add(args) => {
                let category = self.provider.add_category(&args.title)?;
                self.renderer
                    .render(&CreateResult::new(category).to_string())
            }
            CategoryCommands::Rename(args) => {
                let category = self.find_category(&args.title)?;
                let renamed = self.provider.rename_category(&category, &args.new_title)?;
                self.renderer
                    .render(&UpdateResult::new(renamed).to_string())
            }
            CategoryCommands::Delete(args) => {
                let category = self.find_category(&args.title)?;
                self.provider.delete_category(&category)?;
                self.renderer
                    .render(&DeleteResult::new("category", category.title).to_string())
            }
            CategoryCommands::List => {
                let categories = self.provider.categories().list()?;
                self.renderer.render(&Categories(categories).to_string())
            }
            CategoryCommands::Show(args) => {
                let category = self.find_category(&args.title)?;
                self.renderer.render(&category.to_string())
            }
        }
    }

    pub fn handle_tracker_command(mut self, command: TrackerCommands) -> Result<()> {
        match command {
            TrackerCommands::Add(args) => {
                let category = self.category_or_create(&args.category)?;
                let tracker = match args.schedule {
                    Some(days) => Tracker::habit(
                        args.name,
                        args.color,
                        args.emoji,
                        days.into_iter().collect(),
                    ),
                    None => Tracker::event(args.name, args.color, args.emoji),
                };
                self.provider.add_tracker(&tracker, &category)?;
                self.renderer
                    .render(&CreateResult::new(tracker).to_string())
            }
            TrackerCommands::Update(args) => {
                let tracker = self.find_tracker(args.id)?;
                let mut attributes = tracker.attributes();
                if let Some(name) = args.name {
                    attributes.name = name;
                }
                if let Some(emoji) = args.emoji {
                    attributes.emoji = emoji;
                }
                if let Some(color) = args.color {
                    attributes.color = color;
                }
                if let Some(days) = args.schedule {
                    attributes.schedule = Some(days.into_iter().collect::<Schedule>());
                }
                let category = args
                    .category
                    .map(|title| self.category_or_create(&title))
                    .transpose()?;

                let updated =
                    self.provider
                        .update_tracker(tracker.id, &attributes, category.as_ref())?;
                self.renderer
                    .render(&UpdateResult::new(updated).to_string())
            }
            TrackerCommands::Delete(args) => {
                let tracker = self.find_tracker(args.id)?;
                self.provider.delete_tracker(tracker.id)?;
                self.renderer
                    .render(&DeleteResult::new("tracker", tracker.name).to_string())
            }
            TrackerCommands::Show(args) => {
                let tracker = self.find_tracker(args.id)?;
                let history = self.provider.records().records_for(tracker.id)?;
                let mut output = tracker.to_string();
                if let Some(category) = self.provider.trackers().category_of(tracker.id)? {
                    output.push_str(&format!("- **Category**: {}\n", category.title));
                }
                output.push('\n');
                output.push_str(&CompletionHistory(history).to_string());
                self.renderer.render(&output)
            }
        }
    }

    pub fn mark(mut self, args: CompletionArgs) -> Result<()> {
        let date = args.date.unwrap_or_else(today);
        if date > today() {
            bail!("Cannot mark {date} as completed: the day has not happened yet");
        }
        let tracker = self.find_tracker(args.id)?;
        self.provider.mark_completed(tracker.id, date)?;
        self.renderer
            .render(&format!("Marked **{}** completed on {date}\n", tracker.name))
    }

    pub fn unmark(mut self, args: CompletionArgs) -> Result<()> {
        let date = args.date.unwrap_or_else(today);
        let tracker = self.find_tracker(args.id)?;
        self.provider.unmark_completed(tracker.id, date)?;
        self.renderer
            .render(&format!("Unmarked **{}** on {date}\n", tracker.name))
    }

    pub fn show(mut self, args: ShowArgs) -> Result<()> {
        let date = args.date.unwrap_or_else(today);
        self.provider.set_search_text(args.search.as_deref())?;
        self.provider.load_trackers(date)?;

        if args.json {
            let json = serde_json::to_string_pretty(self.provider.view())
                .context("Failed to serialize view")?;
            println!("{json}");
            return Ok(());
        }
        self.renderer.render(&self.provider.view().to_string())
    }

    fn find_category(&self, title: &str) -> Result<TrackerCategory> {
        self.provider
            .categories()
            .get(title)?
            .ok_or_else(|| TrackerError::not_found("Category", title.trim()).into())
    }

    fn category_or_create(&mut self, title: &str) -> Result<TrackerCategory> {
        match self.provider.categories().get(title)? {
            Some(category) => Ok(category),
            None => Ok(self.provider.add_category(title)?),
        }
    }

    fn find_tracker(&self, id: TrackerId) -> Result<Tracker> {
        self.provider
            .trackers()
            .get(id)?
            .ok_or_else(|| TrackerError::not_found("Tracker", id).into())
    }
}
