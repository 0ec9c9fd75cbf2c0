use clap::{ArgAction, Parser, Subcommand};

use crate::core::error::{TodoError, TodoResult};
use crate::core::store::Store;
use crate::core::TaskList;
use crate::render;

const DB_FILE: &str = "todo.db";

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Deadline-aware todo list")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tasks
    List {
        /// Sort by "title" or "deadline" before printing
        #[arg(long)]
        sort: Option<String>,
        /// Sort ascending; pass false for descending
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        ascend: bool,
    },

    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Deadline offset from now, e.g. "1d 2h 30m" (default: one month)
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Rename a task
    Edit {
        /// Combined index and title, e.g. "2:Pay rent"
        spec: String,
    },

    /// Toggle a task's completion
    Toggle {
        /// Task index, as shown by `list`
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Delete a task
    Delete {
        /// Task index, as shown by `list`
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Reorder tasks by "title" or "deadline", then print them
    Sort {
        /// Sort criteria
        criteria: String,
        /// Sort ascending; pass false for descending
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        ascend: bool,
    },
}

pub fn run() -> TodoResult<()> {
    let cli = Cli::parse();

    let mut store = Store::open(DB_FILE)?;
    let mut list = TaskList::from_tasks(store.load()?);

    match cli.command {
        Commands::List { sort, ascend } => cmd_list(&mut store, &mut list, sort.as_deref(), ascend),
        Commands::Add { title, deadline } => {
            cmd_add(&mut store, &mut list, &title, deadline.as_deref())
        }
        Commands::Edit { spec } => cmd_edit(&mut store, &mut list, &spec),
        Commands::Toggle { index } => cmd_toggle(&mut store, &mut list, index),
        Commands::Delete { index } => cmd_delete(&mut store, &mut list, index),
        Commands::Sort { criteria, ascend } => cmd_sort(&mut store, &mut list, &criteria, ascend),
    }
}

fn cmd_list(
    store: &mut Store,
    list: &mut TaskList,
    sort: Option<&str>,
    ascend: bool,
) -> TodoResult<()> {
    if let Some(criteria) = sort {
        list.sort(criteria, ascend)?;
        store.save(list.tasks())?;
    }
    render::print_table(list.tasks());
    Ok(())
}

fn cmd_add(
    store: &mut Store,
    list: &mut TaskList,
    title: &str,
    deadline: Option<&str>,
) -> TodoResult<()> {
    list.add(title, deadline)?;
    store.save(list.tasks())?;
    println!("Added task #{}: {}", list.len() - 1, title);
    Ok(())
}

fn cmd_edit(store: &mut Store, list: &mut TaskList, spec: &str) -> TodoResult<()> {
    let (index, title) = parse_edit_spec(spec)?;
    list.edit(index, title)?;
    store.save(list.tasks())?;
    println!("Updated task #{index}: {title}");
    Ok(())
}

fn cmd_toggle(store: &mut Store, list: &mut TaskList, index: i64) -> TodoResult<()> {
    let task = list.toggle(index)?;
    let (completed, title) = (task.completed, task.title.clone());
    store.save(list.tasks())?;

    if completed {
        println!("Completed task #{index}: {title}");
    } else {
        println!("Reopened task #{index}: {title}");
    }
    Ok(())
}

fn cmd_delete(store: &mut Store, list: &mut TaskList, index: i64) -> TodoResult<()> {
    let removed = list.delete(index)?;
    store.save(list.tasks())?;
    println!("Deleted task #{}: {}", index, removed.title);
    Ok(())
}

fn cmd_sort(store: &mut Store, list: &mut TaskList, criteria: &str, ascend: bool) -> TodoResult<()> {
    list.sort(criteria, ascend)?;
    store.save(list.tasks())?;
    render::print_table(list.tasks());
    Ok(())
}

/// Splits the combined edit argument on its first colon.
fn parse_edit_spec(spec: &str) -> TodoResult<(i64, &str)> {
    let (index, title) = spec.split_once(':').ok_or(TodoError::EditFormat)?;
    let index = index
        .parse()
        .map_err(|_| TodoError::EditIndex(index.to_string()))?;
    Ok((index, title))
}
