//! Task management commands for CLI.

use clap::Subcommand;
use deepflow_core::storage::{Config, Store};
use deepflow_core::{App, TaskTag};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Tag: general, dev, design, review, meeting, or docs
        #[arg(long, default_value = "general")]
        tag: String,
    },
    /// List tasks (newest first)
    List,
    /// Toggle a task's completion
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut app = App::new(&config, Store::open());

    match action {
        TaskAction::Add { title, tag } => {
            let task = app.add_task(&title, TaskTag::parse(&tag))?;
            println!("Task added: {}", task.id);
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(app.tasks())?);
        }
        TaskAction::Toggle { id } => match app.toggle_task(&id) {
            Some(task) => println!("{}", serde_json::to_string_pretty(task)?),
            None => return Err(format!("Task not found: {id}").into()),
        },
        TaskAction::Delete { id } => {
            if app.delete_task(&id) {
                println!("Task deleted: {id}");
            } else {
                return Err(format!("Task not found: {id}").into());
            }
        }
    }
    Ok(())
}
