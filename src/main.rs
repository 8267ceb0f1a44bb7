use std::sync::Arc;

use eyre::{Context, Result};
use prio_rs::api::new_api;
use prio_rs::cli::{Action, Command};
use prio_rs::config::init_logger;
use prio_rs::controller::TaskController;
use prio_rs::models::{ArcNotifier, NoticeKind, NoticeMessage, Task};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    let config = cmd.get_config()?;
    init_logger(&config.log)?;

    let api = new_api(&config.api)?;

    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel::<NoticeMessage>();
    let notifier: ArcNotifier = Arc::new(notice_tx);

    // User-facing notice sink; runs until the controller (the only sender)
    // is dropped.
    let printer = tokio::spawn(async move {
        while let Some(notice) = notice_rx.recv().await {
            match notice.kind() {
                NoticeKind::Info => println!("{}", notice.message()),
                NoticeKind::Warning => eprintln!("warning: {}", notice.message()),
                NoticeKind::Error => eprintln!("error: {}", notice.message()),
            }
        }
    });

    let controller = TaskController::new(api, notifier);
    // Every command starts from a fresh snapshot of the collection.
    controller.refresh().await;

    match cmd.action() {
        Action::List { priority } => {
            controller.set_filter(priority.clone());
        }
        Action::Add { name, priority } => controller.add(name, priority).await,
        Action::Remove { id } => controller.remove(*id).await,
        Action::Toggle { id } => {
            let task = controller
                .tasks()
                .into_iter()
                .find(|t| t.id() == *id)
                .ok_or_else(|| eyre::eyre!("no task with id {}", id))?;
            controller.toggle_status(&task).await;
        }
        Action::Update {
            id,
            name,
            priority,
            status,
        } => controller.update(*id, name, priority, *status).await,
    }

    print_tasks(&controller.filtered_tasks());

    // Dropping the controller closes the notice channel.
    drop(controller);
    printer.await.wrap_err("draining notices")?;
    Ok(())
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }

    println!(
        "{:<6} {:<32} {:<12} {:<10}",
        "ID", "NAME", "STATUS", "PRIORITY"
    );
    for task in tasks {
        println!(
            "{:<6} {:<32} {:<12} {:<10}",
            task.id(),
            task.name(),
            task.status(),
            task.priority()
        );
    }
}
