mod api;
mod app;
mod cli;
mod controller;
mod error;
mod models;
mod state;
mod storage;
#[cfg(test)]
mod testing;
mod types;
mod view;

mod metadata {
    include!(concat!(env!("OUT_DIR"), "/pkg_info.rs"));
}

use std::io::Stdout;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{RecipeApi, create_recipe_client};
use crate::app::{App, Command as ShellCommand, Event};
use crate::cli::{Cli, Command, Settings};
use crate::controller::Controller;
use crate::models::Likes;
use crate::storage::{FileLikesStore, LikesStore, MemoryLikesStore};
use crate::view::TerminalView;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = cli.settings;

    match cli.command {
        Command::Version => {
            println!("{} {}", metadata::PKG_NAME, metadata::PKG_VERSION);
            return Ok(());
        }
        Command::Status => {
            print_status(&settings)?;
            return Ok(());
        }
        _ => {}
    }

    settings.validate()?;
    let mut controller = build_controller(&settings);

    match cli.command {
        Command::Search { query, page } => {
            controller.control_search(&query).await;
            if page != 1 {
                controller.go_to_page(page);
            }
        }
        Command::Recipe { id, servings } => {
            controller.control_recipe(&id).await;
            if let Some(servings) = servings {
                controller.set_servings(servings);
            }
        }
        Command::Likes => controller.show_likes(),
        Command::Like { id } => {
            controller.control_recipe(&id).await;
            controller.toggle_like();
        }
        Command::Shell { open } => run_shell(controller, open).await,
        Command::Status | Command::Version => {}
    }

    Ok(())
}

fn likes_store(settings: &Settings) -> Box<dyn LikesStore> {
    match settings.likes_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using likes file");
            Box::new(FileLikesStore::new(path))
        }
        None => Box::new(MemoryLikesStore::new()),
    }
}

fn build_controller(settings: &Settings) -> Controller<TerminalView<Stdout>> {
    let api: Arc<dyn RecipeApi> = Arc::new(create_recipe_client(
        &settings.api_url,
        settings.http_timeout(),
    ));

    let mut likes = Likes::new(likes_store(settings));
    likes.read_storage();

    Controller::new(
        api,
        likes,
        TerminalView::new(std::io::stdout()),
        settings.controller_options(),
    )
}

fn print_status(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let client = create_recipe_client(&settings.api_url, settings.http_timeout());
    let likes_file = settings
        .likes_path()
        .map(|p| FileLikesStore::new(p).path().display().to_string());
    let status = serde_json::json!({
        "name": metadata::PKG_NAME,
        "version": metadata::PKG_VERSION,
        "api_base_url": client.base_url(),
        "likes_file": likes_file,
        "settings": settings,
        "validation": settings.validate().err().unwrap_or_else(|| "ok".to_string()),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

/// Read shell lines on a dedicated thread and feed them to the event loop.
async fn run_shell(mut controller: Controller<TerminalView<Stdout>>, open: Option<String>) {
    controller.notify("Type 'help' for commands.");
    let mut app = App::new(controller);
    let tx = app.sender();

    std::thread::spawn(move || {
        loop {
            let line = dialoguer::Input::<String>::new()
                .with_prompt("recipes")
                .allow_empty(true)
                .interact_text();
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::debug!(error = %e, "input closed");
                    let _ = tx.send(Event::Command(ShellCommand::Quit));
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ShellCommand>() {
                Ok(command) => {
                    let quit = command == ShellCommand::Quit;
                    if tx.send(Event::Command(command)).is_err() || quit {
                        break;
                    }
                }
                Err(message) => eprintln!("{message}"),
            }
        }
    });

    app.load(open.as_deref());
    let controller = app.run().await;
    tracing::debug!(
        likes = controller.state().likes().num_likes(),
        "shell closed"
    );
}
