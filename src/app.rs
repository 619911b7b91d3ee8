use std::str::FromStr;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::api::{fetch_recipe, fetch_search};
use crate::controller::Controller;
use crate::error::AppResult;
use crate::state::Ticket;
use crate::types::{RawRecipe, RecipeSummary, ServingsChange};
use crate::view::View;

pub const SHELL_HELP: &str = "\
search <query>       search recipes (alias: s)
page <n>             show another page of results
#<id> | open <id>    open a recipe
+ | -                more / fewer servings
add                  add the recipe's ingredients to the shopping list
list                 show the shopping list
del <item-id>        remove a shopping list item
count <item-id> <n>  change a shopping list item's count
clear list           empty the shopping list
like                 like or unlike the open recipe
likes                show liked recipes
clear                clear the search results
close                close the open recipe
help                 show this help
quit                 leave the shell";

/// User intent, decoupled from how it was entered.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Search(String),
    GoToPage(usize),
    Navigate(String),
    Servings(ServingsChange),
    AddToList,
    DeleteListItem(String),
    UpdateListCount { id: String, value: String },
    ShowList,
    ClearList,
    ToggleLike,
    ShowLikes,
    ClearSearch,
    CloseRecipe,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if let Some(id) = line.strip_prefix('#') {
            return Ok(Command::Navigate(id.trim().to_string()));
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("search" | "s", query) if !query.is_empty() => Command::Search(query.to_string()),
            ("page", n) => Command::GoToPage(
                n.parse()
                    .map_err(|_| format!("'{n}' is not a page number"))?,
            ),
            ("open", id) if !id.is_empty() => Command::Navigate(id.to_string()),
            ("+" | "inc", "") => Command::Servings(ServingsChange::Increase),
            ("-" | "dec", "") => Command::Servings(ServingsChange::Decrease),
            ("add", "") => Command::AddToList,
            ("list", "") => Command::ShowList,
            ("del", id) if !id.is_empty() => Command::DeleteListItem(id.to_string()),
            ("count", args) => match args.split_once(char::is_whitespace) {
                Some((id, value)) => Command::UpdateListCount {
                    id: id.to_string(),
                    value: value.trim().to_string(),
                },
                None => return Err("usage: count <item-id> <n>".to_string()),
            },
            ("clear", "list") => Command::ClearList,
            ("clear", "") => Command::ClearSearch,
            ("like", "") => Command::ToggleLike,
            ("likes", "") => Command::ShowLikes,
            ("close", "") => Command::CloseRecipe,
            ("help" | "?", "") => Command::Help,
            ("quit" | "exit" | "q", "") => Command::Quit,
            _ => return Err(format!("unknown command '{line}', try 'help'")),
        };
        Ok(command)
    }
}

/// Everything the event loop reacts to: user commands and fetch completions.
#[derive(Debug)]
pub enum Event {
    Command(Command),
    SearchLoaded {
        ticket: Ticket,
        result: AppResult<Vec<RecipeSummary>>,
    },
    RecipeLoaded {
        ticket: Ticket,
        result: AppResult<RawRecipe>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Single-owner event loop around the controller. Fetches run as spawned
/// tasks and report back through the same channel, so the loop keeps
/// accepting commands while a request is in flight.
pub struct App<V: View> {
    controller: Controller<V>,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
}

impl<V: View> App<V> {
    pub fn new(controller: Controller<V>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            controller,
            events_tx,
            events_rx,
        }
    }

    pub fn sender(&self) -> UnboundedSender<Event> {
        self.events_tx.clone()
    }

    #[cfg(test)]
    pub fn controller(&self) -> &Controller<V> {
        &self.controller
    }

    /// Start-up: restore likes, then open the initial fragment if any.
    pub fn load(&mut self, fragment: Option<&str>) {
        self.controller.load_likes();
        if let Some(fragment) = fragment {
            self.handle(Event::Command(Command::Navigate(fragment.to_string())));
        }
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    pub fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::Command(command) => return self.dispatch(command),
            Event::SearchLoaded { ticket, result } => self.controller.finish_search(ticket, result),
            Event::RecipeLoaded { ticket, result } => self.controller.finish_recipe(ticket, result),
        }
        Flow::Continue
    }

    fn dispatch(&mut self, command: Command) -> Flow {
        tracing::debug!(?command, "dispatch");
        match command {
            Command::Search(query) => {
                if let Some(request) = self.controller.begin_search(&query) {
                    let api = self.controller.api();
                    let tx = self.events_tx.clone();
                    tokio::spawn(async move {
                        let result = fetch_search(api, request.query).await;
                        let _ = tx.send(Event::SearchLoaded {
                            ticket: request.ticket,
                            result,
                        });
                    });
                }
            }
            Command::Navigate(fragment) => {
                if let Some(request) = self.controller.begin_recipe(&fragment) {
                    let api = self.controller.api();
                    let tx = self.events_tx.clone();
                    tokio::spawn(async move {
                        let result = fetch_recipe(api, request.id).await;
                        let _ = tx.send(Event::RecipeLoaded {
                            ticket: request.ticket,
                            result,
                        });
                    });
                }
            }
            Command::GoToPage(page) => self.controller.go_to_page(page),
            Command::Servings(change) => self.controller.update_servings(change),
            Command::AddToList => {
                self.controller.add_recipe_to_list();
            }
            Command::DeleteListItem(id) => self.controller.delete_list_item(&id),
            Command::UpdateListCount { id, value } => self.controller.update_list_count(&id, &value),
            Command::ShowList => self.controller.show_list(),
            Command::ClearList => self.controller.clear_list(),
            Command::ToggleLike => self.controller.toggle_like(),
            Command::ShowLikes => self.controller.show_likes(),
            Command::ClearSearch => self.controller.clear_search(),
            Command::CloseRecipe => self.controller.close_recipe(),
            Command::Help => self.controller.notify(SHELL_HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Process events until a `Quit` command arrives.
    pub async fn run(mut self) -> Controller<V> {
        while let Some(event) = self.next_event().await {
            if self.handle(event) == Flow::Quit {
                break;
            }
        }
        self.controller
    }
}
