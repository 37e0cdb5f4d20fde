//! Command palette: a keyboard-driven overlay that switches views.
//!
//! The palette itself never touches the view controller. Handling a key yields a
//! [`CommandAction`] which the caller executes.

use serde::{Deserialize, Serialize};

use crate::models::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandCategory {
    Navigation,
    Social,
    System,
}

/// What running a command does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CommandAction {
    /// Switch views; `anchor` names a home-page section to scroll to afterwards
    ChangeView {
        view: ViewState,
        #[serde(skip_serializing_if = "Option::is_none")]
        anchor: Option<String>,
    },
    OpenUrl { url: String },
    CopyText { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
    pub category: CommandCategory,
    pub action: CommandAction,
}

impl Command {
    fn new(
        id: &str,
        label: &str,
        sub_label: &str,
        category: CommandCategory,
        action: CommandAction,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            sub_label: Some(sub_label.to_string()),
            category,
            action,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self
                .sub_label
                .as_ref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }
}

fn section(anchor: &str) -> CommandAction {
    CommandAction::ChangeView {
        view: ViewState::Home,
        anchor: Some(anchor.to_string()),
    }
}

fn view(view: ViewState) -> CommandAction {
    CommandAction::ChangeView { view, anchor: None }
}

/// The commands offered by the site's palette.
pub fn default_commands(contact_email: &str) -> Vec<Command> {
    use CommandCategory::*;

    vec![
        Command::new("home", "Go Home", "~/root", Navigation, view(ViewState::Home)),
        Command::new("story", "My Story", "Origin Logs", Navigation, section("story")),
        Command::new("projects", "View Projects", "./projects", Navigation, section("projects")),
        Command::new("lab", "R&D Lab", "Current Experiments", Navigation, section("lab")),
        Command::new(
            "archive",
            "Project Archive",
            "View all projects",
            Navigation,
            view(ViewState::AllProjects),
        ),
        Command::new("blog", "Read Blog", "./dev_logs", Navigation, section("blog")),
        Command::new(
            "blog_archive",
            "Blog Archive",
            "View all posts",
            Navigation,
            view(ViewState::AllBlogs),
        ),
        Command::new("contact", "Contact Me", "Send email", Social, section("contact")),
        Command::new(
            "gh",
            "GitHub",
            "Open profile",
            Social,
            CommandAction::OpenUrl {
                url: "https://github.com".to_string(),
            },
        ),
        Command::new(
            "copy_email",
            "Copy Email",
            contact_email,
            System,
            CommandAction::CopyText {
                text: contact_email.to_string(),
            },
        ),
    ]
}

/// Keys the palette reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    /// Ctrl+K / Cmd+K
    Toggle,
    Escape,
    ArrowUp,
    ArrowDown,
    Enter,
}

/// Palette overlay state.
#[derive(Debug, Clone)]
pub struct CommandPalette {
    commands: Vec<Command>,
    open: bool,
    query: String,
    selected: usize,
}

impl CommandPalette {
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            open: false,
            query: String::new(),
            selected: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Commands whose label or sub-label contains the query, case-insensitively.
    pub fn filtered(&self) -> Vec<&Command> {
        if self.query.is_empty() {
            return self.commands.iter().collect();
        }
        let needle = self.query.to_lowercase();
        self.commands.iter().filter(|c| c.matches(&needle)).collect()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.selected = 0;
    }

    /// Handle a key press. Returns the action to run when Enter picks a command.
    pub fn handle_key(&mut self, key: Key) -> Option<CommandAction> {
        match key {
            Key::Toggle => {
                self.open = !self.open;
                self.query.clear();
                self.selected = 0;
                None
            }
            Key::Escape => {
                self.open = false;
                None
            }
            _ if !self.open => None,
            Key::ArrowDown => {
                let len = self.filtered().len();
                if len > 0 {
                    self.selected = (self.selected + 1) % len;
                }
                None
            }
            Key::ArrowUp => {
                let len = self.filtered().len();
                if len > 0 {
                    self.selected = (self.selected + len - 1) % len;
                }
                None
            }
            Key::Enter => {
                let action = self
                    .filtered()
                    .get(self.selected)
                    .map(|c| c.action.clone())?;
                self.open = false;
                Some(action)
            }
        }
    }

    pub fn snapshot(&self) -> PaletteSnapshot {
        PaletteSnapshot {
            open: self.open,
            query: self.query.clone(),
            selected_index: self.selected,
            commands: self.filtered().into_iter().cloned().collect(),
        }
    }
}

/// Serializable view of the palette for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteSnapshot {
    pub open: bool,
    pub query: String,
    pub selected_index: usize,
    pub commands: Vec<Command>,
}
