//! Display-region tabs.

use serde::{Deserialize, Serialize};

/// Which content pane of the display region is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    /// Rendered report (default after every load).
    #[default]
    Report,
    /// Raw logs.
    Logs,
    /// Raw system specs.
    Specs,
}

impl ActiveTab {
    /// All tabs in display order.
    pub const ALL: [ActiveTab; 3] = [ActiveTab::Report, ActiveTab::Logs, ActiveTab::Specs];

    /// Stable lowercase name, used in element ids and `data-tab` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveTab::Report => "report",
            ActiveTab::Logs => "logs",
            ActiveTab::Specs => "specs",
        }
    }

    /// Human label of the tab selector.
    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Report => "Report",
            ActiveTab::Logs => "Logs",
            ActiveTab::Specs => "Specs",
        }
    }
}

impl std::str::FromStr for ActiveTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" => Ok(ActiveTab::Report),
            "logs" => Ok(ActiveTab::Logs),
            "specs" => Ok(ActiveTab::Specs),
            _ => Err(format!("unknown tab: {}", s)),
        }
    }
}

impl std::fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
