//! Provider selection policy
//!
//! Maps a request's task to the ordered provider names to try. Tasks belong
//! to a category; a category may override the global default order.

use crate::config::RoutingSettings;
use crate::protocol::normalize_task;

/// Category a task identifier resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCategory {
    Phrases,
    Explain,
    Translate,
}

impl TaskCategory {
    /// Category for a task, if the task is one with a per-category override.
    /// Matching ignores surrounding whitespace and case.
    pub fn for_task(task: &str) -> Option<Self> {
        match normalize_task(task).as_str() {
            "generate_phrases" => Some(Self::Phrases),
            "explain_phrase" | "answer_doubt" => Some(Self::Explain),
            "translate_phrase" => Some(Self::Translate),
            _ => None,
        }
    }
}

/// Static provider-order policy
#[derive(Debug, Clone, Default)]
pub struct SelectionPolicy {
    routing: RoutingSettings,
}

impl SelectionPolicy {
    pub fn new(routing: RoutingSettings) -> Self {
        Self { routing }
    }

    /// Ordered provider names for `task`.
    ///
    /// Resolution: category override, then the global default order.
    /// Unrecognized or absent tasks skip the overrides entirely. A configured
    /// order is used verbatim, even when it names no provider; the router
    /// then reports that no providers are configured.
    pub fn resolve(&self, task: Option<&str>) -> Vec<String> {
        let override_order = task
            .and_then(TaskCategory::for_task)
            .and_then(|category| self.override_for(category));

        match override_order {
            Some(order) => order.to_vec(),
            None => self.routing.default_order.clone(),
        }
    }

    fn override_for(&self, category: TaskCategory) -> Option<&[String]> {
        match category {
            TaskCategory::Phrases => self.routing.phrases_order.as_deref(),
            TaskCategory::Explain => self.routing.explain_order.as_deref(),
            TaskCategory::Translate => self.routing.translate_order.as_deref(),
        }
    }
}
