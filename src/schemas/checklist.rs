//! Checklist schema - templates (static reference data) and per-trainee instances

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ShiftKey;

/// Declared type of a template item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Checkbox,
    /// Rating from 1 to `max`
    Rating {
        #[serde(default = "default_rating_max")]
        max: u8,
    },
    Text,
    Textarea,
    Dropdown { options: Vec<String> },
}

fn default_rating_max() -> u8 {
    3
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Checkbox => "checkbox",
            ItemKind::Rating { .. } => "rating",
            ItemKind::Text => "text",
            ItemKind::Textarea => "textarea",
            ItemKind::Dropdown { .. } => "dropdown",
        }
    }
}

/// A recorded checklist value, tagged by the item type it answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ItemValue {
    Checkbox(bool),
    Rating(u8),
    Text(String),
    Textarea(String),
    Dropdown(String),
}

impl ItemValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ItemValue::Checkbox(_) => "checkbox",
            ItemValue::Rating(_) => "rating",
            ItemValue::Text(_) => "text",
            ItemValue::Textarea(_) => "textarea",
            ItemValue::Dropdown(_) => "dropdown",
        }
    }

    /// Parse a raw string into a value of the given kind.
    pub fn parse_for(kind: &ItemKind, raw: &str) -> Result<Self, String> {
        match kind {
            ItemKind::Checkbox => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Ok(ItemValue::Checkbox(true)),
                "false" | "no" | "n" | "0" => Ok(ItemValue::Checkbox(false)),
                other => Err(format!("not a checkbox value: {}", other)),
            },
            ItemKind::Rating { .. } => raw
                .trim()
                .parse::<u8>()
                .map(ItemValue::Rating)
                .map_err(|e| format!("not a rating: {}", e)),
            ItemKind::Text => Ok(ItemValue::Text(raw.to_string())),
            ItemKind::Textarea => Ok(ItemValue::Textarea(raw.to_string())),
            ItemKind::Dropdown { .. } => Ok(ItemValue::Dropdown(raw.to_string())),
        }
    }
}

/// One item in a template section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateItem {
    /// Stable identifier used as the key in checklist instances
    pub id: String,

    pub label: String,

    #[serde(flatten)]
    pub kind: ItemKind,

    #[serde(default)]
    pub required: bool,
}

/// An ordered group of template items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub title: String,

    #[serde(default)]
    pub items: Vec<TemplateItem>,
}

/// Static definition of the observations recorded for one shift key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    pub shift: ShiftKey,

    pub title: String,

    #[serde(default)]
    pub sections: Vec<TemplateSection>,
}

impl ChecklistTemplate {
    /// Iterate over every item in section order
    pub fn items(&self) -> impl Iterator<Item = &TemplateItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    /// Look up an item by id
    pub fn item(&self, id: &str) -> Option<&TemplateItem> {
        self.items().find(|i| i.id == id)
    }

    /// Iterate over the items flagged required
    pub fn required_items(&self) -> impl Iterator<Item = &TemplateItem> {
        self.items().filter(|i| i.required)
    }
}

/// Templates keyed by shift, loaded once at start-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: BTreeMap<ShiftKey, ChecklistTemplate>,
}

impl TemplateCatalog {
    pub fn new(templates: impl IntoIterator<Item = ChecklistTemplate>) -> Self {
        TemplateCatalog {
            templates: templates.into_iter().map(|t| (t.shift, t)).collect(),
        }
    }

    pub fn get(&self, shift: ShiftKey) -> Option<&ChecklistTemplate> {
        self.templates.get(&shift)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// A recorded item value with its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub value: ItemValue,
    pub author: String,
    pub at: DateTime<Utc>,
}

/// Trainer's 1-5 readiness ratings recorded at sign-off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl Readiness {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// True if every supplied score is within 1..=5
    pub fn is_valid(&self) -> bool {
        [self.knowledge, self.execution, self.confidence]
            .iter()
            .flatten()
            .all(|v| (Self::MIN..=Self::MAX).contains(v))
    }

    /// Overlay the supplied scores onto `self`, keeping existing values where none is supplied
    pub fn merged_with(self, update: Readiness) -> Readiness {
        Readiness {
            knowledge: update.knowledge.or(self.knowledge),
            execution: update.execution.or(self.execution),
            confidence: update.confidence.or(self.confidence),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.knowledge.is_none() && self.execution.is_none() && self.confidence.is_none()
    }
}

/// One trainee's checklist answers for one shift
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistInstance {
    #[serde(default)]
    pub items: BTreeMap<String, ChecklistEntry>,

    #[serde(default)]
    pub readiness: Readiness,
}

impl ChecklistInstance {
    pub fn value(&self, item_id: &str) -> Option<&ItemValue> {
        self.items.get(item_id).map(|e| &e.value)
    }
}
