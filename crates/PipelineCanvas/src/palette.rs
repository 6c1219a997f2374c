//! # Template Palette
//!
//! The read-only catalog of node templates, and the payload a template carries across a
//! native drag-and-drop transfer.
//!
//! The payload is a flat JSON record, `{"type": .., "category": .., "label": ..}`. Parsing is
//! strict: anything else is rejected as a [`PayloadError`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::model::NodeCategory;

/// A palette entry. New nodes copy all three fields from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeTemplate {
    #[serde(rename = "type")]
    pub node_type: String,
    pub category: NodeCategory,
    pub label: String,
}

impl NodeTemplate {
    pub fn new(node_type: impl Into<String>, category: NodeCategory, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            category,
            label: label.into(),
        }
    }

    /// Serializes the template for a drag-and-drop transfer.
    pub fn to_payload(&self) -> String {
        // A struct of three plain fields cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parses and validates a drag-and-drop payload.
    pub fn from_payload(payload: &str) -> Result<Self, PayloadError> {
        if payload.trim().is_empty() {
            return Err(PayloadError::Empty);
        }
        let template: Self = serde_json::from_str(payload)?;
        if template.node_type.trim().is_empty() {
            return Err(PayloadError::EmptyType);
        }
        Ok(template)
    }
}

/// Registry of available node templates, keyed by type in palette order.
#[derive(Clone, Debug)]
pub struct Palette {
    templates: IndexMap<String, NodeTemplate>,
}

impl Palette {
    /// Create a new empty palette.
    pub fn new() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Builds a palette from templates; a later template replaces an earlier one with the
    /// same type.
    pub fn from_templates(templates: impl IntoIterator<Item = NodeTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|t| (t.node_type.clone(), t))
                .collect(),
        }
    }

    pub fn get(&self, node_type: &str) -> Option<&NodeTemplate> {
        self.templates.get(node_type)
    }

    pub fn templates(&self) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values()
    }

    pub fn templates_in_category(
        &self,
        category: NodeCategory,
    ) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values().filter(move |t| t.category == category)
    }

    /// Categories in display order.
    pub fn categories(&self) -> [NodeCategory; 4] {
        NodeCategory::ALL
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for Palette {
    /// The stock data-pipeline catalog.
    fn default() -> Self {
        use NodeCategory::*;
        let stock = [
            ("file_upload", Input, "Multi-File Upload"),
            ("pdf_extractor", Input, "PDF Data Extractor"),
            ("xml_parser", Input, "XML Stream"),
            ("google_sheets", Input, "Google Sheets"),
            ("sql_connector", Input, "SQL Server"),
            ("api_live", Input, "Live API Feed"),
            ("web_scraper", Input, "Web Scraper"),
            ("filter", Transform, "Smart Filter"),
            ("map_rename", Transform, "Column Mapping"),
            ("aggregate", Transform, "Pivot/Aggregate"),
            ("join_merge", Transform, "Join / Merge"),
            ("sort", Transform, "Sorting"),
            ("clean_data", Transform, "Clean Data"),
            ("if_condition", Logic, "IF Condition"),
            ("switch", Logic, "Switch"),
            ("merge", Logic, "Union"),
            ("export_file", Output, "Multi-Format Export"),
            ("webhook", Output, "Webhook Push"),
            ("display", Output, "UI Dashboard"),
            ("chart", Output, "Live Chart"),
        ];
        Self::from_templates(
            stock
                .into_iter()
                .map(|(ty, category, label)| NodeTemplate::new(ty, category, label)),
        )
    }
}
