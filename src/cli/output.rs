//! Output formatting for multiple formats
//!
//! Renders tool listings, single records, tag lists and configuration as JSON,
//! YAML, or human-readable text.
//!
//! # Example
//!
//! ```
//! use ppx_toolbox::cli::output::{Listing, OutputFormat, OutputFormatter};
//! use ppx_toolbox::store::seed_tools;
//!
//! let tools = seed_tools(0);
//! let listing = Listing::build(&tools, None);
//! let output = OutputFormatter::new(OutputFormat::Human).format_listing(&listing).unwrap();
//! assert!(output.contains("Top 4"));
//! ```

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::ToolboxConfig;
use crate::tool::{CategoryGroup, WebTool};
use crate::views::{self, TOP_TOOLS_LIMIT};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Everything the `list` command shows
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub total: usize,
    /// Most visited tools; empty while searching
    pub top: Vec<WebTool>,
    pub groups: Vec<CategoryGroup>,
}

impl Listing {
    pub fn build(tools: &[WebTool], query: Option<&str>) -> Self {
        let query = query.filter(|q| !q.is_empty());
        let top = if query.is_none() {
            views::top_tools(tools).into_iter().cloned().collect()
        } else {
            Vec::new()
        };
        Self {
            query: query.map(str::to_string),
            total: tools.len(),
            top,
            groups: views::grouped_tools(tools, query),
        }
    }
}

/// Output formatter for toolbox data
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_listing(&self, listing: &Listing) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(listing, "listing"),
            OutputFormat::Yaml => to_yaml(listing, "listing"),
            OutputFormat::Human => Ok(self.format_listing_human(listing)),
        }
    }

    pub fn format_tools(&self, title: &str, tools: &[WebTool]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&tools, "tools"),
            OutputFormat::Yaml => to_yaml(&tools, "tools"),
            OutputFormat::Human => {
                let mut output = String::new();
                push_heading(&mut output, title);
                if tools.is_empty() {
                    output.push_str("  (none)\n");
                }
                for tool in tools {
                    push_compact(&mut output, tool);
                }
                Ok(output)
            }
        }
    }

    pub fn format_tool(&self, tool: &WebTool) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(tool, "tool"),
            OutputFormat::Yaml => to_yaml(tool, "tool"),
            OutputFormat::Human => {
                let mut output = String::new();
                push_card(&mut output, tool);
                Ok(output)
            }
        }
    }

    pub fn format_tags(&self, tags: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&tags, "tags"),
            OutputFormat::Yaml => to_yaml(&tags, "tags"),
            OutputFormat::Human => {
                if tags.is_empty() {
                    return Ok("No tags\n".to_string());
                }
                Ok(tags.iter().map(|t| format!("{}\n", t)).collect())
            }
        }
    }

    pub fn format_config(&self, config: &ToolboxConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&sorted_map(config), "config"),
            OutputFormat::Yaml => to_yaml(&sorted_map(config), "config"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_listing_human(&self, listing: &Listing) -> String {
        let mut output = String::new();

        if listing.total == 0 {
            output.push_str("No tools yet\n\n");
            output.push_str("Add your first one with:\n");
            output.push_str("  toolbox add --title <TITLE> --url <URL> [--tag <TAG>]\n");
            return output;
        }

        if !listing.top.is_empty() {
            push_heading(&mut output, &format!("Most visited \u{00B7} Top {}", TOP_TOOLS_LIMIT));
            for tool in &listing.top {
                push_compact(&mut output, tool);
            }
            output.push('\n');
        }

        if listing.groups.is_empty() {
            if let Some(query) = &listing.query {
                output.push_str(&format!("No tools match '{}'\n", query));
            }
            return output;
        }

        for group in &listing.groups {
            push_heading(
                &mut output,
                &format!("{} ({})", group.label, group.tools.len()),
            );
            for tool in &group.tools {
                push_card(&mut output, tool);
            }
            output.push('\n');
        }

        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

fn sorted_map(config: &ToolboxConfig) -> std::collections::BTreeMap<String, String> {
    config.to_display_map().into_iter().collect()
}

fn push_heading(output: &mut String, title: &str) {
    output.push_str(title);
    output.push('\n');
    output.push_str(RULE);
    output.push('\n');
}

fn push_compact(output: &mut String, tool: &WebTool) {
    let tags: Vec<&str> = tool.tags.iter().take(2).map(String::as_str).collect();
    output.push_str(&format!("  {}  \u{00B7} {} visits", tool.title, tool.visits));
    if !tags.is_empty() {
        output.push_str(&format!("  [{}]", tags.join(", ")));
    }
    output.push('\n');
}

fn push_card(output: &mut String, tool: &WebTool) {
    output.push_str(&format!("\u{2022} {}  <{}>\n", tool.title, tool.url));
    output.push_str(&format!(
        "  id: {} \u{00B7} {} visits",
        tool.id, tool.visits
    ));
    if !tool.tags.is_empty() {
        output.push_str(&format!(" \u{00B7} tags: {}", tool.tags.join(", ")));
    }
    output.push('\n');
    if !tool.note.is_empty() {
        output.push_str(&format!("  {}\n", tool.note));
    }
}
