mod block;
pub mod catalog;
mod config;
mod error;
mod html;
mod inline;
pub mod lesson;
mod parser;
pub mod quiz;

pub use block::{Block, LinkTarget, List, ListItem, Span};
pub use catalog::Catalog;
pub use config::{Config, HtmlConfig, LinksConfig, QuizConfig};
pub use error::{Error, Result};
pub use html::{blocks_to_html, lesson_to_html};
pub use inline::parse_inline;
pub use lesson::Lesson;

/// Parse markup text into a vector of blocks.
pub fn parse(markup: &str) -> Vec<Block> {
    parser::parse(markup)
}

/// Render an optional content field. Absent text gives no blocks.
pub fn render(source: Option<&str>) -> Vec<Block> {
    source.map(parse).unwrap_or_default()
}

/// Convert markup to an HTML fragment using default config.
pub fn markdown_to_html(markup: &str) -> String {
    markdown_to_html_with_config(markup, &Config::compiled_default())
}

/// Convert markup to an HTML fragment with custom config.
pub fn markdown_to_html_with_config(markup: &str, config: &Config) -> String {
    let blocks = parse(markup);
    blocks_to_html(&blocks, config)
}
