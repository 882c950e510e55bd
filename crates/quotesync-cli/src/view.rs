//! Terminal rendering of app callbacks.

use std::collections::BTreeSet;

use quotesync_core::app::QuoteView;
use quotesync_core::QuoteRecord;

pub const EMPTY_CATEGORY_MESSAGE: &str = "No quotes found in this category.";

/// Prints quotes to stdout and notices to stderr
#[derive(Debug, Default)]
pub struct TerminalView {
    show_categories: bool,
}

impl TerminalView {
    pub const fn new() -> Self {
        Self {
            show_categories: false,
        }
    }

    /// Also print the category list whenever it is rendered
    pub const fn with_categories() -> Self {
        Self {
            show_categories: true,
        }
    }
}

impl QuoteView for TerminalView {
    fn render(&self, quote: Option<&QuoteRecord>) {
        match quote {
            Some(quote) => println!("{}", format_quote(quote)),
            None => println!("{EMPTY_CATEGORY_MESSAGE}"),
        }
    }

    fn render_categories(&self, categories: &BTreeSet<String>) {
        if self.show_categories {
            for category in categories {
                println!("{category}");
            }
        }
    }

    fn render_conflict_notice(&self, count: usize) {
        println!("{}", format_conflict_notice(count));
    }

    fn render_notice(&self, message: &str) {
        eprintln!("Notice: {message}");
    }
}

pub fn format_quote(quote: &QuoteRecord) -> String {
    format!("\"{}\"\n    ({})", quote.text, quote.category)
}

pub fn format_conflict_notice(count: usize) -> String {
    if count == 1 {
        "1 local quote was replaced by a newer server version".to_string()
    } else {
        format!("{count} local quotes were replaced by newer server versions")
    }
}
