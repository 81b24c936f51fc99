//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde_json::{json, Value};

use booklog_core::Book;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print a single book with all details
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", book.id);
                println!("Name:        {}", book.name);
                println!("Author:      {}", book.author);
                println!("Genre:       {}", book.genre);
                println!("Rating:      {}", book.rating);
                println!("Description: {}", book.description);
                println!("Cover:       {}", book.cover_url());
                println!("Read:        {}", if book.read { "yes" } else { "no" });
            }
            OutputFormat::Json => {
                println!("{}", pretty(&book_json(book)));
            }
            OutputFormat::Quiet => {
                println!("{}", book.id);
            }
        }
    }

    /// Print a list of books
    pub fn print_books(&self, books: &[Book]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                for book in books {
                    println!(
                        "{} | {} {} | {} | ⭐ {}",
                        short_id(&book.id),
                        if book.read { "✓" } else { " " },
                        truncate(&book.name, 35),
                        truncate(&book.author, 25),
                        book.rating
                    );
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => {
                let items: Vec<Value> = books.iter().map(book_json).collect();
                println!("{}", pretty(&Value::Array(items)));
            }
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print the available genres
    pub fn print_genres(&self, genres: &[&str]) {
        match self.format {
            OutputFormat::Human | OutputFormat::Quiet => {
                for genre in genres {
                    println!("{}", genre);
                }
            }
            OutputFormat::Json => {
                println!("{}", pretty(&json!(genres)));
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!("{}", json!({"status": "success", "message": message}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warning(&self, message: &str) {
        if self.format != OutputFormat::Quiet {
            eprintln!("⚠ {}", message);
        }
    }
}

/// JSON shape of a book, with the cover resolved for display
fn book_json(book: &Book) -> Value {
    json!({
        "id": book.id,
        "name": book.name,
        "author": book.author,
        "genre": book.genre,
        "rating": book.rating,
        "description": book.description,
        "cover": book.cover_url(),
        "read": book.read,
    })
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// First 8 characters of an ID (seed IDs are shorter and shown whole)
fn short_id(id: &str) -> String {
    let short: String = id.chars().take(8).collect();
    format!("{:<8}", short)
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
