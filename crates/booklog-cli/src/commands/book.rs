//! Book command handlers

use anyhow::{anyhow, bail, Context, Result};

use booklog_core::{BlobStore, CatalogStore, Draft, FilterCriteria, View, GENRES};

use crate::output::Output;

/// Add-book form values as given on the command line
#[derive(Debug, Clone, Default)]
pub struct DraftArgs {
    pub name: String,
    pub author: String,
    pub rating: String,
    pub genre: String,
    pub description: String,
    pub cover: String,
}

impl DraftArgs {
    fn into_draft(self) -> Draft {
        let mut draft = Draft {
            name: self.name,
            author: self.author,
            genre: self.genre,
            description: self.description,
            img_url: self.cover,
            ..Draft::default()
        };
        draft.set_rating(&self.rating);
        draft
    }
}

/// List books matching the given filters
pub fn list<B: BlobStore>(
    store: &mut CatalogStore<B>,
    id: Option<String>,
    name: Option<String>,
    author: Option<String>,
    output: &Output,
) -> Result<()> {
    store.set_filter(FilterCriteria {
        id: id.unwrap_or_default(),
        name: name.unwrap_or_default(),
        author: author.unwrap_or_default(),
    });

    output.print_books(&store.filtered_books());
    Ok(())
}

/// Show a single book
pub fn show<B: BlobStore>(store: &mut CatalogStore<B>, id: &str, output: &Output) -> Result<()> {
    let resolved = resolve_id(store, id)?.unwrap_or_else(|| id.to_string());
    store.open_details(resolved);

    match store.view() {
        View::Details(book) => {
            output.print_book(book);
            Ok(())
        }
        View::NotFound(missing) => bail!("Book not found: {}", missing),
        View::List => unreachable!("details were just opened"),
    }
}

/// Validate and add a new book
pub fn add<B: BlobStore>(store: &mut CatalogStore<B>, args: DraftArgs, output: &Output) -> Result<()> {
    if !args.genre.is_empty() && !GENRES.contains(&args.genre.as_str()) {
        bail!(
            "Unknown genre: '{}'\nValid genres: {}",
            args.genre,
            GENRES.join(", ")
        );
    }

    let book = store
        .add(&args.into_draft())
        .context("Book not added")?;

    finish_write(store, output)?;

    output.success(&format!("Added book: {}", book.id));
    output.print_book(&book);
    Ok(())
}

/// Toggle the read flag of a book
pub fn toggle_read<B: BlobStore>(
    store: &mut CatalogStore<B>,
    id: &str,
    output: &Output,
) -> Result<()> {
    let resolved = resolve_id(store, id)?.ok_or_else(|| anyhow!("No book found matching: {}", id))?;

    store.toggle_read(&resolved);
    finish_write(store, output)?;

    if let Some(book) = store.select(&resolved) {
        let state = if book.read { "read" } else { "unread" };
        output.success(&format!("Marked '{}' as {}", book.name, state));
    }
    Ok(())
}

/// Replace the catalog with the seed dataset
pub fn reset<B: BlobStore>(store: &mut CatalogStore<B>, yes: bool, output: &Output) -> Result<()> {
    if !yes && output.should_prompt() {
        println!(
            "This replaces all {} book(s) with the seed dataset.",
            store.books().len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.reset().context("Failed to reset catalog")?;
    output.success("Catalog reset to seed data");
    Ok(())
}

/// Resolve a full ID or a unique ID prefix
///
/// Returns `Ok(None)` when nothing matches. A blank ID never matches.
fn resolve_id<B: BlobStore>(store: &CatalogStore<B>, id: &str) -> Result<Option<String>> {
    if id.trim().is_empty() {
        return Ok(None);
    }

    if store.select(id).is_some() {
        return Ok(Some(id.to_string()));
    }

    let matches = store.filter(&FilterCriteria::by_id(id));
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0].id.clone())),
        _ => {
            eprintln!("Multiple books match '{}':", id);
            for book in &matches {
                eprintln!("  {} - {}", book.id, book.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Surface a failed write left over from the last mutation
fn finish_write<B: BlobStore>(store: &mut CatalogStore<B>, output: &Output) -> Result<()> {
    if let Err(e) = store.flush() {
        if let Some(hint) = e.recovery_suggestion() {
            output.warning(hint);
        }
        return Err(e).context("Change was not saved");
    }
    Ok(())
}

/// Ask a yes/no question on stdin
fn confirm(prompt: &str) -> Result<bool> {
    use std::io::{self, Write};

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use booklog_core::MemoryBlobStore;

    const KEY: &str = "booksapp.books.v1";

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn dune() -> DraftArgs {
        DraftArgs {
            name: "Dune".into(),
            author: "Frank Herbert".into(),
            rating: "4,5".into(),
            ..DraftArgs::default()
        }
    }

    #[test]
    fn test_draft_args_normalise_rating() {
        let draft = dune().into_draft();
        assert_eq!(draft.rating, "4.5");
        assert!(draft.img_url.is_empty());
    }

    #[test]
    fn test_add_and_resolve_prefix() {
        let mut store = CatalogStore::open(MemoryBlobStore::new(), KEY);
        add(&mut store, dune(), &quiet()).unwrap();

        let added = store.books()[0].clone();
        let prefix = &added.id[..8];
        assert_eq!(resolve_id(&store, prefix).unwrap(), Some(added.id.clone()));
        assert_eq!(resolve_id(&store, "2").unwrap(), Some("2".to_string()));
        assert_eq!(resolve_id(&store, "zzz").unwrap(), None);
    }

    #[test]
    fn test_add_rejects_invalid_draft() {
        let mut store = CatalogStore::open(MemoryBlobStore::new(), KEY);
        let args = DraftArgs {
            rating: "7".into(),
            ..dune()
        };

        let err = add(&mut store, args, &quiet()).unwrap_err();
        assert!(format!("{:#}", err).contains("Rating must be between 0 and 5."));
        assert_eq!(store.books().len(), 3);
    }

    #[test]
    fn test_add_rejects_unlisted_genre() {
        let mut store = CatalogStore::open(MemoryBlobStore::new(), KEY);
        let args = DraftArgs {
            genre: "Horror".into(),
            ..dune()
        };

        let err = add(&mut store, args, &quiet()).unwrap_err();
        assert!(err.to_string().contains("Unknown genre"));
        assert_eq!(store.books().len(), 3);

        let args = DraftArgs {
            genre: "Sci-Fi".into(),
            ..dune()
        };
        add(&mut store, args, &quiet()).unwrap();
        assert_eq!(store.books()[0].genre, "Sci-Fi");
    }

    #[test]
    fn test_blank_id_matches_nothing() {
        let mut store = CatalogStore::open(MemoryBlobStore::with_value(KEY, "[]"), KEY);
        add(&mut store, dune(), &quiet()).unwrap();

        assert_eq!(resolve_id(&store, "").unwrap(), None);
        assert_eq!(resolve_id(&store, "  ").unwrap(), None);

        assert!(toggle_read(&mut store, " ", &quiet()).is_err());
        assert!(!store.books()[0].read);
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let mut store = CatalogStore::open(MemoryBlobStore::with_value(KEY, "[]"), KEY);
        for _ in 0..40 {
            store
                .add(&Draft {
                    name: "Copy".into(),
                    author: "Anon".into(),
                    rating: "1".into(),
                    ..Draft::default()
                })
                .unwrap();
        }
        // 40 books across 16 leading hex digits: some prefix is shared
        let shared = ('0'..='9')
            .chain('a'..='f')
            .map(|c| c.to_string())
            .find(|p| store.filter(&FilterCriteria::by_id(p.as_str())).len() > 1)
            .unwrap();
        assert!(resolve_id(&store, &shared).is_err());
    }

    #[test]
    fn test_toggle_read_and_show() {
        let mut store = CatalogStore::open(MemoryBlobStore::new(), KEY);

        toggle_read(&mut store, "1", &quiet()).unwrap();
        assert!(store.select("1").unwrap().read);

        assert!(toggle_read(&mut store, "nope", &quiet()).is_err());

        show(&mut store, "3", &quiet()).unwrap();
        assert_eq!(store.selected_id(), Some("3"));
        assert!(show(&mut store, "nope", &quiet()).is_err());
    }

    #[test]
    fn test_list_sets_filter() {
        let mut store = CatalogStore::open(MemoryBlobStore::new(), KEY);
        list(&mut store, None, Some("house".into()), None, &quiet()).unwrap();

        let books = store.filtered_books();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "The Housemaid");
    }

    #[test]
    fn test_reset_skips_prompt_with_yes() {
        let mut store = CatalogStore::open(MemoryBlobStore::new(), KEY);
        add(&mut store, dune(), &quiet()).unwrap();

        reset(&mut store, true, &quiet()).unwrap();
        assert_eq!(store.books().len(), 3);
    }
}
