//! Status command handler

use anyhow::Result;

use booklog_core::{BlobStore, CatalogStore, Config, LoadSource};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show<B: BlobStore>(store: &CatalogStore<B>, config: &Config, output: &Output) -> Result<()> {
    let catalog = store.catalog();
    let source = describe_source(store.load_source());
    let stored_size = store
        .backend()
        .stored_size(store.key())
        .ok()
        .flatten();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "backend": store.backend().backend_name(),
                    "storage_key": store.key(),
                    "data_dir": config.data_dir,
                    "source": source,
                    "stored_bytes": stored_size,
                    "counts": {
                        "books": catalog.len(),
                        "read": catalog.read_count()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", catalog.len());
        }
        OutputFormat::Human => {
            println!("booklog Status");
            println!("==============");
            println!();
            println!("Storage:");
            println!("  Backend:  {}", store.backend().backend_name());
            println!("  Key:      {}", store.key());
            println!("  Location: {}", config.data_dir.display());
            if let Some(bytes) = stored_size {
                println!("  Size:     {} bytes", bytes);
            }
            println!("  Source:   {}", source);
            println!();
            println!("Contents:");
            println!("  Books: {}", catalog.len());
            println!("  Read:  {}", catalog.read_count());
        }
    }

    Ok(())
}

fn describe_source(source: &LoadSource) -> String {
    match source {
        LoadSource::Stored => "stored catalog".to_string(),
        LoadSource::SeedEmpty => "seed data (nothing stored yet)".to_string(),
        LoadSource::SeedRecovered { reason } => {
            format!("seed data (stored catalog unreadable: {})", reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklog_core::MemoryBlobStore;

    #[test]
    fn test_show_reads_size_from_any_backend() {
        let mut store = CatalogStore::open(MemoryBlobStore::new(), "booksapp.books.v1");
        assert_eq!(store.backend().stored_size(store.key()).unwrap(), None);

        store.toggle_read("1");
        let size = store.backend().stored_size(store.key()).unwrap();
        assert!(size.is_some_and(|n| n > 0));

        let output = Output::new(OutputFormat::Quiet);
        show(&store, &Config::default(), &output).unwrap();
    }

    #[test]
    fn test_describe_source() {
        assert_eq!(describe_source(&LoadSource::Stored), "stored catalog");
        assert!(describe_source(&LoadSource::SeedEmpty).contains("nothing stored"));
        assert!(describe_source(&LoadSource::SeedRecovered {
            reason: "bad json".into()
        })
        .contains("bad json"));
    }
}
