use std::io::{self, Write};

use crate::store::{FeatureStore, Record};

/// Debug output for a single record
///
/// Format: `<id> "<text>" [v0, v1, ...]`
pub fn debug_record<W: Write>(writer: &mut W, record: &Record) -> io::Result<()> {
    writeln!(writer, "{} {:?} {}", record.id(), record.text(), record.vector())
}

/// Emit a header line followed by every record of the store
pub fn debug_store<W: Write>(writer: &mut W, store: &FeatureStore) -> io::Result<()> {
    writeln!(
        writer,
        "dimension={} records={} capacity={}",
        store.dimension(),
        store.len(),
        store.capacity()
    )?;
    for record in store.records() {
        debug_record(writer, record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    #[test]
    fn test_debug_store() {
        let mut store = FeatureStore::new(3);
        store.add_text("AB").unwrap();
        store.add_text("c\"").unwrap();
        let mut output = Vec::new();
        debug_store(&mut output, &store).unwrap();
        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "dimension=3 records=2 capacity=10\n0 \"AB\" [65, 66, 0]\n1 \"c\\\"\" [99, 34, 0]\n"
        );
    }

    #[test]
    fn test_dump_respects_config() {
        let mut quiet = FeatureStore::new(2);
        quiet.add_text("a").unwrap();
        let mut output = Vec::new();
        quiet.debug_dump(&mut output).unwrap();
        assert!(output.is_empty());

        let config = StoreConfig::default().with_dimension(2).with_debug(true);
        let mut loud = FeatureStore::from_config(&config);
        loud.add_text("a").unwrap();
        loud.debug_dump(&mut output).unwrap();
        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("0 \"a\" [97, 0]"));
    }
}
