// src/crawl/result.rs
// =============================================================================
// The outcome of a crawl and how it gets written out.
//
// JSON shape:
//
//   {
//     "wordCounts": { "rust": 12, "crawler": 7 },
//     "urlsVisited": 3
//   }
//
// wordCounts keeps the popularity order: most frequent first, ties broken
// alphabetically.
// =============================================================================

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    /// How many distinct URLs were claimed and parsed
    pub urls_visited: usize,
    /// The most popular words with their counts, most popular first
    pub word_counts: Vec<(String, usize)>,
}

impl CrawlResult {
    pub fn new(urls_visited: usize, word_counts: HashMap<String, usize>, popular_word_count: usize) -> Self {
        Self {
            urls_visited,
            word_counts: top_words(word_counts, popular_word_count),
        }
    }
}

// Sorts by count descending, then word ascending, and keeps the first `limit`
pub fn top_words(word_counts: HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut words: Vec<(String, usize)> = word_counts.into_iter().collect();
    words.sort_by(|(word_a, count_a), (word_b, count_b)| {
        Reverse(count_a).cmp(&Reverse(count_b)).then_with(|| word_a.cmp(word_b))
    });
    words.truncate(limit);
    words
}

// Serializes the ordered word list as a JSON object in list order
struct OrderedWordCounts<'a>(&'a [(String, usize)]);

impl Serialize for OrderedWordCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(word, count)| (word, count)))
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("CrawlResult", 2)?;
        out.serialize_field("wordCounts", &OrderedWordCounts(&self.word_counts))?;
        out.serialize_field("urlsVisited", &self.urls_visited)?;
        out.end()
    }
}

/// Writes a CrawlResult as pretty-printed JSON
pub struct CrawlResultWriter<'a> {
    result: &'a CrawlResult,
}

impl<'a> CrawlResultWriter<'a> {
    pub fn new(result: &'a CrawlResult) -> Self {
        Self { result }
    }

    pub fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self.result)?;
        writer.flush()
    }

    /// Appends the result to `path`, creating the file and its parent
    /// directories if needed. Existing contents are kept.
    pub fn write_to_path(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writeln!(writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_top_words_order_and_tie_break() {
        let words = top_words(counts(&[("pear", 2), ("apple", 2), ("fig", 5), ("kiwi", 1)]), 10);
        assert_eq!(
            words,
            vec![
                ("fig".to_string(), 5),
                ("apple".to_string(), 2),
                ("pear".to_string(), 2),
                ("kiwi".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_words_cutoff() {
        let words = top_words(counts(&[("a", 3), ("b", 2), ("c", 1)]), 2);
        assert_eq!(words.len(), 2);
        assert_eq!(words[1].0, "b");

        assert!(top_words(counts(&[("a", 3)]), 0).is_empty());
    }

    #[test]
    fn test_json_shape_keeps_popularity_order() {
        let result = CrawlResult::new(3, counts(&[("zebra", 4), ("ant", 1)]), 5);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"wordCounts":{"zebra":4,"ant":1},"urlsVisited":3}"#);
    }

    #[test]
    fn test_write_to_path_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("result.json");
        let result = CrawlResult::new(1, counts(&[("word", 1)]), 1);
        let writer = CrawlResultWriter::new(&result);

        writer.write_to_path(&path).unwrap();
        writer.write_to_path(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("\"urlsVisited\": 1").count(), 2);
        assert!(contents.ends_with("}\n"));
    }
}
