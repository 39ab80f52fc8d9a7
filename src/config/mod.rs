// src/config/mod.rs
// =============================================================================
// Crawler configuration.
//
// The configuration is a JSON file such as:
//
//   {
//     "startPages": ["https://example.com/"],
//     "ignoredUrls": [".*\\.pdf"],
//     "ignoredWords": ["^.{1,3}$"],
//     "parallelism": 4,
//     "maxDepth": 3,
//     "timeoutSeconds": 10,
//     "popularWordCount": 20,
//     "resultPath": "out/result.json",
//     "profileOutputPath": "out/profile.txt"
//   }
//
// Submodules:
// - loader: the CrawlerConfiguration type and ConfigurationLoader
// =============================================================================

mod loader;

pub use loader::{host_parallelism, ConfigurationLoader, CrawlerConfiguration};

#[cfg(test)]
pub use loader::compile_patterns;
