#![no_main]

use benchdash::aggregate::Aggregator;
use benchdash::loader::CsvLoader;
use benchdash::normalize::TimeNormalizer;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must load or fail cleanly, never panic
    if let Ok(table) = CsvLoader::default().load_from_reader(data, Path::new("fuzz.csv")) {
        let normalized = TimeNormalizer::default().normalize_table(&table);
        let _ = Aggregator::default().aggregate(&normalized);
    }
});
