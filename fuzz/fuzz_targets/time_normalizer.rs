#![no_main]

use benchdash::loader::Record;
use benchdash::normalize::{TimeNormalizer, UnitRule};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(time) = std::str::from_utf8(data) {
        for rule in [UnitRule::Narrow, UnitRule::Full] {
            let normalized = TimeNormalizer::new(rule).normalize(Record {
                line: 1,
                model: "fuzz".to_string(),
                time: time.to_string(),
                correct: None,
                fields: Vec::new(),
            });

            if let Some(ms) = normalized.time_millis {
                assert!(ms >= 0.0, "negative millis for {time:?}");
            }
            if normalized.time_value.is_none() {
                assert!(normalized.time_millis.is_none());
            }
        }
    }
});
