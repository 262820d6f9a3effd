#![no_main]

use libfuzzer_sys::fuzz_target;
use mztarget::pipeline::IdentificationContext;
use mztarget::table::{PeakTable, TargetTable};
use mztarget::tolerance::ToleranceConfig;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary bytes must fail with an error, never panic
    let peaks = PeakTable::from_reader("fuzz", Cursor::new(data), b',');
    let targets = TargetTable::from_reader("fuzz", Cursor::new(data), b',');

    // The same bytes split in half give both tables a chance to parse
    let mid = data.len() / 2;
    let split_peaks = PeakTable::from_reader("fuzz", Cursor::new(&data[..mid]), b',');
    let split_targets = TargetTable::from_reader("fuzz", Cursor::new(&data[mid..]), b',');

    let Ok(context) = IdentificationContext::new(ToleranceConfig::default()) else {
        return;
    };
    for (peaks, targets) in [(peaks, targets), (split_peaks, split_targets)] {
        if let (Ok(peaks), Ok(targets)) = (peaks, targets) {
            let _ = context.identify(&peaks, &targets);
        }
    }
});
