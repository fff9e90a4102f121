//! Fuzz target for the ledger read path.
//!
//! Goal: opening arbitrary stored bytes under an arbitrary key **never panics**. Anything that
//! does open must re-encode to exactly the bytes it was read from.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_record_decode
//! ```

#![no_main]

use arbitrary::Arbitrary;
use compliguard_domain::canonical;
use compliguard_ledger::fuzz::{open_event, open_record};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct StoredEntry {
    key: String,
    bytes: Vec<u8>,
}

fuzz_target!(|entry: StoredEntry| {
    if entry.key.len() > 128 || entry.bytes.len() > 16 * 1024 {
        return;
    }

    if let Ok(record) = open_record(&entry.key, &entry.bytes) {
        assert_eq!(record.ref_id, entry.key);
        let encoded = canonical::encode(&record).expect("opened record re-encodes");
        assert_eq!(encoded, entry.bytes);
    }
    if let Ok(event) = open_event(&entry.key, &entry.bytes) {
        assert_eq!(event.ref_id, entry.key);
    }
});
