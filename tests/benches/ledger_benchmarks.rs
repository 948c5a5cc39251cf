//! # Poll Ledger Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | pl-01-address | SHA-256 address derivation |
//! | pl-01-codec | Record envelope encode/decode |
//! | pl-01-vote | Full vote transaction, accepted and rejected |
//! | pl-01-tally | Tally over 10..500 candidates |

use criterion::{criterion_group, criterion_main};
use pl_tests::benchmarks::pl_01_voting::{
    bench_address_derivation, bench_record_codec, bench_tally, bench_vote,
};

criterion_group!(
    benches,
    bench_address_derivation,
    bench_record_codec,
    bench_vote,
    bench_tally
);
criterion_main!(benches);
