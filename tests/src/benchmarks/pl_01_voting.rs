//! # PL-01 Voting Benchmarks
//!
//! Hot paths:
//! - Address derivation for every key kind
//! - Record encode/decode through the envelope codec
//! - A full vote: poll read, lock, receipt check-and-create, increment, commit
//! - Tally over a poll with many candidates

use crate::{identity, new_ledger, seed_poll};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use pl_01_voting::{
    decode_record, encode_record, AddressDeriver, Poll, PollLedgerApi, VoterReceipt,
};
use std::time::Duration;

/// Address derivation per key kind.
pub fn bench_address_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pl-01-address");
    let deriver = AddressDeriver::new([7u8; 32]);
    let voter = identity(42);

    group.bench_function("poll", |b| b.iter(|| deriver.poll(black_box(1))));
    group.bench_function("candidate", |b| {
        b.iter(|| deriver.candidate(black_box(1), black_box("Alice")))
    });
    group.bench_function("voter_receipt", |b| {
        b.iter(|| deriver.voter_receipt(black_box(1), black_box(&voter)))
    });
    group.finish();
}

/// Envelope codec on the largest record kinds.
pub fn bench_record_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("pl-01-codec");
    let poll = Poll {
        id: 1,
        description: "x".repeat(50),
        start_time: 0,
        end_time: 100,
        candidate_count: 10,
        admin: identity(0),
    };
    let receipt = VoterReceipt {
        poll_id: 1,
        voter: identity(1),
        candidate_name: "Alice".to_string(),
        timestamp: 50,
    };
    let address = [0u8; 32];
    let poll_bytes = encode_record(&poll).unwrap();

    group.bench_function("encode_poll", |b| b.iter(|| encode_record(black_box(&poll))));
    group.bench_function("encode_receipt", |b| {
        b.iter(|| encode_record(black_box(&receipt)))
    });
    group.bench_function("decode_poll", |b| {
        b.iter(|| decode_record::<Poll>(&address, black_box(&poll_bytes)))
    });
    group.finish();
}

/// Full vote transactions, one fresh voter per iteration.
pub fn bench_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("pl-01-vote");
    group.measurement_time(Duration::from_secs(5));

    let ledger = new_ledger(150);
    seed_poll(&ledger, 1, 100, 200, identity(0), &["A", "B"]);
    let mut next = 1u64;

    group.throughput(Throughput::Elements(1));
    group.bench_function("vote_fresh_voter", |b| {
        b.iter(|| {
            next += 1;
            ledger.vote(1, "A", identity(next), 150)
        })
    });
    group.bench_function("vote_rejected_duplicate", |b| {
        b.iter(|| ledger.vote(1, "A", identity(2), 150))
    });
    group.finish();
}

/// Tally cost against candidate count.
pub fn bench_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("pl-01-tally");

    for size in [10usize, 100, 500] {
        let ledger = new_ledger(150);
        let names: Vec<String> = (0..size).map(|i| format!("candidate-{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        seed_poll(&ledger, 1, 100, 200, identity(0), &refs);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("tally", size), &size, |b, _| {
            b.iter(|| ledger.tally(black_box(1)))
        });
    }
    group.finish();
}
