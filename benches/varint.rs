use std::mem;

use criterion::{Criterion, Throughput};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use veriform::encoding::varint::{decode, encode, encoded_len};

fn benchmark_varint(criterion: &mut Criterion, name: &str, mut values: Vec<u64>) {
    // Shuffle the values in a stable order.
    values.shuffle(&mut StdRng::seed_from_u64(0));
    let name = format!("varint/{name}");

    let encoded_len_total = values.iter().copied().map(encoded_len).sum::<usize>() as u64;
    let decoded_len = (values.len() * mem::size_of::<u64>()) as u64;

    criterion
        .benchmark_group(&name)
        .bench_function("encode", {
            let encode_values = values.clone();
            move |b| {
                let mut buf = Vec::with_capacity(encode_values.len() * 9);
                b.iter(|| {
                    buf.clear();
                    for &value in &encode_values {
                        encode(value, &mut buf);
                    }
                    criterion::black_box(&buf);
                })
            }
        })
        .throughput(Throughput::Bytes(encoded_len_total));

    criterion
        .benchmark_group(&name)
        .bench_function("decode", {
            let decode_values = values.clone();
            move |b| {
                let mut buf = Vec::with_capacity(decode_values.len() * 9);
                for &value in &decode_values {
                    encode(value, &mut buf);
                }

                b.iter(|| {
                    let mut remaining = buf.as_slice();
                    while !remaining.is_empty() {
                        let (_, rest) = decode(remaining).unwrap();
                        remaining = rest;
                    }
                    criterion::black_box(remaining);
                })
            }
        })
        .throughput(Throughput::Bytes(decoded_len));

    criterion
        .benchmark_group(&name)
        .bench_function("encoded_len", move |b| {
            b.iter(|| {
                let mut sum = 0;
                for &value in &values {
                    sum += encoded_len(value);
                }
                criterion::black_box(sum);
            })
        })
        .throughput(Throughput::Bytes(decoded_len));
}

fn assert_all_sized(
    vals: impl IntoIterator<Item = u64>,
    varint_len: usize,
) -> impl Iterator<Item = u64> {
    vals.into_iter().map(move |val| {
        assert_eq!(encoded_len(val), varint_len);
        val
    })
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();

    benchmark_varint(
        &mut criterion,
        "small-1",
        assert_all_sized(0..100, 1).collect(),
    );
    benchmark_varint(
        &mut criterion,
        "medium-2",
        assert_all_sized((200..).take(100), 2).collect(),
    );
    benchmark_varint(
        &mut criterion,
        "medium-4",
        assert_all_sized((1 << 25..).take(100), 4).collect(),
    );
    benchmark_varint(
        &mut criterion,
        "large-8",
        assert_all_sized((1 << 50..).take(100), 8).collect(),
    );
    benchmark_varint(
        &mut criterion,
        "nine-byte",
        (u64::MAX - 100..=u64::MAX).collect(),
    );

    criterion.final_summary();
}
