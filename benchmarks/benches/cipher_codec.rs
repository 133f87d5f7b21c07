// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use rampart_cipher::test_utils::ToyBlockCipher;
use rampart_cipher::{CipherContext, CipherDriver};

const SIZES: [usize; 5] = [64, 256, 1024, 4096, 16384];
const KEY: [u8; 16] = [0x11; 16];
const IV: [u8; 16] = [0x22; 16];

fn drivers() -> [(&'static str, Arc<dyn CipherDriver>); 3] {
    [
        ("cbc16", ToyBlockCipher::cbc(16).into_driver()),
        ("ecb8", ToyBlockCipher::ecb(8).into_driver()),
        ("ctr", ToyBlockCipher::ctr().into_driver()),
    ]
}

fn encrypt(driver: &Arc<dyn CipherDriver>, plaintext: &[u8], chunk: usize) -> Vec<u8> {
    let mut ctx = CipherContext::new();
    ctx.encrypt_init(Some(Arc::clone(driver)), Some(&KEY), Some(&IV))
        .expect("encrypt_init failed");

    let mut out = Vec::with_capacity(plaintext.len() + 16);
    for part in plaintext.chunks(chunk) {
        ctx.update(part, &mut out).expect("update failed");
    }
    ctx.finalize(&mut out).expect("finalize failed");
    out
}

fn benchmark_encrypt(c: &mut Criterion) {
    for (name, driver) in drivers() {
        let mut group = c.benchmark_group(format!("{}_encrypt", name));

        for size in SIZES.iter() {
            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(format!("{} bytes", size), size, |b, &size| {
                let plaintext = vec![0x5au8; size];

                b.iter(|| encrypt(black_box(&driver), black_box(&plaintext), size));
            });
        }
        group.finish();
    }
}

fn benchmark_decrypt(c: &mut Criterion) {
    for (name, driver) in drivers() {
        let mut group = c.benchmark_group(format!("{}_decrypt", name));

        for size in SIZES.iter() {
            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(format!("{} bytes", size), size, |b, &size| {
                let ciphertext = encrypt(&driver, &vec![0x5au8; size], size);

                b.iter(|| {
                    let mut ctx = CipherContext::new();
                    ctx.decrypt_init(Some(Arc::clone(&driver)), Some(&KEY), Some(&IV))
                        .expect("decrypt_init failed");

                    let mut out = Vec::with_capacity(ciphertext.len());
                    ctx.update(black_box(&ciphertext), &mut out)
                        .expect("update failed");
                    ctx.finalize(&mut out).expect("finalize failed");
                    out
                });
            });
        }
        group.finish();
    }
}

fn benchmark_chunked_update(c: &mut Criterion) {
    let driver = ToyBlockCipher::cbc(16).into_driver();
    let plaintext = vec![0x5au8; 4096];

    let mut group = c.benchmark_group("cbc16_chunked_encrypt");
    group.throughput(Throughput::Bytes(plaintext.len() as u64));

    // Unaligned chunk sizes exercise the partial-block buffer.
    for chunk in [1usize, 7, 15, 17, 100, 4096].iter() {
        group.bench_with_input(format!("{} byte chunks", chunk), chunk, |b, &chunk| {
            b.iter(|| encrypt(black_box(&driver), black_box(&plaintext), chunk));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_encrypt,
    benchmark_decrypt,
    benchmark_chunked_update
);
criterion_main!(benches);
