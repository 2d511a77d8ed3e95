// ABOUTME: Benchmark suite for the SMPP codec, inbound parser and message segmenter
// ABOUTME: Measures PDU decoding, deliver_sm/receipt parsing and CSMS planning across message sizes

use bytes::{BufMut, Bytes, BytesMut};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use smpp_esme::codec::Pdu;
use smpp_esme::datatypes::*;
use smpp_esme::segmenter::{self, CsmsMethod, CsmsReference};
use std::time::Duration;

const RECEIPT: &[u8] = b"id:4ab7c001 sub:001 dlvrd:001 submit date:2503041200 done date:2503041201 stat:DELIVRD err:000 text:Hello World";

fn create_deliver_sm(esm_class: u8, message: &[u8]) -> Pdu {
    let mut body = BytesMut::new();
    body.put_slice(b"\0\x01\x014512345678\0\x05\x00Brand\0");
    body.put_slice(&[esm_class, 0x00, 0x00]);
    body.put_slice(b"\0\0");
    body.put_slice(&[0x00, 0x00, 0x00, 0x00]);
    body.put_u8(message.len() as u8);
    body.put_slice(message);
    // receipted_message_id and message_state
    body.put_slice(b"\x00\x1E\x00\x094ab7c001\0\x04\x27\x00\x01\x02");
    Pdu::new(CommandId::DeliverSm, 1, body.freeze())
}

fn bench_pdu_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdu_decode");
    group.measurement_time(Duration::from_secs(10));

    let deliver_bytes = create_deliver_sm(0x00, b"Hello World").encode();
    group.bench_function("deliver_sm", |b| {
        b.iter(|| {
            let mut wire = black_box(deliver_bytes.clone());
            Pdu::decode(&mut wire).unwrap()
        })
    });

    let enquire_bytes = Pdu::new(CommandId::EnquireLink, 7, Bytes::new()).encode();
    group.bench_function("enquire_link", |b| {
        b.iter(|| {
            let mut wire = black_box(enquire_bytes.clone());
            Pdu::decode(&mut wire).unwrap()
        })
    });

    group.finish();
}

fn bench_inbound_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inbound_parse");
    group.measurement_time(Duration::from_secs(10));

    let plain = create_deliver_sm(0x00, b"Hello World");
    group.bench_function("deliver_sm", |b| {
        b.iter(|| InboundMessage::parse(black_box(&plain)).unwrap())
    });

    let receipt = create_deliver_sm(0x04, RECEIPT);
    group.bench_function("delivery_receipt", |b| {
        b.iter(|| InboundMessage::parse(black_box(&receipt)).unwrap())
    });

    group.bench_function("smpp_time", |b| {
        b.iter(|| parse_smpp_time(black_box("250304120000004+")).unwrap())
    });

    group.finish();
}

fn bench_segmenter(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmenter");
    group.measurement_time(Duration::from_secs(10));

    let message_sizes = [100, 160, 306, 1000]; // single part up to several parts

    for method in [CsmsMethod::SarTags, CsmsMethod::Udh8Bit, CsmsMethod::Payload] {
        let mut reference = CsmsReference::new(method);
        for &size in &message_sizes {
            let message = "A".repeat(size).into_bytes();
            group.bench_with_input(
                BenchmarkId::new(format!("{method:?}"), size),
                &message,
                |b, message| {
                    b.iter(|| {
                        segmenter::plan(
                            black_box(message),
                            DataCoding::SmscDefault,
                            EsmClass::default(),
                            &[],
                            method,
                            &mut reference,
                        )
                        .unwrap()
                    })
                },
            );
        }
    }

    // escape octets on part boundaries force the slow split
    let escaped: Vec<u8> = (0..1000)
        .map(|i| if i % 151 == 150 { 0x1B } else { b'A' })
        .collect();
    group.bench_function("escape_aware_split", |b| {
        b.iter(|| {
            segmenter::split_message(
                black_box(&escaped),
                segmenter::SPLIT_DEFAULT,
                DataCoding::SmscDefault,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_pdu_decode, bench_inbound_parse, bench_segmenter);
criterion_main!(benches);
