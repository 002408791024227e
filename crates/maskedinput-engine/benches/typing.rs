use criterion::{Criterion, criterion_group, criterion_main};
use maskedinput_engine::{InputMask, MaskOptions, Selection};

const PHONE: &str = "(999) 999-9999";

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");
    group.sample_size(20);

    let mask = InputMask::new(MaskOptions::new(PHONE)).unwrap();

    group.bench_function("fill_phone_number", |b| {
        b.iter(|| {
            let mut m = mask.clone();
            for ch in std::hint::black_box("5551234567").chars() {
                m.input(ch);
            }
            std::hint::black_box(m.value());
        });
    });

    group.bench_function("paste_formatted", |b| {
        b.iter(|| {
            let mut m = mask.clone();
            m.paste(std::hint::black_box("(555) 123-4567"));
            std::hint::black_box(m.value());
        });
    });

    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");
    group.sample_size(20);

    group.bench_function("undo_redo_cycle", |b| {
        let mut mask = InputMask::new(MaskOptions::new(PHONE)).unwrap();
        for ch in "555".chars() {
            mask.input(ch);
        }
        mask.set_selection(Selection::caret(7));
        for ch in "1234".chars() {
            mask.input(ch);
        }
        b.iter(|| {
            while mask.undo() {}
            while mask.redo() {}
            std::hint::black_box(mask.value());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_typing, bench_history);
criterion_main!(benches);
