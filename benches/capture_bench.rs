use criterion::{criterion_group, criterion_main, Criterion, black_box};
use damas::{find_all_captures, Board, Side};

fn bench_captures(c: &mut Criterion) {
    // two kings and scattered men, lots of branching landings
    let b = Board::from_layout(&[
        " . . . .",
        ". b . b ",
        " . . . .",
        ". b . . ",
        " . W . .",
        ". b . b ",
        " . . . .",
        "W . . . ",
    ])
    .unwrap();
    c.bench_function("captures_two_kings", |ben| {
        ben.iter(|| black_box(find_all_captures(black_box(&b), Side::White).len()))
    });

    let start = Board::startpos();
    c.bench_function("captures_startpos_none", |ben| {
        ben.iter(|| black_box(find_all_captures(black_box(&start), Side::White).len()))
    });
}

criterion_group!(benches, bench_captures);
criterion_main!(benches);
