use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use descriptive_chess::board_model::{BoardModel, SessionConfig};
use descriptive_chess::game_state::chess_types::{Board, Color};
use descriptive_chess::notation::descriptive_parser::parse_descriptive;
use descriptive_chess::utils::fen_placement::parse_placement;
use descriptive_chess::utils::transcript::TranscriptRunner;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    placement: &'static str,
    player: Color,
    text: &'static str,
}

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "pawn_push",
        placement: STARTPOS,
        player: Color::White,
        text: "P-K4",
    },
    BenchCase {
        name: "ambiguous_knight",
        placement: STARTPOS,
        player: Color::White,
        text: "Kt-B3",
    },
    BenchCase {
        name: "qualified_capture_with_check",
        placement: "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR",
        player: Color::White,
        text: "QxBPch",
    },
    BenchCase {
        name: "queen_side_castling",
        placement: "r3kbnr/pppqpppp/2n5/3p1b2/8/8/PPPPPPPP/RNBQKBNR",
        player: Color::Black,
        text: "O-O-O",
    },
];

const TRANSCRIPT: &str = "1. P-K4 P-K4 2. Kt-KB3 Kt-QB3 3. B-Kt5 P-QR3 4. B-R4 Kt-B3 \
                          5. O-O B-K2 6. R-K1 P-QKt4 7. B-Kt3 P-Q3 8. P-B3 O-O";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("descriptive_parse");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let board: Board = parse_placement(case.placement).expect("bench placement should parse");
        group.bench_with_input(BenchmarkId::from_parameter(case.name), case, |b, case| {
            b.iter(|| {
                let result = parse_descriptive(&board, case.player, black_box(case.text));
                black_box(result.is_ok())
            });
        });
    }

    group.finish();
}

fn bench_transcript(c: &mut Criterion) {
    c.bench_function("ruy_lopez_transcript_run", |b| {
        b.iter(|| {
            let mut model = BoardModel::with_config(SessionConfig::without_autosave());
            let mut runner = TranscriptRunner::from_text(black_box(TRANSCRIPT));
            let (moved, _) = runner.run_to_end(&mut model);
            black_box(moved)
        });
    });
}

criterion_group!(benches, bench_parse, bench_transcript);
criterion_main!(benches);
