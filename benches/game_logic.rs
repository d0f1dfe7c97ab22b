use criterion::{black_box, criterion_group, criterion_main, Criterion};
use falling_blocks::core::{Board, GameSession, GameSnapshot, Piece, ShapeSet};
use falling_blocks::term::{FrameBuffer, GameView, Viewport};
use falling_blocks::types::PieceKind;

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::default();
    session.start_game(0);
    let mut now = 0u64;

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            session.tick(black_box(now));
            if session.game_over() {
                session.restart(now);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                board.fill_row(y, PieceKind::I, &[]);
            }
            black_box(board.clear_lines());
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let shapes = ShapeSet::canonical();
    let mut piece = Piece::spawn(PieceKind::T, &shapes);
    piece.y = 8;

    c.bench_function("rotate_with_kicks", |b| {
        b.iter(|| {
            black_box(piece.rotate(&board));
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = GameSession::default();
    session.start_game(0);
    let mut now = 0u64;

    c.bench_function("hard_drop_and_lock", |b| {
        b.iter(|| {
            session.hard_drop();
            now += 250;
            session.tick(now);
            if session.game_over() {
                session.restart(now);
            }
        })
    });
}

fn bench_snapshot_render(c: &mut Criterion) {
    let mut session = GameSession::default();
    session.start_game(0);
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            session.snapshot_into(&mut snap);
            view.render_into(&snap, vp, &mut fb);
            black_box(fb.cells().len());
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_rotate,
    bench_hard_drop,
    bench_snapshot_render
);
criterion_main!(benches);
