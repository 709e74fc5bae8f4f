//! Engine loop tests - notification policy, wake-ups and shutdown

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use tile_smash::core::{Board, BoardSnapshot, CoreError, SimpleRng};
use tile_smash::engine::{
    BoardObserver, Engine, EngineConfig, GameContext, ManualClock, SystemClock, TickOutcome,
};
use tile_smash::types::{Coordinates, Direction, Move, TileColor::*};

fn config(tick_ms: u64) -> EngineConfig {
    EngineConfig {
        width: 6,
        height: 6,
        tick_interval: Duration::from_millis(tick_ms),
        seed: 99,
        ..EngineConfig::default()
    }
}

fn channel_observer() -> (Arc<dyn BoardObserver>, mpsc::UnboundedReceiver<BoardSnapshot>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let observer = move |board: &BoardSnapshot| {
        let _ = tx.send(board.clone());
    };
    (Arc::new(observer), rx)
}

#[test]
fn test_repeated_idle_passes_never_notify() {
    let board = Board::from_rows(vec![vec![Red, Blue, Green], vec![Blue, Green, Red]]).unwrap();
    let ctx = Arc::new(GameContext::with_board(
        config(1000),
        Arc::new(ManualClock::new()),
        board,
    ));
    let (observer, mut rx) = channel_observer();
    let engine = Engine::new(ctx, observer);

    for _ in 0..10 {
        assert_eq!(engine.tick(), TickOutcome::Idle);
    }
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_new_game_is_pushed_exactly_once() {
    let clock = Arc::new(ManualClock::new());
    let ctx = Arc::new(GameContext::new(config(1000), clock).unwrap());
    let (observer, mut rx) = channel_observer();
    let engine = Engine::new(Arc::clone(&ctx), observer);

    tokio_test::assert_ok!(ctx.start_new_game());
    assert!(matches!(engine.tick(), TickOutcome::Changed(s) if s.forced));
    assert_eq!(engine.tick(), TickOutcome::Idle);

    let pushed = rx.try_recv().unwrap();
    assert_eq!(pushed.width, 6);
    assert_eq!(pushed, ctx.get_board());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_moves_apply_in_submission_order() {
    let board = Board::from_rows(vec![vec![Red, Blue, Green, Yellow]]).unwrap();
    let ctx = Arc::new(GameContext::with_board(
        config(1000),
        Arc::new(ManualClock::new()),
        board,
    ));
    let (observer, mut rx) = channel_observer();
    let engine = Engine::new(Arc::clone(&ctx), observer);

    assert!(ctx.submit_move(Move::new(Coordinates::new(0, 0), Direction::Right)));
    assert!(ctx.submit_move(Move::new(Coordinates::new(1, 0), Direction::Right)));

    match engine.tick() {
        TickOutcome::Changed(s) => assert_eq!(s.moves_applied, 2),
        other => panic!("unexpected outcome {:?}", other),
    }
    // Red walked two cells right.
    let pushed = rx.try_recv().unwrap();
    assert_eq!(pushed.get(Coordinates::new(2, 0)).unwrap().color, Red);
    assert_eq!(pushed.get(Coordinates::new(0, 0)).unwrap().color, Blue);
}

#[test]
fn test_invalid_move_is_dropped_before_queueing() {
    let ctx = GameContext::new(config(1000), Arc::new(ManualClock::new())).unwrap();
    assert!(!ctx.submit_move(Move::new(Coordinates::new(5, 5), Direction::Up)));
    assert!(ctx.queue().is_empty());
    assert_eq!(
        ctx.submit_raw_move(0, 0, "sideways"),
        Err(CoreError::UnknownDirection("sideways".to_string()))
    );
}

#[tokio::test]
async fn test_move_wakes_idle_engine() {
    // Tick interval far longer than the test timeout: only a wake can trigger the pass.
    let ctx = Arc::new(GameContext::new(config(60_000), Arc::new(SystemClock)).unwrap());
    let (observer, mut rx) = channel_observer();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(Engine::new(Arc::clone(&ctx), observer).run(shutdown.clone()));

    // Let the first pass run and the loop go idle.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err());

    // Pick a swap that really changes the board.
    let board = ctx.get_board();
    let mv = (0..6)
        .flat_map(|y| (0..6).map(move |x| Coordinates::new(x, y)))
        .flat_map(|at| [Direction::Up, Direction::Right].map(|d| Move::new(at, d)))
        .find(|mv| {
            board
                .get(mv.target())
                .is_some_and(|target| Some(target) != board.get(mv.source))
        })
        .expect("generated board has distinct neighbours");
    assert!(ctx.submit_move(mv));
    let pushed = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("engine did not wake")
        .expect("observer dropped");
    assert_eq!((pushed.width, pushed.height), (6, 6));

    shutdown.cancel();
    let stopped = tokio::time::timeout(Duration::from_secs(2), handle).await;
    tokio_test::assert_ok!(stopped.expect("engine did not stop"));
}

#[test]
fn test_context_is_playable_before_engine_starts() {
    for (width, height) in [(1, 1), (1, 7), (3, 3), (12, 5)] {
        let cfg = EngineConfig {
            width,
            height,
            ..config(1000)
        };
        let ctx = GameContext::new(cfg, Arc::new(ManualClock::new())).unwrap();
        let board = ctx.get_board();
        assert_eq!(board.tiles.len(), width * height);
        assert!(board.tiles.iter().all(|t| t.color != Empty));
        assert_eq!(board.destroyed_count(), 0);
    }
}

#[test]
fn test_context_reports_generation_failure() {
    let bad = EngineConfig {
        width: 0,
        ..config(10)
    };
    let result = GameContext::new(bad, Arc::new(SystemClock));
    assert!(matches!(result, Err(CoreError::InvalidDimensions { .. })));
}

#[test]
fn test_concurrent_callers_during_ticks() {
    const SUBMITTERS: u32 = 4;
    const READERS: usize = 2;
    const MOVES_PER_SUBMITTER: usize = 300;

    let clock = Arc::new(ManualClock::new());
    let ctx = Arc::new(GameContext::new(config(1000), clock.clone()).unwrap());
    let pushes = Arc::new(AtomicUsize::new(0));
    let observer = {
        let pushes = Arc::clone(&pushes);
        move |board: &BoardSnapshot| {
            assert_eq!(board.tiles.len(), 36);
            pushes.fetch_add(1, Ordering::SeqCst);
        }
    };
    let engine = Engine::new(Arc::clone(&ctx), Arc::new(observer));
    let submitters_done = Arc::new(AtomicBool::new(false));

    let submitters: Vec<_> = (0..SUBMITTERS)
        .map(|t| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let mut rng = SimpleRng::new(t + 1);
                let mut accepted = 0usize;
                for _ in 0..MOVES_PER_SUBMITTER {
                    let x = rng.next_range(8) as i32 - 1;
                    let y = rng.next_range(8) as i32 - 1;
                    let dir = Direction::ALL[rng.next_range(4) as usize];
                    if ctx.submit_move(Move::new(Coordinates::new(x, y), dir)) {
                        accepted += 1;
                    }
                }
                accepted
            })
        })
        .collect();

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            let done = Arc::clone(&submitters_done);
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::SeqCst) || reads == 0 {
                    let board = ctx.get_board();
                    assert_eq!((board.width, board.height), (6, 6));
                    assert_eq!(board.tiles.len(), 36);
                    assert_eq!(board.rows().count(), 6);
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    // Only this thread mutates the board, so before/after comparisons are exact.
    let mut handled = 0usize;
    let mut changed = 0usize;
    let tick_once = |handled: &mut usize, changed: &mut usize| {
        let before = ctx.get_board();
        let outcome = engine.tick();
        let after = ctx.get_board();
        match outcome {
            TickOutcome::Idle => assert_eq!(before, after),
            TickOutcome::Unchanged(s) => {
                assert_eq!(before, after);
                *handled += s.moves_applied + s.moves_dropped;
            }
            TickOutcome::Changed(s) => {
                assert_ne!(before, after);
                *handled += s.moves_applied + s.moves_dropped;
                *changed += 1;
            }
        }
        clock.advance(Duration::from_millis(400));
    };

    while submitters.iter().any(|h| !h.is_finished()) {
        tick_once(&mut handled, &mut changed);
    }
    let accepted: usize = submitters.into_iter().map(|h| h.join().unwrap()).sum();
    // Drain whatever arrived after the last pass.
    tick_once(&mut handled, &mut changed);
    submitters_done.store(true, Ordering::SeqCst);
    for r in readers {
        assert!(r.join().unwrap() > 0);
    }

    assert!(accepted > 0);
    assert_eq!(handled, accepted);
    assert!(ctx.queue().is_empty());
    assert_eq!(pushes.load(Ordering::SeqCst), changed);
}
