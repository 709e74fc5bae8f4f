//! Move queue tests - concurrent producers, single drain

use std::sync::Arc;
use std::thread;

use tile_smash::engine::MoveQueue;
use tile_smash::types::{Coordinates, Direction, Move};

#[test]
fn test_drain_preserves_submission_order() {
    let queue = MoveQueue::new();
    for x in 0..5 {
        queue.enqueue(Move::new(Coordinates::new(x, 0), Direction::Up));
    }

    let drained = queue.dequeue_all();
    let xs: Vec<i32> = drained.iter().map(|m| m.source.x).collect();
    assert_eq!(xs, vec![0, 1, 2, 3, 4]);
    assert!(queue.is_empty());
    assert!(queue.dequeue_all().is_empty());
}

#[test]
fn test_concurrent_producers_lose_nothing() {
    const THREADS: i32 = 8;
    const PER_THREAD: i32 = 250;

    let queue = Arc::new(MoveQueue::new());
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    queue.enqueue(Move::new(Coordinates::new(t, i), Direction::Right));
                }
            })
        })
        .collect();

    // Drain while producers are still running; the two drains together see everything.
    let mut seen = queue.dequeue_all();
    for h in handles {
        h.join().unwrap();
    }
    seen.extend(queue.dequeue_all());

    assert_eq!(seen.len(), (THREADS * PER_THREAD) as usize);

    // Per-producer order survives.
    for t in 0..THREADS {
        let ys: Vec<i32> = seen
            .iter()
            .filter(|m| m.source.x == t)
            .map(|m| m.source.y)
            .collect();
        assert_eq!(ys, (0..PER_THREAD).collect::<Vec<_>>());
    }
}
