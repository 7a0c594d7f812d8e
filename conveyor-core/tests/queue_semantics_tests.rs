//! Integration tests for the concurrency contract of `MessageQueue`

use conveyor_core::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_fifo_across_threads() {
    let queue = MessageQueue::unbounded();
    let producer = queue.clone();

    let handle = thread::spawn(move || {
        for i in 0..5 {
            producer.send(format!("Message {i}")).unwrap();
        }
    });

    for i in 0..5 {
        assert_eq!(queue.recv().unwrap(), format!("Message {i}"));
    }
    handle.join().unwrap();
}

#[test]
fn test_no_loss_no_duplication() {
    const COUNT: u64 = 10_000;

    let queue = MessageQueue::unbounded();
    let producer = queue.clone();

    let sender = thread::spawn(move || {
        for tag in 0..COUNT {
            producer.send(tag).unwrap();
        }
    });

    let receiver = thread::spawn(move || {
        let mut collected = Vec::with_capacity(COUNT as usize);
        for _ in 0..COUNT {
            collected.push(queue.recv().unwrap());
        }
        collected
    });

    sender.join().unwrap();
    let collected = receiver.join().unwrap();

    // Single producer + single consumer: the tagged set comes back complete
    // and in send order.
    assert_eq!(collected.len(), COUNT as usize);
    for (expected, tag) in collected.into_iter().enumerate() {
        assert_eq!(tag, expected as u64);
    }
}

#[test]
fn test_recv_blocks_until_send() {
    let queue: MessageQueue<&str> = MessageQueue::unbounded();
    let consumer = queue.clone();
    let sent = Arc::new(AtomicBool::new(false));
    let sent_seen = Arc::clone(&sent);

    let receiver = thread::spawn(move || {
        let msg = consumer.recv().unwrap();
        // The send flag must already be up when recv returns.
        (msg, sent_seen.load(Ordering::SeqCst))
    });

    // Give the receiver time to park on the empty queue.
    thread::sleep(Duration::from_millis(100));

    sent.store(true, Ordering::SeqCst);
    queue.send("X").unwrap();

    let (msg, send_preceded) = receiver.join().unwrap();
    assert_eq!(msg, "X");
    assert!(send_preceded, "recv returned before send was issued");
}

#[test]
fn test_each_send_wakes_a_receiver() {
    // Liveness: with sends arriving one at a time, a parked receiver is
    // always released. Run several park/wake cycles back to back.
    let queue = MessageQueue::unbounded();
    let consumer = queue.clone();

    let receiver = thread::spawn(move || {
        for i in 0..20 {
            assert_eq!(consumer.recv().unwrap(), i);
        }
    });

    for i in 0..20 {
        queue.send(i).unwrap();
        thread::sleep(Duration::from_millis(1));
    }
    receiver.join().unwrap();
}

#[test]
fn test_bounded_send_blocks_until_slot_frees() {
    let queue = MessageQueue::bounded(1);
    queue.send(0).unwrap();

    let producer = queue.clone();
    let unblocked_at = thread::spawn(move || {
        producer.send(1).unwrap();
        Instant::now()
    });

    // Hold the queue full long enough to know the sender parked.
    thread::sleep(Duration::from_millis(100));
    let freed_at = Instant::now();
    assert_eq!(queue.recv().unwrap(), 0);

    let sent_at = unblocked_at.join().unwrap();
    assert!(sent_at >= freed_at, "send completed before a slot freed");
    assert_eq!(queue.recv().unwrap(), 1);
}

#[test]
fn test_close_wakes_parked_sender() {
    let queue = MessageQueue::bounded(1);
    queue.send("pinned").unwrap();

    let producer = queue.clone();
    let blocked = thread::spawn(move || producer.send("never lands"));

    thread::sleep(Duration::from_millis(50));
    queue.close();

    let err = blocked.join().unwrap().unwrap_err();
    assert_eq!(err.into_inner(), "never lands");
    // The message queued before the close is still delivered.
    assert_eq!(queue.recv(), Ok("pinned"));
    assert_eq!(queue.recv(), Err(RecvError::Closed));
}

#[test]
fn test_timeout_distinct_from_close() {
    let queue: MessageQueue<u8> = MessageQueue::unbounded();
    assert_eq!(
        queue.recv_timeout(Duration::from_millis(10)),
        Err(RecvTimeoutError::Timeout)
    );
    queue.close();
    assert_eq!(
        queue.recv_timeout(Duration::from_millis(10)),
        Err(RecvTimeoutError::Closed)
    );
}

#[test]
fn test_recv_deadline_in_the_past() {
    let queue: MessageQueue<u8> = MessageQueue::unbounded();
    let deadline = Instant::now() - Duration::from_millis(1);
    assert_eq!(queue.recv_deadline(deadline), Err(RecvTimeoutError::Timeout));
}
