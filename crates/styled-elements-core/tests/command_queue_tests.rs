//! Integration tests for sequential command processing.

use std::time::{Duration, Instant};

use styled_elements_core::CommandQueue;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Default)]
struct Recorder {
    log: Vec<String>,
    current: &'static str,
    steps: usize,
}

/// A queue recording `"<command>:<step>"` for every step it runs. Each
/// command gets one step per entry in its delay list.
fn recording_queue(start: Instant) -> CommandQueue<Recorder, (&'static str, Vec<u64>)> {
    CommandQueue::new(
        Recorder::default(),
        move |recorder: &mut Recorder, (name, delays): (&'static str, Vec<u64>)| {
            if delays.is_empty() {
                return None;
            }
            recorder.current = name;
            recorder.steps = delays.len();
            Some(delays.iter().map(|&ms| start + Duration::from_millis(ms)).collect())
        },
        |step, recorder: &mut Recorder| {
            recorder.log.push(format!("{}:{step}", recorder.current));
            step + 1 < recorder.steps
        },
    )
}

#[test]
fn test_commands_run_strictly_in_sequence() {
    init_tracing();
    let start = Instant::now();
    let mut queue = recording_queue(start);

    let deadline = queue.add_command(("a", vec![10, 20]), start);
    assert_eq!(deadline, Some(start + Duration::from_millis(10)));
    queue.add_command(("b", vec![0]), start);
    assert_eq!(queue.pending_len(), 1);

    assert_eq!(queue.poll(start + Duration::from_millis(15)), Some(start + Duration::from_millis(20)));
    assert_eq!(queue.context().log, ["a:0"]);

    assert_eq!(queue.poll(start + Duration::from_millis(20)), None);
    assert_eq!(queue.context().log, ["a:0", "a:1", "b:0"]);
    assert!(!queue.is_running());
}

#[test]
fn test_skipped_commands_start_the_next_one() {
    let start = Instant::now();
    let mut queue = recording_queue(start);

    queue.add_command(("skipped", vec![]), start);
    assert!(!queue.is_running());

    queue.add_command(("run", vec![0]), start);
    assert!(queue.is_running());
    assert_eq!(queue.poll(start), None);
    assert_eq!(queue.context().log, ["run:0"]);
}

#[test]
fn test_poll_on_idle_queue_is_none() {
    let mut queue = recording_queue(Instant::now());
    assert_eq!(queue.poll(Instant::now()), None);
    assert!(queue.context().log.is_empty());
}
