// Author: Dustin Pilgrim
// License: MIT

use crate::core::action::Action;
use crate::core::events::{Event, InputKind};
use crate::core::info::DisplayFrame;
use crate::core::manager::{ALERT_BODY, ALERT_TITLE, Manager, State};

fn start(mgr: &Manager, state: &mut State, now_ms: u64) -> Vec<Action> {
    mgr.handle_event(state, Event::StartTracking { now_ms })
}

fn stop(mgr: &Manager, state: &mut State, now_ms: u64) -> Vec<Action> {
    mgr.handle_event(state, Event::StopTracking { now_ms })
}

fn input(mgr: &Manager, state: &mut State, now_ms: u64) -> Vec<Action> {
    mgr.handle_event(
        state,
        Event::UserInput {
            kind: InputKind::Seat,
            now_ms,
        },
    )
}

fn scheduled(actions: &[Action]) -> Option<(u64, u64)> {
    actions.iter().rev().find_map(|a| match a {
        Action::ScheduleDeadline { generation, due_ms } => Some((*generation, *due_ms)),
        _ => None,
    })
}

fn fired(actions: &[Action]) -> bool {
    actions.contains(&Action::Capture)
}

fn last_frame(actions: &[Action]) -> Option<&DisplayFrame> {
    actions.iter().rev().find_map(|a| match a {
        Action::Display(frame) => Some(frame),
        _ => None,
    })
}

#[test]
fn start_arms_everything_once() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let actions = start(&mgr, &mut state, 0);
    assert_eq!(
        actions,
        vec![
            Action::SubscribeInput,
            Action::StartTicker { session: 1 },
            Action::ScheduleDeadline {
                generation: 1,
                due_ms: 1_000
            },
            Action::Display(DisplayFrame {
                elapsed: "00:00:00".to_string(),
                inactive: false,
                tracking: true,
            }),
        ]
    );

    assert!(start(&mgr, &mut state, 500).is_empty());
    assert_eq!(state.tracker().elapsed_ms(500), 500);
}

#[test]
fn stop_tears_down_and_is_idempotent() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    assert!(stop(&mgr, &mut state, 0).is_empty());

    start(&mgr, &mut state, 0);
    let actions = stop(&mgr, &mut state, 400);

    assert_eq!(&actions[..3], &[
        Action::CancelDeadline,
        Action::UnsubscribeInput,
        Action::StopTicker,
    ]);
    assert!(!state.monitor().is_armed());
    assert!(stop(&mgr, &mut state, 900).is_empty());
}

#[test]
fn end_to_end_accumulates_across_cycles() {
    let mgr = Manager::new(60_000);
    let mut state = State::new();

    start(&mgr, &mut state, 0);
    let actions = stop(&mgr, &mut state, 5_000);
    assert_eq!(last_frame(&actions).unwrap().elapsed, "00:00:05");

    start(&mgr, &mut state, 10_000);
    let actions = stop(&mgr, &mut state, 12_000);
    assert_eq!(last_frame(&actions).unwrap().elapsed, "00:00:07");
    assert!(!state.tracker().is_active());
    assert_eq!(state.tracker().elapsed_ms(99_000), 7_000);
}

#[test]
fn tick_displays_running_total() {
    let mgr = Manager::new(60_000);
    let mut state = State::new();

    start(&mgr, &mut state, 0);
    stop(&mgr, &mut state, 3_000);
    start(&mgr, &mut state, 20_000);

    let session = state.tracker().activation();
    let actions = mgr.handle_event(&mut state, Event::Tick { session, now_ms: 21_000 });
    assert_eq!(last_frame(&actions).unwrap().elapsed, "00:00:04");
}

#[test]
fn stale_ticks_are_ignored() {
    let mgr = Manager::new(60_000);
    let mut state = State::new();

    start(&mgr, &mut state, 0);
    let old_session = state.tracker().activation();
    stop(&mgr, &mut state, 1_000);

    // queued before the stop, delivered after it
    let actions = mgr.handle_event(&mut state, Event::Tick { session: old_session, now_ms: 1_000 });
    assert!(actions.is_empty());

    start(&mgr, &mut state, 2_000);
    let actions = mgr.handle_event(&mut state, Event::Tick { session: old_session, now_ms: 3_000 });
    assert!(actions.is_empty());
}

#[test]
fn ticks_never_reset_inactivity() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let (generation, due_ms) = scheduled(&start(&mgr, &mut state, 0)).unwrap();
    let session = state.tracker().activation();

    for now_ms in [250, 500, 750] {
        let actions = mgr.handle_event(&mut state, Event::Tick { session, now_ms });
        assert!(scheduled(&actions).is_none());
    }

    let actions = mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: due_ms });
    assert!(fired(&actions));
}

#[test]
fn firing_emits_capture_then_alert_then_display() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let (generation, _) = scheduled(&start(&mgr, &mut state, 0)).unwrap();
    let actions = mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: 1_000 });

    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0], Action::Capture);
    assert_eq!(
        actions[1],
        Action::Alert {
            title: ALERT_TITLE.to_string(),
            body: ALERT_BODY.to_string()
        }
    );
    assert!(last_frame(&actions).unwrap().inactive);
}

#[test]
fn fires_exactly_once_without_input() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let (generation, _) = scheduled(&start(&mgr, &mut state, 0)).unwrap();

    let mut firings = 0;
    for now_ms in [1_000, 1_500, 4_000] {
        let actions = mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms });
        if fired(&actions) {
            firings += 1;
        }
    }
    assert_eq!(firings, 1);
}

#[test]
fn input_at_999_suppresses_firing() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let (first, _) = scheduled(&start(&mgr, &mut state, 0)).unwrap();
    let (second, due) = scheduled(&input(&mgr, &mut state, 999)).unwrap();
    assert_eq!(due, 1_999);

    let actions = mgr.handle_event(&mut state, Event::DeadlineElapsed { generation: first, now_ms: 1_000 });
    assert!(!fired(&actions));

    let actions = mgr.handle_event(&mut state, Event::DeadlineElapsed { generation: second, now_ms: 1_999 });
    assert!(fired(&actions));
}

#[test]
fn input_and_deadline_in_same_pass_input_wins() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let (generation, due_ms) = scheduled(&start(&mgr, &mut state, 0)).unwrap();

    input(&mgr, &mut state, due_ms);
    let actions = mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: due_ms });

    assert!(actions.is_empty());
    assert!(!state.monitor().fired());
}

#[test]
fn rearm_after_firing_needs_full_window() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let (generation, _) = scheduled(&start(&mgr, &mut state, 0)).unwrap();
    assert!(fired(&mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: 1_000 })));

    let actions = input(&mgr, &mut state, 5_000);
    let frame = last_frame(&actions).unwrap();
    assert!(!frame.inactive);

    let (generation, due_ms) = scheduled(&actions).unwrap();
    assert_eq!(due_ms, 6_000);

    assert!(!fired(&mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: 5_999 })));
    assert!(fired(&mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: 6_000 })));
}

#[test]
fn input_while_armed_does_not_redisplay() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    start(&mgr, &mut state, 0);
    let actions = input(&mgr, &mut state, 10);

    assert_eq!(actions.len(), 1);
    assert!(last_frame(&actions).is_none());
}

#[test]
fn nothing_fires_after_stop() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let (generation, due_ms) = scheduled(&start(&mgr, &mut state, 0)).unwrap();
    stop(&mgr, &mut state, 500);

    assert!(input(&mgr, &mut state, 600).is_empty());
    assert!(mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: due_ms }).is_empty());

    // a stale deadline from the first activation cannot fire the second one
    start(&mgr, &mut state, 2_000);
    let actions = mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: 5_000 });
    assert!(actions.is_empty());
}

#[test]
fn stop_clears_inactive_flag() {
    let mgr = Manager::new(1_000);
    let mut state = State::new();

    let (generation, _) = scheduled(&start(&mgr, &mut state, 0)).unwrap();
    mgr.handle_event(&mut state, Event::DeadlineElapsed { generation, now_ms: 1_000 });
    assert!(state.monitor().fired());

    let actions = stop(&mgr, &mut state, 2_000);
    let frame = last_frame(&actions).unwrap();
    assert!(!frame.inactive);
    assert!(!frame.tracking);
}

#[test]
fn snapshot_reports_state() {
    let mgr = Manager::new(60_000);
    let mut state = State::new();

    start(&mgr, &mut state, 0);
    let snap = mgr.snapshot(&state, 65_000);

    assert!(snap.tracking);
    assert_eq!(snap.elapsed_ms, 65_000);
    assert_eq!(snap.waybar.text, "00:01:05");
}
