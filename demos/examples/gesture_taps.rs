// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Taps, double taps, and long presses.
//!
//! This example scripts three single-contact sessions: a tap, a second tap
//! close enough to chain into a double tap, and a hold that becomes a long
//! press once the host advances the engine's clock.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_examples --example gesture_taps`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use understory_gesture::GestureEngine;
use understory_gesture::types::{GestureKind, TouchFrame, TouchPoint};

fn main() {
    let _ = env_logger::try_init();

    let mut engine = GestureEngine::new(Rect::new(0.0, 0.0, 320.0, 480.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    for kind in [
        GestureKind::Tap,
        GestureKind::DoubleTap,
        GestureKind::LongPress,
    ] {
        let seen = seen.clone();
        engine.subscribe(kind, move |event, _| {
            println!("  {} {:?}", event.kind(), event);
            seen.borrow_mut().push(event.kind());
        });
    }

    let finger = |x, y| vec![TouchPoint::new(1, x, y)];

    println!("== Tap ==");
    engine.handle(&TouchFrame::start(0.0, finger(100.0, 100.0))).unwrap();
    engine.handle(&TouchFrame::end(80.0, vec![])).unwrap();

    println!("== Second tap ==");
    engine.handle(&TouchFrame::start(150.0, finger(100.0, 100.0))).unwrap();
    engine.handle(&TouchFrame::end(230.0, vec![])).unwrap();

    println!("== Hold ==");
    engine.handle(&TouchFrame::start(2000.0, finger(40.0, 300.0))).unwrap();
    let deadline = engine.next_deadline().expect("long-press armed");
    println!("  long-press due at {deadline}");
    let fired = engine.advance(deadline);
    engine.handle(&TouchFrame::end(2600.0, vec![])).unwrap();

    assert!(fired.has(GestureKind::LongPress));
    assert_eq!(*seen.borrow(), [
        GestureKind::Tap,
        GestureKind::DoubleTap,
        GestureKind::LongPress
    ]);
}
