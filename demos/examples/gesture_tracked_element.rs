// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element-local coordinates and the attach/detach lifecycle.
//!
//! The engine reads the tracked element's bounding box once per session, so a
//! widget that moves between sessions still reports positions relative to its
//! own top-left corner. Detaching drops the session and silences callbacks.
//!
//! Run:
//! - `cargo run -p understory_examples --example gesture_tracked_element`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use understory_gesture::types::{GestureEvent, TouchFrame, TouchPoint};
use understory_gesture::{GestureEngine, GestureError, TrackedElement};

#[derive(Debug)]
struct Panel {
    frame: Rect,
}

impl TrackedElement for Panel {
    fn bounding_box(&self) -> Rect {
        self.frame
    }
}

fn tap_at(engine: &mut GestureEngine<Panel>, t: f64, x: f64, y: f64) {
    engine
        .handle(&TouchFrame::start(t, vec![TouchPoint::new(1, x, y)]))
        .unwrap();
    engine.handle(&TouchFrame::end(t + 50.0, vec![])).unwrap();
}

fn main() -> Result<(), GestureError> {
    let _ = env_logger::try_init();

    let mut engine = GestureEngine::new(Panel {
        frame: Rect::new(100.0, 100.0, 300.0, 200.0),
    });
    let taps = Rc::new(RefCell::new(Vec::new()));
    let t = taps.clone();
    engine.subscribe_named("tap", None, move |event, _| {
        if let GestureEvent::Tap(tap) = event {
            println!("  tap at local {:?}", tap.position);
            t.borrow_mut().push(tap.position);
        }
    })?;

    println!("== Tap inside the panel ==");
    tap_at(&mut engine, 0.0, 150.0, 120.0);

    println!("== Panel scrolled up by 40 px ==");
    let scrolled = engine.element().frame - Vec2::new(0.0, 40.0);
    engine.element_mut().frame = scrolled;
    tap_at(&mut engine, 1000.0, 150.0, 80.0);

    println!("== Detached ==");
    engine.detach();
    tap_at(&mut engine, 2000.0, 150.0, 80.0);
    engine.attach();

    if let Err(err) = engine.subscribe_named("swipe", None, |_, _| {}) {
        println!("  {err}");
    }
    if let Err(err) = engine.handle(&TouchFrame::moved(f64::NAN, vec![])) {
        println!("  {err}");
    }

    assert_eq!(*taps.borrow(), [Point::new(50.0, 20.0), Point::new(50.0, 20.0)]);
    Ok(())
}
