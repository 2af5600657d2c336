// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotate, pinch-spread, and pan from one two-contact session.
//!
//! The two contacts circle their midpoint while moving apart, so every move
//! frame yields a pan, a rotate, and a pinch-spread. The rotation keeps
//! counting past a full turn.
//!
//! Run:
//! - `cargo run -p understory_examples --example gesture_two_finger`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use understory_gesture::GestureEngine;
use understory_gesture::types::{GestureEvent, GestureKind, TouchFrame, TouchPoint};

fn main() {
    let _ = env_logger::try_init();

    let mut engine = GestureEngine::new(Rect::new(0.0, 0.0, 400.0, 400.0));
    let rotation = Rc::new(Cell::new(0.0));
    let scale = Rc::new(Cell::new(1.0));

    let r = rotation.clone();
    engine.subscribe(GestureKind::Rotate, move |event, _| {
        if let GestureEvent::Rotate(rotate) = event {
            r.set(rotate.rotation);
        }
    });
    let s = scale.clone();
    engine.subscribe(GestureKind::PinchSpread, move |event, _| {
        if let GestureEvent::PinchSpread(pinch) = event {
            s.set(pinch.scale);
            if pinch.end {
                println!("  pinch released at scale {:.2}", pinch.scale);
            }
        }
    });
    engine.subscribe(GestureKind::Pan, |event, _| {
        if let GestureEvent::Pan(pan) = event
            && let Some(release) = pan.release
        {
            println!("  pan released at ({:.0}, {:.0})", release.end.x, release.end.y);
        }
    });

    let center = Point::new(200.0, 200.0);
    let contacts = |deg: f64, radius: f64| {
        let r = Vec2::from_angle(deg.to_radians()) * radius;
        let (a, b) = (center - r, center + r);
        vec![TouchPoint::new(1, a.x, a.y), TouchPoint::new(2, b.x, b.y)]
    };

    engine.handle(&TouchFrame::start(0.0, contacts(0.0, 40.0))).unwrap();
    for i in 1..=48 {
        let f = f64::from(i);
        let outcome = engine
            .handle(&TouchFrame::moved(16.0 * f, contacts(10.0 * f, 40.0 + f)))
            .unwrap();
        if i % 12 == 0 {
            println!(
                "  frame {i}: rotation {:.0}°, scale {:.2}, recognized {:?}",
                rotation.get(),
                scale.get(),
                outcome.recognized
            );
        }
    }
    engine.handle(&TouchFrame::end(800.0, vec![])).unwrap();

    assert!((rotation.get() - 480.0).abs() < 1e-6);
    assert!((scale.get() - 2.2).abs() < 1e-9);
}
