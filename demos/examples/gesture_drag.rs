// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drags, flicks, and default-action suppression.
//!
//! A horizontal carousel wants to own sideways drags but let the page scroll
//! vertically. Subscribing with `SuppressDefault::Horizontal` asks the host to
//! prevent its default handling only while the drag points left or right.
//!
//! Run:
//! - `cargo run -p understory_examples --example gesture_drag`

use kurbo::Rect;
use understory_gesture::GestureEngine;
use understory_gesture::types::{GestureEvent, GestureKind, SuppressDefault, TouchFrame, TouchPoint};

fn drag(engine: &mut GestureEngine, t0: f64, from: (f64, f64), step: (f64, f64), n: u32) -> bool {
    let at = |i: u32| {
        let f = f64::from(i);
        vec![TouchPoint::new(1, from.0 + step.0 * f, from.1 + step.1 * f)]
    };
    engine.handle(&TouchFrame::start(t0, at(0))).unwrap();
    let mut suppressed = false;
    for i in 1..=n {
        let outcome = engine
            .handle(&TouchFrame::moved(t0 + 16.0 * f64::from(i), at(i)))
            .unwrap();
        suppressed |= outcome.suppress_default;
    }
    engine
        .handle(&TouchFrame::end(t0 + 16.0 * f64::from(n + 1), vec![]))
        .unwrap();
    suppressed
}

fn main() {
    let _ = env_logger::try_init();

    let mut engine = GestureEngine::new(Rect::new(0.0, 0.0, 360.0, 640.0));
    engine.subscribe_with(
        GestureKind::Drag,
        SuppressDefault::Horizontal,
        |event, history| {
            let GestureEvent::Drag(drag) = event else {
                return;
            };
            match drag.release {
                None => println!(
                    "  drag at ({:.0}, {:.0}) angle {:.0}° speed {:.2}",
                    drag.position.x, drag.position.y, drag.angle, drag.speed
                ),
                Some(release) => println!(
                    "  released at ({:.0}, {:.0}) heading {:?}, flick: {} ({} samples)",
                    release.end.x,
                    release.end.y,
                    release.final_direction,
                    release.flick,
                    history.first().map_or(0, |h| h.len()),
                ),
            }
        },
    );

    println!("== Slow swipe right ==");
    let sideways = drag(&mut engine, 0.0, (40.0, 300.0), (6.0, 0.0), 8);
    println!("== Fast swipe up ==");
    let upward = drag(&mut engine, 1000.0, (180.0, 600.0), (0.0, -30.0), 8);

    assert!(sideways, "horizontal drags suppress scrolling");
    assert!(!upward, "vertical drags leave scrolling alone");
}
