//! Integration tests: facade drawing through a headless host.
//!
//! Exercises `Brush` → `Surface` → `Renderer` → `RecordingContext` and checks
//! the exact context calls each operation produces.

use brush_core::{
    BoundingRect, Brush, BrushError, CanvasOptions, CommandLog, Container, DrawCommand,
    HeadlessCanvas, HeadlessHost, InputEvent, ManualScheduler, TextAlign, TextStyle,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

type HeadlessBrush = Brush<HeadlessHost, ManualScheduler>;

fn brush_with(host: HeadlessHost) -> HeadlessBrush {
    let _ = env_logger::builder().is_test(true).try_init();
    Brush::new(host, Rc::new(ManualScheduler::new()))
}

fn ready_brush() -> (HeadlessBrush, CommandLog) {
    let brush = brush_with(HeadlessHost::new());
    brush
        .create_canvas(800, 600, &CanvasOptions::default())
        .unwrap();
    let log = brush.host().last_log().unwrap();
    (brush, log)
}

// ─── Canvas creation ────────────────────────────────────────────────────

#[test]
fn create_canvas_with_dimensions() {
    let (brush, _) = ready_brush();
    assert_eq!(brush.width(), Some(800));
    assert_eq!(brush.height(), Some(600));
}

#[test]
fn create_canvas_applies_id_class_and_container() {
    let brush = brush_with(HeadlessHost::new().with_container("#app"));
    let options = CanvasOptions::from_json(
        r##"{"container":"#app","id":"testCanvas","className":"canvas-class"}"##,
    )
    .unwrap();
    brush.create_canvas(800, 600, &options).unwrap();

    assert_eq!(
        brush.host().canvases(),
        vec![HeadlessCanvas {
            width: 800,
            height: 600,
            id: Some("testCanvas".into()),
            class_name: Some("canvas-class".into()),
            mounted_in: Some("#app".into()),
        }]
    );
}

#[test]
fn create_canvas_fails_for_unknown_container() {
    let brush = brush_with(HeadlessHost::new());
    let options = CanvasOptions::default()
        .with_container(Container::Selector("#nonexistent".into()));
    let err = brush.create_canvas(800, 600, &options).unwrap_err();

    assert_eq!(err, BrushError::ContainerNotFound("#nonexistent".into()));
    assert_eq!(
        brush.background("red"),
        Err(BrushError::UninitializedSurface {
            operation: "background"
        })
    );
}

#[test]
fn create_canvas_fails_without_context() {
    let brush = brush_with(HeadlessHost::new().without_context());
    let err = brush
        .create_canvas(800, 600, &CanvasOptions::default())
        .unwrap_err();
    assert_eq!(err, BrushError::ContextUnavailable);
    assert_eq!(brush.width(), None);
}

// ─── Guarded drawing ────────────────────────────────────────────────────

#[test]
fn drawing_before_canvas_fails_with_operation_name() {
    let brush = brush_with(HeadlessHost::new());
    assert_eq!(
        brush.rect(0.0, 0.0, 100.0, 100.0, false),
        Err(BrushError::UninitializedSurface { operation: "rect" })
    );
    assert_eq!(
        brush.fill("red"),
        Err(BrushError::UninitializedSurface { operation: "fill" })
    );
    assert_eq!(
        brush.stroke_weight(2.0),
        Err(BrushError::UninitializedSurface {
            operation: "stroke_weight"
        })
    );
    assert!(brush.host().last_log().is_none());
}

#[test]
fn red_rect_scenario() {
    let (brush, log) = ready_brush();
    brush.fill("#FF0000").unwrap();
    brush.rect(10.0, 10.0, 50.0, 50.0, false).unwrap();

    assert_eq!(
        log.commands(),
        vec![
            DrawCommand::SetFillStyle("#FF0000".into()),
            DrawCommand::BeginPath,
            DrawCommand::Rect {
                x: 10.0,
                y: 10.0,
                w: 50.0,
                h: 50.0
            },
            DrawCommand::Fill,
        ]
    );
}

#[test]
fn stroked_rect_scenario() {
    let (brush, log) = ready_brush();
    brush.stroke_weight(4.0).unwrap();
    brush.rect(0.0, 0.0, 100.0, 100.0, true).unwrap();

    assert!(log.commands().contains(&DrawCommand::Rect {
        x: 2.0,
        y: 2.0,
        w: 96.0,
        h: 96.0
    }));
    assert_eq!(log.count(&DrawCommand::Fill), 1);
    assert_eq!(log.count(&DrawCommand::Stroke), 1);
}

#[test]
fn multiple_rects_in_order() {
    let (brush, log) = ready_brush();
    brush.rect(0.0, 0.0, 100.0, 100.0, false).unwrap();
    brush.rect(200.0, 200.0, 50.0, 50.0, false).unwrap();

    let rects: Vec<DrawCommand> = log
        .commands()
        .into_iter()
        .filter(|c| matches!(c, DrawCommand::Rect { .. }))
        .collect();
    assert_eq!(
        rects,
        vec![
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                w: 100.0,
                h: 100.0
            },
            DrawCommand::Rect {
                x: 200.0,
                y: 200.0,
                w: 50.0,
                h: 50.0
            },
        ]
    );
}

#[test]
fn line_strokes_with_current_paint() {
    let (brush, log) = ready_brush();
    brush.stroke_color("#333").unwrap();
    brush.stroke_weight(2.5).unwrap();
    brush.line(0.0, 0.0, 40.0, 30.0).unwrap();

    assert_eq!(
        log.commands(),
        vec![
            DrawCommand::BeginPath,
            DrawCommand::MoveTo { x: 0.0, y: 0.0 },
            DrawCommand::LineTo { x: 40.0, y: 30.0 },
            DrawCommand::SetStrokeStyle("#333".into()),
            DrawCommand::SetLineWidth(2.5),
            DrawCommand::Stroke,
        ]
    );
}

#[test]
fn text_defaults_and_overrides() {
    let (brush, log) = ready_brush();
    brush.text("hello", 10.0, 20.0).unwrap();
    brush
        .text_styled(
            "world",
            10.0,
            40.0,
            &TextStyle {
                font_family: "Georgia".into(),
                align: TextAlign::Right,
                font_size: 12.0,
            },
        )
        .unwrap();

    let commands = log.commands();
    assert_eq!(commands[0], DrawCommand::SetFont("16px Arial".into()));
    assert_eq!(commands[1], DrawCommand::SetTextAlign(TextAlign::Left));
    assert!(commands.contains(&DrawCommand::SetFont("12px Georgia".into())));
    assert!(commands.contains(&DrawCommand::FillText {
        text: "world".into(),
        x: 10.0,
        y: 40.0
    }));
}

#[test]
fn background_overwrites_whole_canvas() {
    let (brush, log) = ready_brush();
    brush.background("#fff").unwrap();
    assert_eq!(
        log.commands(),
        vec![
            DrawCommand::SetFillStyle("#fff".into()),
            DrawCommand::FillRect {
                x: 0.0,
                y: 0.0,
                w: 800.0,
                h: 600.0
            },
        ]
    );
}

#[test]
fn new_canvas_resets_paint_state() {
    let (brush, _) = ready_brush();
    brush.stroke_weight(9.0).unwrap();
    brush
        .create_canvas(100, 100, &CanvasOptions::default())
        .unwrap();
    assert_eq!(brush.surface().paint().unwrap().stroke_width(), 1.0);
}

// ─── Events ─────────────────────────────────────────────────────────────

#[test]
fn events_require_canvas() {
    let brush = brush_with(HeadlessHost::new());
    assert_eq!(
        brush.on_mouse_click(|_, _| {}),
        Err(BrushError::UninitializedSurface {
            operation: "on_mouse_click"
        })
    );
}

#[test]
fn events_require_bounding_geometry() {
    let brush = brush_with(HeadlessHost::new().with_bounds(None));
    brush
        .create_canvas(800, 600, &CanvasOptions::default())
        .unwrap();
    assert_eq!(
        brush.on_mouse_move(|_, _| {}),
        Err(BrushError::BoundingGeometryUnavailable)
    );
}

#[test]
fn pointer_events_arrive_in_canvas_space() {
    let brush = brush_with(
        HeadlessHost::new().with_bounds(Some(BoundingRect::new(40.0, 30.0, 0.0, 0.0))),
    );
    brush
        .create_canvas(800, 600, &CanvasOptions::default())
        .unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    brush
        .on_mouse_click(move |x, y| sink.borrow_mut().push(("click", x, y)))
        .unwrap();
    let sink = Rc::clone(&seen);
    brush
        .on_mouse_release(move |x, y| sink.borrow_mut().push(("release", x, y)))
        .unwrap();

    brush.dispatch(&InputEvent::from_pointer_down(50.0, 50.0));
    brush.dispatch(&InputEvent::from_pointer_up(70.0, 90.0));

    assert_eq!(
        *seen.borrow(),
        vec![("click", 10.0, 20.0), ("release", 30.0, 60.0)]
    );
}

#[test]
fn new_canvas_drops_pointer_listeners_but_keeps_keys() {
    let (brush, _) = ready_brush();
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicks);
    brush
        .on_mouse_click(move |x, y| sink.borrow_mut().push(("old", x, y)))
        .unwrap();
    brush.on_key_press(|_| {});
    assert_eq!(brush.events().listener_count(), 2);

    brush
        .create_canvas(100, 100, &CanvasOptions::default())
        .unwrap();
    assert_eq!(brush.events().listener_count(), 1);
    brush.dispatch(&InputEvent::from_pointer_down(5.0, 5.0));
    assert!(clicks.borrow().is_empty());

    let sink = Rc::clone(&clicks);
    brush
        .on_mouse_click(move |x, y| sink.borrow_mut().push(("new", x, y)))
        .unwrap();
    brush.dispatch(&InputEvent::from_pointer_down(5.0, 5.0));
    assert_eq!(*clicks.borrow(), vec![("new", 5.0, 5.0)]);
}

#[test]
fn key_press_without_canvas() {
    let brush = brush_with(HeadlessHost::new());
    let keys = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&keys);
    brush.on_key_press(move |key| sink.borrow_mut().push_str(key));

    brush.dispatch(&InputEvent::from_key("a"));
    brush.dispatch(&InputEvent::from_key("b"));

    assert_eq!(keys.borrow().as_str(), "ab");
}
