use super::*;
use crate::draw::primitives::{fill_round_rect, line_path};
use crate::foundation::core::Rgba8;

fn canvas() -> Canvas {
    Canvas::new(100, 200).unwrap()
}

#[test]
fn records_ops_in_order_with_bounds() {
    let mut s = RecordingSurface::new(canvas());
    fill_round_rect(
        &mut s,
        Rect::new(10.0, 20.0, 50.0, 40.0),
        4.0,
        &Paint::solid(Rgba8::WHITE),
    );
    s.stroke(
        &line_path(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
        2.0,
        &Paint::solid(Rgba8::BLACK),
    );
    s.fill_text("hi", Point::new(5.0, 5.0), &TextStyle::new(10.0, Rgba8::WHITE));

    let list = s.finish().unwrap();
    assert_eq!(list.ops.len(), 3);
    let (bounds, paint) = list.fills().next().unwrap();
    assert!((bounds.x0 - 10.0).abs() < 1e-6 && (bounds.y1 - 40.0).abs() < 1e-6);
    assert_eq!(paint.primary_color(), Rgba8::WHITE);
    assert!(matches!(list.ops[1], DrawOp::Stroke { width, .. } if width == 2.0));
    assert_eq!(list.texts().collect::<Vec<_>>(), vec!["hi"]);
}

#[test]
fn unbalanced_layers_fail_to_finish() {
    let mut s = RecordingSurface::new(canvas());
    s.push_opacity(0.5);
    assert!(s.clone().finish().is_err());
    s.pop_layer();
    s.pop_layer();
    let list = s.finish().unwrap();
    assert_eq!(list.ops, vec![DrawOp::PushOpacity { opacity: 0.5 }, DrawOp::PopLayer]);
}

#[test]
fn json_is_tagged_by_op() {
    let mut s = RecordingSurface::new(canvas());
    s.fill_text("x", Point::ORIGIN, &TextStyle::new(12.0, Rgba8::WHITE).bold());
    let json: serde_json::Value =
        serde_json::from_str(&s.finish().unwrap().to_json().unwrap()).unwrap();
    assert_eq!(json["canvas"]["width"], 100);
    assert_eq!(json["ops"][0]["op"], "text");
    assert_eq!(json["ops"][0]["style"]["weight"], "bold");
    assert_eq!(json["ops"][0]["style"]["color"], "#ffffff");
}
