// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Opcode stream codec integration tests.
//!
//! Exercises the writer/cursor pair across every wire number type and
//! verifies that operand skipping stays byte-for-byte consistent with
//! operand decoding.

use vizcodec::core::{Color, Point2, VizError};
use vizcodec::stream::{
    read_values, skip_operands,skip_values, CanvasWriter, NumberType, Opcode, StreamCursor,
};

fn round_trip_segment(ty: NumberType, p1: Point2, p2: Point2) -> Vec<f64> {
    let mut w = CanvasWriter::new();
    w.set_number_type(ty);
    w.draw_line_segment(p1, p2);
    let data = w.finish();

    let mut cursor = StreamCursor::new(&data);
    let op = Opcode::from_u8(cursor.read_u8().unwrap(), 0).unwrap();
    assert_eq!(op, Opcode::DrawLineSegment);
    let mut values = Vec::new();
    read_values(&mut cursor, 4, &mut values).unwrap();
    assert!(cursor.is_at_end());
    values
}

#[test]
fn test_round_trip_double() {
    let v = round_trip_segment(
        NumberType::Double,
        Point2::new(1.5, -2.25),
        Point2::new(1e6, -0.125),
    );
    assert_eq!(v, vec![1.5, -2.25, 1e6, -0.125]);
}

#[test]
fn test_round_trip_float() {
    let v = round_trip_segment(
        NumberType::Float,
        Point2::new(0.5, -4.0),
        Point2::new(128.0, 3.25),
    );
    assert_eq!(v, vec![0.5, -4.0, 128.0, 3.25]);
}

#[test]
fn test_round_trip_signed_integers() {
    for ty in [
        NumberType::I8,
        NumberType::I16,
        NumberType::I32,
        NumberType::I64,
    ] {
        let v = round_trip_segment(ty, Point2::new(-100.0, 100.0), Point2::new(-1.0, 0.0));
        assert_eq!(v, vec![-100.0, 100.0, -1.0, 0.0], "type {ty:?}");
    }
}

#[test]
fn test_round_trip_unsigned_integers() {
    for ty in [
        NumberType::U8,
        NumberType::U16,
        NumberType::U32,
        NumberType::U64,
    ] {
        let v = round_trip_segment(ty, Point2::new(200.0, 0.0), Point2::new(255.0, 17.0));
        assert_eq!(v, vec![200.0, 0.0, 255.0, 17.0], "type {ty:?}");
    }
}

#[test]
fn test_unsigned_widening_is_zero_extended() {
    // 0xFF as U8 must widen to 255.0, never -1.0
    let v = round_trip_segment(NumberType::U8, Point2::new(255.0, 0.0), Point2::new(0.0, 0.0));
    assert_eq!(v[0], 255.0);
}

#[test]
fn test_zeroes_type_occupies_no_bytes() {
    let mut w = CanvasWriter::new();
    w.set_number_type(NumberType::Zeroes);
    w.draw_line_segment(Point2::new(9.0, 9.0), Point2::new(9.0, 9.0));
    let data = w.finish();
    // opcode tag + number-type tag, nothing else
    assert_eq!(data.len(), 2);

    let mut cursor = StreamCursor::new(&data);
    cursor.skip(1).unwrap();
    let mut values = Vec::new();
    read_values(&mut cursor, 4, &mut values).unwrap();
    assert_eq!(values, vec![0.0; 4]);
}

#[test]
fn test_skip_matches_read_positions() {
    let mut w = CanvasWriter::new();
    w.set_number_type(NumberType::I16);
    w.draw_polygon(&[
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(10.0, 10.0),
    ]);
    let data = w.finish();

    let mut reading = StreamCursor::new(&data);
    reading.skip(1).unwrap();
    let count = reading.read_u16().unwrap() as usize;
    let mut values = Vec::new();
    read_values(&mut reading, count * 2, &mut values).unwrap();

    let mut skipping = StreamCursor::new(&data);
    skipping.skip(1).unwrap();
    let count = skipping.read_u16().unwrap() as usize;
    skip_values(&mut skipping, count * 2).unwrap();

    assert_eq!(reading.position(), skipping.position());
    assert!(skipping.is_at_end());
}

#[test]
fn test_skip_operands_covers_every_opcode() {
    let mut w = CanvasWriter::new();
    w.set_transform(&vizcodec::core::Transform2::IDENTITY);
    w.translate(1.0, 2.0);
    w.rotate(0.5);
    w.scale(2.0, 2.0);
    w.reset_transform();
    w.set_color(Color::new(1, 2, 3));
    w.set_edge_color(Color::new(4, 5, 6));
    w.set_fill_color(Color::new(7, 8, 9));
    w.set_fill(true);
    w.set_z(3.0);
    w.draw_point(Point2::new(0.0, 0.0));
    w.draw_line(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
    w.draw_line_segment(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
    w.draw_line_strip(&[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
    w.draw_arrow(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), true);
    w.draw_box(0.0, 0.0, 1.0, 1.0);
    w.draw_ellipsoid(0.0, 0.0, 2.0, 1.0);
    w.draw_polygon(&[
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.0, 1.0),
    ]);
    w.draw_spline(
        &[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)],
        0.5,
    );
    w.draw_cubic_bezier(
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(2.0, 1.0),
        Point2::new(3.0, 0.0),
    );
    w.draw_string(Point2::new(0.0, 0.0), "hello");
    w.path_start(Point2::new(0.0, 0.0), true);
    w.path_line(Point2::new(1.0, 0.0));
    w.path_quad_bezier(Point2::new(1.0, 1.0), Point2::new(0.0, 1.0));
    w.path_cubic_bezier(
        Point2::new(-1.0, 1.0),
        Point2::new(-1.0, 0.0),
        Point2::new(0.0, 0.0),
    );
    w.default_viewport(vizcodec::core::Rect::new(0.0, 0.0, 10.0, 10.0));
    let data = w.finish();

    let mut cursor = StreamCursor::new(&data);
    while !cursor.is_at_end() {
        let pos = cursor.position() as u64;
        let op = Opcode::from_u8(cursor.read_u8().unwrap(), pos).unwrap();
        skip_operands(&mut cursor, op).unwrap();
    }
    assert!(cursor.is_at_end());
}

#[test]
fn test_unknown_opcode_tag_rejected() {
    let err = Opcode::from_u8(200, 7).unwrap_err();
    match err {
        VizError::UnknownOpcode { tag, cursor_pos } => {
            assert_eq!(tag, 200);
            assert_eq!(cursor_pos, 7);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_number_type_rejected() {
    let data = [Opcode::DrawPoint as u8, 0xEE];
    let mut cursor = StreamCursor::new(&data);
    cursor.skip(1).unwrap();
    let mut values = Vec::new();
    let err = read_values(&mut cursor, 2, &mut values).unwrap_err();
    assert!(matches!(err, VizError::UnknownNumberType { tag: 0xEE, .. }));
}

#[test]
fn test_truncated_stream_reports_short_buffer() {
    let mut w = CanvasWriter::new();
    w.draw_line_segment(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0));
    let data = w.finish();
    let truncated = &data[..data.len() - 3];

    let mut cursor = StreamCursor::new(truncated);
    cursor.skip(1).unwrap();
    let mut values = Vec::new();
    let err = read_values(&mut cursor, 4, &mut values).unwrap_err();
    assert!(matches!(err, VizError::BufferTooShort { .. }));
}

#[test]
fn test_color_operands_are_raw_bytes() {
    let mut w = CanvasWriter::new();
    w.set_color(Color::new(0x11, 0x22, 0x33));
    let data = w.finish();
    assert_eq!(data, vec![Opcode::SetColor as u8, 0x11, 0x22, 0x33]);
}
