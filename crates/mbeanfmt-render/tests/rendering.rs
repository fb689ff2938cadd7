//! Rendering integration tests
//!
//! Tests for: default, void and date renderers, composite, tabular and
//! array layouts, nested re-resolution, sink failures

use chrono::{DateTime, FixedOffset, TimeZone};
use mbeanfmt_render::{Registry, RenderContext, RenderError, RenderResult, Renderer, TypedRenderer};
use mbeanfmt_types::{
    class_names, CompositeData, CompositeType, JmxArray, JmxValue, OpenType, SimpleType,
    TabularData, TabularType,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fmt;
use std::io;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn render(value: &JmxValue) -> String {
    TypedRenderer::standard()
        .render_to_string(value, &RenderContext::new())
        .unwrap()
}

fn render_with(value: &JmxValue, ctx: &RenderContext) -> RenderResult<String> {
    TypedRenderer::standard().render_to_string(value, ctx)
}

fn date(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> JmxValue {
    let date: DateTime<FixedOffset> = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .unwrap();
    JmxValue::Date(date)
}

fn point_type() -> CompositeType {
    CompositeType::builder("Point")
        .item("x", OpenType::simple(SimpleType::Integer))
        .item("y", OpenType::simple(SimpleType::Integer))
        .build()
        .unwrap()
}

fn point(x: i32, y: i32) -> CompositeData {
    CompositeData::new(
        point_type(),
        [("x", JmxValue::Integer(x)), ("y", JmxValue::Integer(y))],
    )
    .unwrap()
}

fn integers(values: &[i32]) -> JmxValue {
    JmxValue::Array(JmxArray::reference(
        "java.lang.Integer",
        values.iter().copied().map(JmxValue::Integer).collect(),
    ))
}

/// Sink that refuses writes past a byte limit
struct LimitedSink {
    written: String,
    limit: usize,
}

impl fmt::Write for LimitedSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.written.len() + s.len() > self.limit {
            return Err(fmt::Error);
        }
        self.written.push_str(s);
        Ok(())
    }
}

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Default and Void
// ============================================================================

#[rstest]
#[case(JmxValue::Null, "null")]
#[case(JmxValue::string(""), "<empty string>")]
#[case(JmxValue::string("a \"quoted\"\tvalue"), "a \"quoted\"\tvalue")]
#[case(JmxValue::Integer(42), "42")]
#[case(JmxValue::Long(-9), "-9")]
#[case(JmxValue::Double(2.0), "2.0")]
#[case(JmxValue::Boolean(true), "true")]
#[case(JmxValue::Character('x'), "x")]
#[case(JmxValue::object_name("java.lang:type=Memory"), "java.lang:type=Memory")]
fn test_default_renderer(#[case] value: JmxValue, #[case] expected: &str) {
    assert_eq!(render(&value), expected);
}

#[test]
fn test_void_renders_nothing() {
    assert_eq!(render(&JmxValue::Void), "");
}

#[test]
fn test_primitive_array_uses_default_renderer() {
    let longs = JmxArray::primitive(SimpleType::Long, vec![JmxValue::Long(1), JmxValue::Long(2)])
        .unwrap();
    assert_eq!(render(&JmxValue::Array(longs)), "[1, 2]");
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn test_date_with_configured_format() {
    let ctx = RenderContext::new().with_date_format("yyyy-MM-dd");
    assert_eq!(render_with(&date(2021, 3, 5, 0, 0, 0), &ctx).unwrap(), "2021-03-05");
}

#[rstest]
#[case(RenderContext::new())]
#[case(RenderContext::new().with_date_format(""))]
#[case(RenderContext::new().with_date_format("   "))]
fn test_date_falls_back_to_default_pattern(#[case] ctx: RenderContext) {
    assert_eq!(
        render_with(&date(2021, 3, 5, 10, 20, 30), &ctx).unwrap(),
        "2021-03-05T10:20:30"
    );
}

#[test]
fn test_date_with_invalid_format() {
    let ctx = RenderContext::new().with_date_format("yyyy-bb");
    let err = render_with(&date(2021, 3, 5, 0, 0, 0), &ctx).unwrap_err();
    assert!(matches!(err, RenderError::InvalidDatePattern { .. }));
}

#[test]
fn test_date_renderer_on_null() {
    let mut out = String::new();
    Renderer::Date
        .render(&Registry::standard(), &JmxValue::Null, &RenderContext::new(), &mut out)
        .unwrap();
    assert_eq!(out, "null");
}

// ============================================================================
// Open data layouts
// ============================================================================

#[test]
fn test_array_layout() {
    assert_eq!(render(&integers(&[10, 20])), "Array[\nindex:0 = 10\nindex:1 = 20\n]\n");
}

#[test]
fn test_empty_array_layout() {
    assert_eq!(render(&integers(&[])), "Array[\n]\n");
}

#[test]
fn test_composite_layout() {
    assert_eq!(
        render(&JmxValue::Composite(point(1, 2))),
        "CompositeData:Point{\n1\n2\n}\n"
    );
}

#[test]
fn test_tabular_layout_numbers_rows() {
    let tabular_type = TabularType::new("Points", "all points", point_type(), ["x"]).unwrap();
    let data = TabularData::with_rows(tabular_type, [point(1, 2), point(3, 4)]).unwrap();

    assert_eq!(
        render(&JmxValue::Tabular(data)),
        "TabularData: of TabularType(name=Points,rowType=Point,indexNames=(x)){\n\
         [0]: CompositeData:Point{\n1\n2\n}\n\n\
         [1]: CompositeData:Point{\n3\n4\n}\n\n\
         }\n"
    );
}

#[test]
fn test_null_elements_render_as_null() {
    let array = JmxValue::Array(JmxArray::reference(
        "java.lang.Object",
        vec![JmxValue::Null, JmxValue::Integer(1)],
    ));
    assert_eq!(render(&array), "Array[\nindex:0 = null\nindex:1 = 1\n]\n");

    let composite = CompositeData::new(
        point_type(),
        [("x", JmxValue::Null), ("y", JmxValue::Integer(2))],
    )
    .unwrap();
    assert_eq!(
        render(&JmxValue::Composite(composite)),
        "CompositeData:Point{\nnull\n2\n}\n"
    );
}

// ============================================================================
// Nested re-resolution
// ============================================================================

#[test]
fn test_dates_inside_composite_use_date_renderer() {
    let event_type = CompositeType::builder("Event")
        .item("name", OpenType::simple(SimpleType::String))
        .item("times", OpenType::array_of(OpenType::simple(SimpleType::Date)))
        .item("result", OpenType::simple(SimpleType::Void))
        .build()
        .unwrap();
    let event = CompositeData::new(
        event_type,
        [
            ("name", JmxValue::string("boot")),
            (
                "times",
                JmxValue::Array(JmxArray::reference(
                    class_names::DATE,
                    vec![date(2021, 3, 5, 10, 20, 30), JmxValue::Null],
                )),
            ),
            ("result", JmxValue::Void),
        ],
    )
    .unwrap();

    let ctx = RenderContext::new().with_date_format("yyyy-MM-dd");
    assert_eq!(
        render_with(&JmxValue::Composite(event), &ctx).unwrap(),
        "CompositeData:Event{\nboot\nArray[\nindex:0 = 2021-03-05\nindex:1 = null\n]\n\n\n}\n"
    );
}

#[test]
fn test_heterogeneous_array() {
    let array = JmxValue::Array(JmxArray::reference(
        class_names::OBJECT,
        vec![
            JmxValue::string(""),
            date(2020, 1, 2, 3, 4, 5),
            JmxValue::Composite(point(5, 6)),
            integers(&[7]),
        ],
    ));
    assert_eq!(
        render(&array),
        "Array[\n\
         index:0 = <empty string>\n\
         index:1 = 2020-01-02T03:04:05\n\
         index:2 = CompositeData:Point{\n5\n6\n}\n\n\
         index:3 = Array[\nindex:0 = 7\n]\n\n\
         ]\n"
    );
}

#[test]
fn test_nested_elements_use_injected_registry() {
    let mut registry = Registry::standard();
    registry.register("java.lang.Integer", Renderer::Void);
    let renderer = TypedRenderer::new(Arc::new(registry));

    let text = renderer
        .render_to_string(&JmxValue::Composite(point(1, 2)), &RenderContext::new())
        .unwrap();
    assert_eq!(text, "CompositeData:Point{\n\n\n}\n");
}

#[test]
fn test_tabular_rows_are_re_resolved() {
    let mut registry = Registry::standard();
    registry.register(class_names::COMPOSITE_DATA_SUPPORT, Renderer::Default);
    let renderer = TypedRenderer::new(Arc::new(registry));

    let tabular_type = TabularType::new("Points", "", point_type(), ["x"]).unwrap();
    let data = TabularData::with_rows(tabular_type, [point(1, 2)]).unwrap();
    let text = renderer
        .render_to_string(&JmxValue::Tabular(data), &RenderContext::new())
        .unwrap();
    assert_eq!(
        text,
        "TabularData: of TabularType(name=Points,rowType=Point,indexNames=(x)){\n\
         [0]: CompositeData(Point){x=1, y=2}\n\
         }\n"
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_sink_failure_keeps_partial_output() {
    let mut sink = LimitedSink {
        written: String::new(),
        limit: 10,
    };
    let err = TypedRenderer::standard()
        .render_value(&integers(&[10, 20]), &RenderContext::new(), &mut sink)
        .unwrap_err();
    assert!(matches!(err, RenderError::Sink(_)));
    assert_eq!(sink.written, "Array[\n");
}

#[test]
fn test_io_failure_is_propagated() {
    let err = TypedRenderer::standard()
        .render_io(&integers(&[1]), &RenderContext::new(), BrokenPipe)
        .unwrap_err();
    match err {
        RenderError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_render_io_writes_bytes() {
    let mut out = Vec::new();
    TypedRenderer::standard()
        .render_io(&JmxValue::Composite(point(1, 2)), &RenderContext::new(), &mut out)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "CompositeData:Point{\n1\n2\n}\n");
}

#[test]
fn test_explicit_renderer_on_wrong_shape() {
    let mut out = String::new();
    let err = Renderer::Tabular
        .render(
            &Registry::standard(),
            &JmxValue::Composite(point(1, 2)),
            &RenderContext::new(),
            &mut out,
        )
        .unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(out, "");
}
