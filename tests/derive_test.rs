use debug_here::{render, render_lossy, Error, Inspect};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

fn rendered<T: Inspect + ?Sized>(value: &T) -> String {
    render(&value.inspect()).unwrap()
}

#[derive(Inspect)]
struct Wrapper<T> {
    inner: T,
}

#[derive(Inspect)]
struct Meters(f64);

#[derive(Inspect)]
struct Marker;

#[derive(Inspect)]
struct Keyword {
    r#type: &'static str,
}

#[derive(Inspect)]
enum Event {
    Started,
    Moved(i32, i32),
    Renamed { from: String, to: String },
}

#[derive(Inspect)]
struct Endpoint {
    #[inspect(debug)]
    addr: Ipv4Addr,
    port: u16,
}

#[derive(Inspect)]
struct Inventory {
    owner: Option<String>,
    counts: BTreeMap<&'static str, u32>,
    tags: Vec<Marker>,
}

#[derive(Inspect)]
struct Guarded {
    state: Mutex<u8>,
}

#[test]
fn test_generic_struct_uses_concrete_type_name() {
    assert_eq!(rendered(&Wrapper { inner: 7u8 }), "Wrapper<u8>{inner: 7}");
    assert_eq!(
        rendered(&Wrapper { inner: vec!['a'] }),
        "Wrapper<Vec<char>>{inner: Vec<char>{'a'}}"
    );
}

#[test]
fn test_tuple_and_unit_structs() {
    assert_eq!(rendered(&Meters(2.5)), "Meters(2.5)");
    assert_eq!(rendered(&Marker), "Marker");
}

#[test]
fn test_raw_identifier_field_is_unescaped() {
    assert_eq!(rendered(&Keyword { r#type: "fn" }), r#"Keyword{type: "fn"}"#);
}

#[test]
fn test_enum_variants() {
    assert_eq!(rendered(&Event::Started), "Event::Started");
    assert_eq!(rendered(&Event::Moved(1, -2)), "Event::Moved(1, -2)");
    assert_eq!(
        rendered(&Event::Renamed {
            from: "a".into(),
            to: "b".into(),
        }),
        r#"Event::Renamed{from: "a", to: "b"}"#
    );
}

#[test]
fn test_debug_attribute_renders_through_debug() {
    let endpoint = Endpoint {
        addr: Ipv4Addr::LOCALHOST,
        port: 8080,
    };
    assert_eq!(rendered(&endpoint), "Endpoint{addr: 127.0.0.1, port: 8080}");
}

#[test]
fn test_nested_containers() {
    let inventory = Inventory {
        owner: None,
        counts: BTreeMap::from([("bolts", 3), ("nuts", 12)]),
        tags: vec![Marker, Marker],
    };
    assert_eq!(
        rendered(&inventory),
        r#"Inventory{owner: None, counts: BTreeMap<&str, u32>{"bolts": 3, "nuts": 12}, tags: Vec<Marker>{Marker, Marker}}"#
    );
}

#[test]
fn test_locked_field_fails_strict_rendering() {
    let guarded = Guarded {
        state: Mutex::new(1),
    };
    let _lock = guarded.state.lock().unwrap();

    let shape = guarded.inspect();
    assert_eq!(
        render(&shape).unwrap_err(),
        Error::format_failure("Mutex<u8>", "locked")
    );
    assert_eq!(render_lossy(&shape), "Guarded{state: Mutex<u8>{<locked>}}");
}
