use serde::{Deserialize, Serialize};
use structrw_core::conformance::{RecordingWriter, VecStore};
use structrw_core::{
    AsDataReader, DataReader, DataSource, DataWriter, Value, ValueReader, ValueWriter,
};
use structrw_serde::{StructuralRW, TypedReader, TypedWriter, ValueInterface};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Employee {
    name: String,
    title: String,
    manager: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Team {
    lead: Employee,
    size: u32,
}

fn ada() -> Employee {
    Employee {
        name: "Ada".to_string(),
        title: "Engineer".to_string(),
        manager: Some("Grace".to_string()),
    }
}

#[test]
fn test_structural_adapter_copies_into_any_writer() {
    init_logging();
    let mut adapter = StructuralRW::from_content(&ada()).unwrap();
    let mut sink = RecordingWriter::<String>::new();

    adapter.on_read_all(&mut sink).unwrap();

    assert_eq!(
        sink.keys_seen(),
        vec!["manager".to_string(), "name".to_string(), "title".to_string()]
    );
    assert_eq!(sink.entries[1].1, Value::from("Ada"));
}

#[test]
fn test_structural_adapter_filled_from_store() {
    init_logging();
    let mut store = VecStore::new(vec![
        ("name".to_string(), Value::from("Linus")),
        ("title".to_string(), Value::from("Maintainer")),
        ("manager".to_string(), Value::Null),
    ]);
    let mut adapter = StructuralRW::<Employee>::new();

    adapter.on_write_all(&mut store).unwrap();

    assert_eq!(
        adapter.into_content().unwrap(),
        Employee {
            name: "Linus".to_string(),
            title: "Maintainer".to_string(),
            manager: None,
        }
    );
}

#[test]
fn test_nested_types_round_trip_through_value() {
    init_logging();
    let team = Team {
        lead: ada(),
        size: 4,
    };
    let interface = ValueInterface::<Team>::new();
    let mut slot = Value::Null;

    interface.write_value(&mut slot, Some(&team)).unwrap();
    let lead = slot.as_map().and_then(|m| m.get("lead")).unwrap();
    assert!(lead.is_map());

    assert_eq!(interface.read_value(&mut slot).unwrap(), Some(team));
}

#[test]
fn test_null_write_through_trait_object() {
    init_logging();
    let mut slot = Value::from("stale");
    let writer: &mut dyn ValueWriter = &mut slot;

    ValueInterface::<Employee>::new()
        .write_value(writer, None)
        .unwrap();
    assert!(slot.is_null());

    let reader: &mut dyn ValueReader = &mut slot;
    assert_eq!(ValueInterface::<Employee>::new().read_value(reader).unwrap(), None);
}

#[test]
fn test_typed_rows_behind_ordinal_keys() {
    init_logging();
    let mut roster = VecStore::<usize>::new(Vec::new());

    for (ordinal, employee) in [ada(), ada()].iter().enumerate() {
        roster.write_as(&ordinal, Some(employee)).unwrap();
    }

    let mut by_text = AsDataReader::<_, usize, String>::new(&mut roster);
    let first: Option<Employee> = by_text.read_as(&"0".to_string()).unwrap();
    assert_eq!(first, Some(ada()));
    assert_eq!(by_text.count(), 2);
}

#[test]
fn test_value_mut_then_typed_read() {
    init_logging();
    let mut store = VecStore::<String>::new(Vec::new());
    store
        .value_mut(&"who".to_string())
        .unwrap()
        .write_value(Value::Map(
            [
                ("name".to_string(), Value::from("Ken")),
                ("title".to_string(), Value::from("Author")),
                ("manager".to_string(), Value::Null),
            ]
            .into_iter()
            .collect(),
        ))
        .unwrap();

    let who: Employee = store.read_as(&"who".to_string()).unwrap().unwrap();
    assert_eq!(who.name, "Ken");
    assert_eq!(who.manager, None);
}
