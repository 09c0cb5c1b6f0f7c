use crate::net::LinkRecord;
use crate::proto::ProtocolKind;
use crate::sim::{MessageRecord, Scenario};

#[test]
fn scenario_accepts_tuple_and_object_records() {
    let raw = r#"
{
    "protocol": "ls",
    "topology": [[1, 2, 6], { "a": 2, "b": 3, "cost": 1 }],
    "changes": [[1, 2, -999]],
    "messages": [{ "from": 2, "to": 1, "text": "How are you?" }]
}
    "#;
    let s = Scenario::from_json_str(raw).unwrap();
    assert_eq!(s.protocol, Some(ProtocolKind::LinkState));
    assert_eq!(
        s.topology,
        vec![LinkRecord::new(1, 2, 6), LinkRecord::new(2, 3, 1)]
    );
    assert_eq!(s.changes, vec![LinkRecord::new(1, 2, -999)]);
    assert_eq!(s.messages, vec![MessageRecord::new(2, 1, "How are you?")]);
}

#[test]
fn scenario_defaults_optional_sections() {
    let s = Scenario::from_json_str(r#"{ "topology": [[1, 2, 1]] }"#).unwrap();
    assert_eq!(s.protocol, None);
    assert!(s.changes.is_empty());
    assert!(s.messages.is_empty());
}

#[test]
fn scenario_protocol_names() {
    for (name, kind) in [
        ("distance_vector", ProtocolKind::DistanceVector),
        ("dv", ProtocolKind::DistanceVector),
        ("link_state", ProtocolKind::LinkState),
    ] {
        let raw = format!(r#"{{ "protocol": "{name}", "topology": [] }}"#);
        assert_eq!(Scenario::from_json_str(&raw).unwrap().protocol, Some(kind));
    }
    assert!(Scenario::from_json_str(r#"{ "protocol": "rip", "topology": [] }"#).is_err());
}
