use crate::config::SchemaContract;
use std::collections::HashSet;
use tetragon_protogen::{File, Message};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// EventsError
///
/// The schema does not have the shape the event locator relies on.
///

#[remain::sorted]
#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum EventsError {
    #[error("unable to find {container} message")]
    ContainerNotFound { container: String },

    #[error("unable to find {container}.{union}")]
    UnionNotFound { container: String, union: String },
}

/// All messages in `file` that are events, in file declaration order.
pub fn get_events(file: &File) -> Result<Vec<&Message>, EventsError> {
    get_events_with(file, &SchemaContract::TETRAGON)
}

/// Like [`get_events`], against an explicit container/union contract.
///
/// A message is an event when its declared name equals the Go wrapper name
/// of some member of the container's union, minus the member prefix. Members
/// that resolve to no message are ignored.
pub fn get_events_with<'a>(
    file: &'a File,
    contract: &SchemaContract,
) -> Result<Vec<&'a Message>, EventsError> {
    let container = file
        .messages
        .iter()
        .find(|msg| msg.go_ident.go_name == contract.container)
        .ok_or_else(|| EventsError::ContainerNotFound {
            container: contract.container.to_string(),
        })?;

    let union = container
        .oneofs
        .iter()
        .find(|oneof| oneof.name == contract.union)
        .ok_or_else(|| EventsError::UnionNotFound {
            container: contract.container.to_string(),
            union: contract.union.to_string(),
        })?;

    let valid_names: HashSet<&str> = union
        .fields
        .iter()
        .map(|field| {
            let go_name = field.go_ident.go_name.as_str();
            go_name
                .strip_prefix(&*contract.member_prefix)
                .unwrap_or(go_name)
        })
        .collect();

    // file order, not union order
    let events: Vec<&Message> = file
        .messages
        .iter()
        .filter(|msg| valid_names.contains(msg.name.as_str()))
        .collect();

    debug!(
        file = %file.proto_path,
        members = union.fields.len(),
        events = events.len(),
        "located events"
    );

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{container, file, message};

    fn names<'a>(events: &[&'a Message]) -> Vec<&'a str> {
        events.iter().map(|msg| msg.name.as_str()).collect()
    }

    #[test]
    fn events_follow_file_order_not_union_order() {
        let file = file(vec![
            message("B", &[]),
            message("A", &[]),
            message("C", &[]),
            container("GetEventsResponse", "event", &["A", "B"]),
        ]);

        let events = get_events(&file).unwrap();

        assert_eq!(names(&events), ["B", "A"]);
    }

    #[test]
    fn every_resolved_member_is_returned_once() {
        let file = file(vec![
            container(
                "GetEventsResponse",
                "event",
                &["ProcessExec", "ProcessExit", "ProcessKprobe"],
            ),
            message("ProcessExec", &["process", "parent"]),
            message("ProcessExit", &["process", "parent"]),
            message("ProcessKprobe", &["process"]),
            message("Process", &["pid"]),
        ]);

        let events = get_events(&file).unwrap();

        assert_eq!(
            names(&events),
            ["ProcessExec", "ProcessExit", "ProcessKprobe"]
        );
    }

    #[test]
    fn duplicate_members_collapse() {
        let mut file = file(vec![
            container("GetEventsResponse", "event", &["ProcessExec"]),
            message("ProcessExec", &[]),
        ]);
        let oneof = &mut file.messages[0].oneofs[0];
        let dup = oneof.fields[0].clone();
        oneof.fields.push(dup);

        let events = get_events(&file).unwrap();

        assert_eq!(names(&events), ["ProcessExec"]);
    }

    #[test]
    fn unresolved_members_are_dropped() {
        let file = file(vec![
            container("GetEventsResponse", "event", &["ProcessExec", "Missing"]),
            message("ProcessExec", &[]),
        ]);

        let events = get_events(&file).unwrap();

        assert_eq!(names(&events), ["ProcessExec"]);
    }

    #[test]
    fn member_wrapper_with_reserved_name_does_not_match() {
        let file = file(vec![
            container("GetEventsResponse", "event", &["String", "ProcessExec"]),
            message("String", &[]),
            message("ProcessExec", &[]),
        ]);

        let union = &file.messages[0].oneofs[0];
        assert_eq!(union.fields[0].go_ident.go_name, "GetEventsResponse_String_");

        let events = get_events(&file).unwrap();

        assert_eq!(names(&events), ["ProcessExec"]);
    }

    #[test]
    fn reserved_member_alone_yields_no_events() {
        let file = file(vec![
            container("GetEventsResponse", "event", &["String"]),
            message("String", &[]),
        ]);

        let events = get_events(&file).unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn empty_union_yields_no_events() {
        let file = file(vec![
            container("GetEventsResponse", "event", &[]),
            message("ProcessExec", &[]),
        ]);

        assert!(get_events(&file).unwrap().is_empty());
    }

    #[test]
    fn missing_container_is_an_error() {
        let file = file(vec![message("ProcessExec", &[])]);

        let err = get_events(&file).unwrap_err();

        assert_eq!(
            err,
            EventsError::ContainerNotFound {
                container: "GetEventsResponse".to_string()
            }
        );
        assert_eq!(err.to_string(), "unable to find GetEventsResponse message");
    }

    #[test]
    fn missing_union_is_an_error() {
        let file = file(vec![
            container("GetEventsResponse", "payload", &["ProcessExec"]),
            message("ProcessExec", &[]),
        ]);

        let err = get_events(&file).unwrap_err();

        assert!(matches!(err, EventsError::UnionNotFound { .. }));
        assert_eq!(err.to_string(), "unable to find GetEventsResponse.event");
    }

    #[test]
    fn custom_contract() {
        let file = file(vec![
            message("Ping", &[]),
            container("StreamResponse", "payload", &["Ping"]),
        ]);
        let contract = SchemaContract::new("StreamResponse", "payload");

        let events = get_events_with(&file, &contract).unwrap();

        assert_eq!(names(&events), ["Ping"]);
        assert!(get_events(&file).is_err());
    }
}
