use tetragon_protogen::Message;

/// Field carrying the process an event belongs to.
pub const PROCESS_FIELD: &str = "process";

/// Field carrying the parent of that process.
pub const PARENT_FIELD: &str = "parent";

/// Returns true if the event declares a field named exactly `field`.
#[must_use]
pub fn event_field_check(msg: &Message, field: &str) -> bool {
    msg.field(field).is_some()
}

/// Returns true if the event has a process field.
#[must_use]
pub fn is_process_event(msg: &Message) -> bool {
    event_field_check(msg, PROCESS_FIELD)
}

/// Returns true if the event has a parent field.
#[must_use]
pub fn is_parent_event(msg: &Message) -> bool {
    event_field_check(msg, PARENT_FIELD)
}
