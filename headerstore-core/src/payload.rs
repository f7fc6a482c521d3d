/// One value slot of a [`ValueList`](crate::ValueList).
///
/// A payload is either a string owned by the slot, or a handle supplied by the caller. The table
/// never looks inside either: handles are moved in, cloned by value when the table is cloned, and
/// dropped (or handed back) when their header is removed. Whatever the handle refers to is the
/// caller's business; with `Arc` handles, cloning a table bumps every referent's count.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Payload<H> {
    Str(String),
    Handle(H),
}

impl<H> Payload<H> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::Str(value) => Some(value),
            Payload::Handle(_) => None,
        }
    }

    pub fn as_handle(&self) -> Option<&H> {
        match self {
            Payload::Str(_) => None,
            Payload::Handle(handle) => Some(handle),
        }
    }
}

impl<H> From<String> for Payload<H> {
    fn from(value: String) -> Self {
        Payload::Str(value)
    }
}

impl<H> From<&str> for Payload<H> {
    fn from(value: &str) -> Self {
        Payload::Str(value.to_string())
    }
}
