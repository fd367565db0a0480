use serde::Serialize;

/// Successful service call together with the message shown to the user.
///
/// Failures are the error side of the `Result`; their `Display` is the matching message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation<T> {
    pub message: &'static str,
    pub value: T,
}

impl<T> Confirmation<T> {
    pub fn new(message: &'static str, value: T) -> Self {
        Self { message, value }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
