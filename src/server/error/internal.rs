use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A status column holds a value outside its enum.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unknown {kind} status '{value}' stored in database")]
    UnknownStatus {
        /// Which status enum failed to parse (car, reservation, payment...)
        kind: &'static str,
        /// The stored value
        value: String,
    },

    /// A row referenced by a foreign key disappeared mid-operation.
    #[error("{entity} {id} referenced by {from} is missing")]
    MissingRelation {
        entity: &'static str,
        id: i32,
        from: String,
    },
}
