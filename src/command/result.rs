/// Successful command outcomes, rendered by the display layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// New entity stored; carries the assigned id.
    Created(String),
    /// Representation of one entity.
    Show(String),
    /// Entity removed. Prints nothing.
    Destroyed,
    /// Attribute(s) written. Prints nothing.
    Updated,
    /// Representations of the selected entities.
    Listed(Vec<String>),
    /// Number of entities of the requested class.
    Count(usize),
}
