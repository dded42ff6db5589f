use crate::command::{CommandError, CommandResult};

/// Renders a command outcome. Verbs that mutate silently (destroy, update)
/// print nothing.
pub fn display_result(result: &CommandResult) {
    match result {
        CommandResult::Created(id) => println!("{id}"),
        CommandResult::Show(repr) => println!("{repr}"),
        CommandResult::Listed(reprs) => println!("[{}]", reprs.join(", ")),
        CommandResult::Count(count) => println!("{count}"),
        CommandResult::Destroyed | CommandResult::Updated => {}
    }
}

/// Errors are part of the conversation: they go to stdout and the loop
/// keeps reading.
pub fn display_error(error: &CommandError) {
    println!("{error}");
}
