use std::io::{self, Write};
use std::path::Path;

use super::display::{display_error, display_result};
use crate::command::CommandEngine;
use crate::storage::StorageError;

/// Interactive read-dispatch-print loop over the command engine.
pub struct Console {
    engine: CommandEngine,
    prompt: String,
}

impl Console {
    pub fn new(data_file: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Console {
            engine: CommandEngine::new(data_file)?,
            prompt: "(hbnb) ".to_string(),
        })
    }

    /// Runs until quit or end of input. Command errors print inline and
    /// never end the loop.
    pub fn run(&mut self) {
        loop {
            print!("{}", self.prompt);
            io::stdout().flush().unwrap();

            let mut input = String::new();
            match io::stdin().read_line(&mut input) {
                Ok(0) => break, // EOF
                Ok(_) => {}
                Err(_) => {
                    println!("Error reading input");
                    continue;
                }
            }

            let line = input.trim();
            if line.is_empty() {
                continue;
            }

            match line.split(' ').next().unwrap_or("") {
                "quit" => break,
                "help" => self.show_help(),
                _ => match self.engine.execute(line) {
                    Ok(result) => display_result(&result),
                    Err(error) => display_error(&error),
                },
            }
        }
    }

    fn show_help(&self) {
        println!("\nAvailable commands:");
        println!("  create <class>                        - create an object and print its id");
        println!("  show <class> <id>                     - print one object");
        println!("  destroy <class> <id>                  - remove an object");
        println!("  update <class> <id> <attr> \"<value>\"  - set one attribute");
        println!("  all [<class>]                         - list objects, optionally by class");
        println!("  count <class>                         - count objects of a class");
        println!();
        println!("Method-call syntax is also accepted:");
        println!("  <class>.all()  <class>.count()  <class>.show(<id>)");
        println!("  <class>.destroy(<id>)  <class>.update(<id>, <attr>, <value>)");
        println!("  <class>.update(<id>, {{<attr>: <value>, ...}})");
        println!();
        println!("  help - show this help message");
        println!("  quit - exit the console");
    }
}
