use serde_json::Value;

use crate::command::error::CommandError;
use crate::models::ClassRegistry;
use crate::storage::FileStorage;

/// Rewrites the `Class.verb(args)` call syntax into plain `verb Class args`
/// lines. The dictionary form of update is the exception: it applies its
/// mutations right here and consumes the line.
pub struct MethodCallParser;

impl MethodCallParser {
    pub fn new() -> Self {
        MethodCallParser
    }

    /// Returns the line to dispatch, or None when the line was fully
    /// handled here (dictionary-form update).
    pub fn rewrite(
        &self,
        line: &str,
        registry: &ClassRegistry,
        storage: &mut FileStorage,
    ) -> Result<Option<String>, CommandError> {
        if let Some(class) = nullary_call(line, "all") {
            return Ok(Some(format!("all {class}")));
        }
        if let Some(class) = nullary_call(line, "count") {
            return Ok(Some(format!("count {class}")));
        }
        for verb in ["show", "destroy"] {
            if let Some((class, args)) = parenthesized_call(line, verb) {
                return Ok(Some(format!("{verb} {class} {args}")));
            }
        }
        if let Some((class, args)) = parenthesized_call(line, "update") {
            return self.rewrite_update(class, args, registry, storage);
        }
        Ok(Some(line.to_string()))
    }

    /// `Class.update(id, attr, value)` becomes a plain update line. When
    /// the text after the first comma parses as a JSON object, every pair
    /// is applied to the target entity using the literal value types as-is,
    /// all-or-nothing, followed by a single save.
    fn rewrite_update(
        &self,
        class: &str,
        args: &str,
        registry: &ClassRegistry,
        storage: &mut FileStorage,
    ) -> Result<Option<String>, CommandError> {
        let dict_src = match args.find(',') {
            Some(at) => &args[at + 1..],
            None => args,
        };
        let dict = match serde_json::from_str::<Value>(dict_src.trim()) {
            Ok(Value::Object(dict)) => dict,
            _ => {
                // triple form: the first two commas are argument separators
                let flat = strip_commas(args, 2);
                return Ok(Some(format!("update {class} {flat}")));
            }
        };
        let id = match args.find(',') {
            Some(at) => &args[..at],
            None => {
                let mut chars = args.chars();
                chars.next_back();
                chars.as_str()
            }
        };
        let id = id.trim_matches(|c| c == '"' || c == ' ');
        if !registry.contains(class) {
            return Err(CommandError::ClassUnknown);
        }
        let key = format!("{class}.{id}");
        let entity = storage
            .all_mut()
            .get_mut(&key)
            .ok_or(CommandError::InstanceNotFound)?;
        // stage every pair before committing anything
        let mut staged = entity.clone();
        for (attr, value) in dict {
            staged.set_attr(&attr, value)?;
        }
        staged.touch();
        *entity = staged;
        storage.save()?;
        Ok(None)
    }
}

impl Default for MethodCallParser {
    fn default() -> Self {
        MethodCallParser::new()
    }
}

/// Matches `<class>.<verb>()` at end of line. The character right before
/// the verb dot must be a lowercase ASCII letter; the class segment is the
/// text before the line's first dot.
fn nullary_call<'a>(line: &'a str, verb: &str) -> Option<&'a str> {
    let suffix = format!(".{verb}()");
    let head = line.strip_suffix(suffix.as_str())?;
    if !head.ends_with(|c: char| c.is_ascii_lowercase()) {
        return None;
    }
    Some(class_segment(line))
}

/// Matches `<class>.<verb>(<args>)` anchored to end of line, with the same
/// lowercase requirement before the verb dot. Args run from the line's
/// first opening paren to its final char.
fn parenthesized_call<'a>(line: &'a str, verb: &str) -> Option<(&'a str, &'a str)> {
    if !line.ends_with(')') {
        return None;
    }
    let needle = format!(".{verb}(");
    let hit = line
        .match_indices(needle.as_str())
        .any(|(at, _)| at > 0 && line.as_bytes()[at - 1].is_ascii_lowercase());
    if !hit {
        return None;
    }
    let open = line.find('(')?;
    let args = &line[open + 1..line.len() - 1];
    Some((class_segment(line), args))
}

fn class_segment(line: &str) -> &str {
    match line.split_once('.') {
        Some((class, _)) => class,
        None => line,
    }
}

fn strip_commas(args: &str, count: usize) -> String {
    let mut out = String::with_capacity(args.len());
    let mut left = count;
    for ch in args.chars() {
        if ch == ',' && left > 0 {
            left -= 1;
            continue;
        }
        out.push(ch);
    }
    out
}
