/// Splits an argument string on spaces, treating a double-quoted region as
/// part of one token: the quotes are stripped and interior spaces kept.
/// Adjacent quoted and unquoted runs concatenate; an unterminated quoted
/// region is dropped.
pub fn split_args(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut quoted: Option<String> = None;
    for ch in line.chars() {
        match ch {
            ' ' => match quoted.as_mut() {
                Some(region) => region.push(' '),
                None => {
                    if !buffer.is_empty() {
                        tokens.push(std::mem::take(&mut buffer));
                    }
                }
            },
            '"' => match quoted.take() {
                Some(region) => buffer.push_str(&region),
                None => quoted = Some(String::new()),
            },
            _ => match quoted.as_mut() {
                Some(region) => region.push(ch),
                None => buffer.push(ch),
            },
        }
    }
    if !buffer.is_empty() {
        tokens.push(buffer);
    }
    tokens
}
