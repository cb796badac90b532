use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `{{ env.NAME }}` or `{{ env.NAME | default("text") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*(?P<key>[A-Za-z0-9_.]+)\s*(?:\|\s*default\("(?P<default>[^"]*)"\)\s*)?\}\}"#)
        .expect("placeholder pattern must be valid")
});

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    #[error("line {line}: environment variable `{name}` is not set")]
    Unset { line: usize, name: String },
    #[error("line {line}: `{key}` is not an `env.` variable")]
    Scope { line: usize, key: String },
}

/// Substitute environment placeholders in raw TOML text
///
/// Comment lines are copied untouched so commented-out settings never
/// require their variables to exist.
pub fn expand(raw: &str) -> Result<String, ExpandError> {
    let mut out = String::with_capacity(raw.len());

    for (index, line) in raw.split_inclusive('\n').enumerate() {
        if line.trim_start().starts_with('#') {
            out.push_str(line);
            continue;
        }

        let mut cursor = 0;
        for caps in PLACEHOLDER.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&line[cursor..whole.start()]);
            out.push_str(&substitute(&caps, index + 1)?);
            cursor = whole.end();
        }
        out.push_str(&line[cursor..]);
    }

    Ok(out)
}

fn substitute(caps: &Captures<'_>, line: usize) -> Result<String, ExpandError> {
    let key = caps.name("key").map_or("", |m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(ExpandError::Scope {
            line,
            key: key.to_owned(),
        });
    };

    match (std::env::var(name), caps.name("default")) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_owned()),
        (Err(_), None) => Err(ExpandError::Unset {
            line,
            name: name.to_owned(),
        }),
    }
}
