// src/exec/command.rs

//! Command template resolution.

use std::fmt;

/// A resolved program + argument list, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Join changed paths into the string substituted for the placeholder.
pub fn files_argument(changed: &[String]) -> String {
    changed.join(" ")
}

/// Substitute every `placeholder` occurrence in `template` with `files`,
/// then split on whitespace.
///
/// There is no quoting: a path containing spaces ends up as several
/// arguments. Returns `None` if nothing but whitespace is left.
pub fn resolve(template: &str, placeholder: &str, files: &str) -> Option<Invocation> {
    let substituted = if placeholder.is_empty() {
        template.to_string()
    } else {
        template.replace(placeholder, files)
    };

    let mut words = substituted.split_whitespace().map(str::to_string);
    let program = words.next()?;
    Some(Invocation {
        program,
        args: words.collect(),
    })
}
