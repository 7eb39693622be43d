//! Environment/context variables for contextual resolution.
//!
//! Configs can defer decisions to variables like `$SHOT_LOOKS`: a color
//! space transform may name `$SHOT_LOOKS` as its destination, and the
//! variable's value decides which named transform or color space is meant
//! at resolution time.
//!
//! # Example
//!
//! ```
//! use amf_config::Context;
//!
//! let mut ctx = Context::new();
//! ctx.set("SHOT_LOOKS", "ACES2065-1");
//!
//! assert_eq!(ctx.resolve("$SHOT_LOOKS"), "ACES2065-1");
//! ```

use std::collections::BTreeMap;

/// Context for variable substitution.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Declared variables with their default values.
    vars: BTreeMap<String, String>,
}

impl Context {
    /// Creates a new empty context.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a context variable (or overwrites its value).
    #[inline]
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Gets a context variable value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Checks if a variable is declared.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Resolves all `$VAR` and `${VAR}` references in a string.
    ///
    /// Unknown variables are left as-is (not substituted).
    pub fn resolve(&self, input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            if chars.peek() == Some(&'{') {
                chars.next();
                let var_name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                match self.get(&var_name) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("${");
                        result.push_str(&var_name);
                        result.push('}');
                    }
                }
            } else {
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        var_name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if var_name.is_empty() {
                    result.push('$');
                } else if let Some(value) = self.get(&var_name) {
                    result.push_str(value);
                } else {
                    result.push('$');
                    result.push_str(&var_name);
                }
            }
        }

        result
    }

    /// Returns all declared variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
