//! Parse context: which section, map, sub-map and list are active.

use std::fmt;

/// Coarse parser state derived from the [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Before any header.
    Root,
    /// Inside a `[section]`.
    InSection,
    /// Inside a `[map.name]` block.
    InMap,
}

/// Mutable context of a single parse run.
///
/// Names are kept as written in the input; they are normalized only when
/// events are emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub section: Option<String>,
    pub map: Option<String>,
    pub submap: Option<String>,
    pub list: Option<String>,
}

impl Context {
    /// Current state.
    pub fn state(&self) -> State {
        if self.map.is_some() {
            State::InMap
        } else if self.section.is_some() {
            State::InSection
        } else {
            State::Root
        }
    }

    /// Enter `[name]`: clears map, sub-map and list.
    pub fn enter_section(&mut self, name: &str) {
        self.section = Some(name.to_string());
        self.map = None;
        self.submap = None;
        self.list = None;
    }

    /// Enter `[map.name | subkey]`: clears section and list.
    pub fn enter_map(&mut self, name: &str, subkey: Option<&str>) {
        self.map = Some(name.to_string());
        self.submap = subkey.map(str::to_string);
        self.section = None;
        self.list = None;
    }

    pub fn start_list(&mut self, key: &str) {
        self.list = Some(key.to_string());
    }

    pub fn end_list(&mut self) {
        self.list = None;
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("section", &self.section),
            ("map", &self.map),
            ("submap", &self.submap),
            ("list", &self.list),
        ];
        let mut first = true;
        for (name, value) in fields {
            if let Some(value) = value {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{name} `{value}`")?;
                first = false;
            }
        }
        if first {
            f.write_str("top level")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut ctx = Context::default();
        assert_eq!(ctx.state(), State::Root);

        ctx.start_list("supporting");
        ctx.enter_section("server.http");
        assert_eq!(ctx.state(), State::InSection);
        assert_eq!(ctx.list, None);

        ctx.start_list("keys");
        ctx.enter_map("press", Some("ABC"));
        assert_eq!(ctx.state(), State::InMap);
        assert_eq!(ctx.section, None);
        assert_eq!(ctx.list, None);
        assert_eq!(ctx.submap.as_deref(), Some("ABC"));

        ctx.enter_section("other");
        assert_eq!(ctx.map, None);
        assert_eq!(ctx.submap, None);
    }

    #[test]
    fn test_display() {
        let mut ctx = Context::default();
        assert_eq!(ctx.to_string(), "top level");
        ctx.enter_map("press", Some("ABC"));
        assert_eq!(ctx.to_string(), "map `press`, submap `ABC`");
        ctx.enter_section("server");
        ctx.start_list("keys");
        assert_eq!(ctx.to_string(), "section `server`, list `keys`");
    }
}
