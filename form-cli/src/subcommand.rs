/// Outcome of matching the leading positional token against a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a, C> {
    Matched { command: C, args: &'a [String] },
    /// Nothing matched; `args` is the full positional sequence.
    Unmatched { args: &'a [String] },
}

/// Canonical subcommands and the spellings each one accepts.
#[derive(Clone, Copy, Debug)]
pub struct SubcommandTable<C: 'static> {
    entries: &'static [(C, &'static [&'static str])],
}

impl<C: 'static> SubcommandTable<C> {
    pub const fn new(entries: &'static [(C, &'static [&'static str])]) -> Self {
        Self { entries }
    }
}

impl<C: Copy + 'static> SubcommandTable<C> {
    pub fn lookup(&self, token: &str) -> Option<C> {
        self.entries
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| *alias == token))
            .map(|(command, _)| *command)
    }

    pub fn resolve<'a>(&self, positional: &'a [String]) -> Resolution<'a, C> {
        match positional.split_first() {
            Some((first, rest)) => match self.lookup(first) {
                Some(command) => Resolution::Matched { command, args: rest },
                None => Resolution::Unmatched { args: positional },
            },
            None => Resolution::Unmatched { args: positional },
        }
    }

    /// First alias claimed by more than one subcommand, if any.
    pub fn duplicate_alias(&self) -> Option<&'static str> {
        let mut seen: Vec<&'static str> = Vec::new();
        for alias in self.entries.iter().flat_map(|(_, aliases)| aliases.iter()) {
            if seen.contains(alias) {
                return Some(alias);
            }
            seen.push(alias);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Cmd {
        Get,
        Put,
    }

    const TABLE: SubcommandTable<Cmd> = SubcommandTable::new(&[
        (Cmd::Get, &["get", "fetch"]),
        (Cmd::Put, &["put"]),
    ]);

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_alias_resolves_with_remainder() {
        let positional = argv(&["fetch", "a", "b"]);
        assert_eq!(
            TABLE.resolve(&positional),
            Resolution::Matched { command: Cmd::Get, args: &positional[1..] }
        );
    }

    #[test]
    fn test_unmatched_keeps_everything() {
        let positional = argv(&["example.com", "put"]);
        assert_eq!(TABLE.resolve(&positional), Resolution::Unmatched { args: &positional[..] });

        let empty: Vec<String> = Vec::new();
        assert_eq!(TABLE.resolve(&empty), Resolution::Unmatched { args: &empty[..] });
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let positional = argv(&["GET"]);
        assert!(matches!(TABLE.resolve(&positional), Resolution::Unmatched { .. }));
    }

    #[test]
    fn test_duplicate_alias_detection() {
        assert_eq!(TABLE.duplicate_alias(), None);

        const CLASH: SubcommandTable<Cmd> = SubcommandTable::new(&[
            (Cmd::Get, &["get"]),
            (Cmd::Put, &["put", "get"]),
        ]);
        assert_eq!(CLASH.duplicate_alias(), Some("get"));
    }
}
