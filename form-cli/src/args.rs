//! Flag tokenizer.
//!
//! Turns a raw argument vector into canonical flag values plus the ordered
//! positional arguments, driven by a static [`FlagSchema`].

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagType {
    Boolean,
    Integer,
    String,
}

/// A schema entry either declares the type of a canonical flag or points at
/// another flag it stands in for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagRule {
    Type(FlagType),
    Alias(&'static str),
}

pub type FlagEntry = (&'static str, FlagRule);

/// Flags every command accepts.
pub const COMMON_FLAGS: &[FlagEntry] = &[
    ("--help", FlagRule::Type(FlagType::Boolean)),
    ("-h", FlagRule::Alias("--help")),
    ("--debug", FlagRule::Type(FlagType::Boolean)),
    ("-d", FlagRule::Alias("--debug")),
    ("--no-color", FlagRule::Type(FlagType::Boolean)),
    ("--token", FlagRule::Type(FlagType::String)),
    ("-t", FlagRule::Alias("--token")),
    ("--scope", FlagRule::Type(FlagType::String)),
    ("-S", FlagRule::Alias("--scope")),
    ("--local-config", FlagRule::Type(FlagType::String)),
    ("-A", FlagRule::Alias("--local-config")),
    ("--global-config", FlagRule::Type(FlagType::String)),
    ("-Q", FlagRule::Alias("--global-config")),
];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArgumentParseError {
    #[error("unknown or unexpected option: {0}")]
    UnknownFlag(String),
    #[error("option requires argument: {0}")]
    MissingValue(String),
    #[error("option {flag} expects {expected}, got {value:?}")]
    InvalidValue {
        flag: String,
        value: String,
        expected: &'static str,
    },
    #[error("option {0} does not take a value")]
    UnexpectedValue(String),
    #[error("option {0} is an alias that does not resolve to a flag")]
    BrokenAlias(String),
}

/// Read-only flag table, built from one or more entry layers.
#[derive(Clone, Copy, Debug)]
pub struct FlagSchema {
    layers: &'static [&'static [FlagEntry]],
}

impl FlagSchema {
    pub const fn new(layers: &'static [&'static [FlagEntry]]) -> Self {
        Self { layers }
    }

    pub fn entries(&self) -> impl Iterator<Item = &'static FlagEntry> {
        let layers: &'static [&'static [FlagEntry]] = self.layers;
        layers.iter().flat_map(|layer| layer.iter())
    }

    fn lookup(&self, name: &str) -> Option<&'static FlagEntry> {
        self.entries().find(|(flag, _)| *flag == name)
    }

    /// Follows aliases to the canonical flag name and its type.
    pub fn resolve(&self, name: &str) -> Result<(&'static str, FlagType), ArgumentParseError> {
        let mut entry = self
            .lookup(name)
            .ok_or_else(|| ArgumentParseError::UnknownFlag(name.to_string()))?;

        // A chain longer than the schema must revisit an entry.
        for _ in 0..=self.entries().count() {
            match entry.1 {
                FlagRule::Type(ty) => return Ok((entry.0, ty)),
                FlagRule::Alias(target) => {
                    entry = self
                        .lookup(target)
                        .ok_or_else(|| ArgumentParseError::BrokenAlias(name.to_string()))?;
                }
            }
        }

        Err(ArgumentParseError::BrokenAlias(name.to_string()))
    }

    pub fn validate(&self) -> Result<(), ArgumentParseError> {
        for (name, _) in self.entries() {
            self.resolve(name)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

/// Canonical flags and positional arguments of one invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    flags: BTreeMap<&'static str, FlagValue>,
    positional: Vec<String>,
}

impl ParsedArgs {
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    pub fn boolean(&self, name: &str) -> bool {
        matches!(self.flags.get(name), Some(FlagValue::Boolean(true)))
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.flags.get(name) {
            Some(FlagValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.flags.get(name) {
            Some(FlagValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }
}

fn looks_like_flag(token: &str, ty: FlagType) -> bool {
    if token.len() < 2 || !token.starts_with('-') {
        return false;
    }
    !(ty == FlagType::Integer && token.parse::<i64>().is_ok())
}

fn coerce(flag: &str, ty: FlagType, raw: String) -> Result<FlagValue, ArgumentParseError> {
    match ty {
        FlagType::Boolean => Ok(FlagValue::Boolean(true)),
        FlagType::String => Ok(FlagValue::String(raw)),
        FlagType::Integer => raw.parse::<i64>().map(FlagValue::Integer).map_err(|_| {
            ArgumentParseError::InvalidValue {
                flag: flag.to_string(),
                value: raw,
                expected: "an integer",
            }
        }),
    }
}

/// Any flag missing from the schema is an error.
pub fn parse(argv: &[String], schema: &FlagSchema) -> Result<ParsedArgs, ArgumentParseError> {
    let mut parsed = ParsedArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let token = &argv[i];
        i += 1;

        if token == "--" {
            parsed.positional.extend(argv[i..].iter().cloned());
            break;
        }
        if token.len() < 2 || !token.starts_with('-') {
            parsed.positional.push(token.clone());
            continue;
        }

        // `--name=value` for long flags, `-abc` groups for short ones.
        let (names, mut inline) = if token.starts_with("--") {
            match token.split_once('=') {
                Some((name, value)) => (vec![name.to_string()], Some(value.to_string())),
                None => (vec![token.clone()], None),
            }
        } else {
            (token.chars().skip(1).map(|c| format!("-{c}")).collect::<Vec<_>>(), None)
        };

        let resolved = names
            .iter()
            .map(|name| schema.resolve(name))
            .collect::<Result<Vec<_>, _>>()?;

        let last = resolved.len() - 1;
        for (position, (flag, ty)) in resolved.into_iter().enumerate() {
            if ty == FlagType::Boolean {
                if inline.is_some() {
                    return Err(ArgumentParseError::UnexpectedValue(flag.to_string()));
                }
                parsed.flags.insert(flag, FlagValue::Boolean(true));
                continue;
            }

            if position != last {
                return Err(ArgumentParseError::MissingValue(names[position].clone()));
            }

            let raw = match inline.take() {
                Some(value) => value,
                None => match argv.get(i) {
                    Some(next) if !looks_like_flag(next, ty) => {
                        i += 1;
                        next.clone()
                    }
                    _ => return Err(ArgumentParseError::MissingValue(names[position].clone())),
                },
            };
            parsed.flags.insert(flag, coerce(flag, ty, raw)?);
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEXT_FLAGS: &[FlagEntry] = &[
        ("--next", FlagRule::Type(FlagType::Integer)),
        ("-N", FlagRule::Alias("--next")),
        ("--limit", FlagRule::Type(FlagType::Integer)),
    ];
    const SCHEMA: FlagSchema = FlagSchema::new(&[COMMON_FLAGS, NEXT_FLAGS]);

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_alias_matches_long_flag() {
        let short = parse(&argv(&["-N", "5"]), &SCHEMA).unwrap();
        let long = parse(&argv(&["--next", "5"]), &SCHEMA).unwrap();
        assert_eq!(short, long);
        assert_eq!(long.integer("--next"), Some(5));
    }

    #[test]
    fn test_positionals_keep_order_around_flags() {
        let parsed = parse(&argv(&["ls", "--next", "1584722256178", "example.com", "-d"]), &SCHEMA).unwrap();
        assert_eq!(parsed.positional(), &argv(&["ls", "example.com"])[..]);
        assert_eq!(parsed.integer("--next"), Some(1584722256178));
        assert!(parsed.boolean("--debug"));
        assert!(!parsed.boolean("--help"));
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let err = parse(&argv(&["--bogus-flag"]), &SCHEMA).unwrap_err();
        assert_eq!(err, ArgumentParseError::UnknownFlag("--bogus-flag".to_string()));

        let err = parse(&argv(&["ls", "-z"]), &SCHEMA).unwrap_err();
        assert_eq!(err, ArgumentParseError::UnknownFlag("-z".to_string()));
    }

    #[test]
    fn test_integer_coercion_failure() {
        for args in [vec!["--next", "soon"], vec!["-N", "12abc"], vec!["--limit=ten"]] {
            let err = parse(&argv(&args), &SCHEMA).unwrap_err();
            assert!(matches!(err, ArgumentParseError::InvalidValue { .. }), "{args:?}");
        }
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse(&argv(&["ls", "--next"]), &SCHEMA).unwrap_err(),
            ArgumentParseError::MissingValue("--next".to_string())
        );
        // A following flag is not a value
        assert_eq!(
            parse(&argv(&["--token", "--debug"]), &SCHEMA).unwrap_err(),
            ArgumentParseError::MissingValue("--token".to_string())
        );
    }

    #[test]
    fn test_negative_integer_is_a_value() {
        let parsed = parse(&argv(&["--next", "-5"]), &SCHEMA).unwrap();
        assert_eq!(parsed.integer("--next"), Some(-5));
    }

    #[test]
    fn test_inline_values() {
        let parsed = parse(&argv(&["--limit=20", "--token=abc"]), &SCHEMA).unwrap();
        assert_eq!(parsed.integer("--limit"), Some(20));
        assert_eq!(parsed.string("--token"), Some("abc"));

        assert_eq!(
            parse(&argv(&["--help=yes"]), &SCHEMA).unwrap_err(),
            ArgumentParseError::UnexpectedValue("--help".to_string())
        );
    }

    #[test]
    fn test_grouped_short_flags() {
        let parsed = parse(&argv(&["-dhN", "3"]), &SCHEMA).unwrap();
        assert!(parsed.boolean("--debug"));
        assert!(parsed.boolean("--help"));
        assert_eq!(parsed.integer("--next"), Some(3));

        // Only the last flag of a group may take a value
        assert_eq!(
            parse(&argv(&["-Nd", "3"]), &SCHEMA).unwrap_err(),
            ArgumentParseError::MissingValue("-N".to_string())
        );
    }

    #[test]
    fn test_double_dash_ends_flags() {
        let parsed = parse(&argv(&["rm", "--", "--weird-id", "-"]), &SCHEMA).unwrap();
        assert_eq!(parsed.positional(), &argv(&["rm", "--weird-id", "-"])[..]);
    }

    #[test]
    fn test_schema_validation() {
        assert!(SCHEMA.validate().is_ok());

        const CYCLE: &[FlagEntry] = &[("-a", FlagRule::Alias("-b")), ("-b", FlagRule::Alias("-a"))];
        const DANGLING: &[FlagEntry] = &[("-x", FlagRule::Alias("--nowhere"))];
        assert_eq!(
            FlagSchema::new(&[CYCLE]).validate(),
            Err(ArgumentParseError::BrokenAlias("-a".to_string()))
        );
        assert_eq!(
            FlagSchema::new(&[DANGLING]).resolve("-x"),
            Err(ArgumentParseError::BrokenAlias("-x".to_string()))
        );
    }
}
