use std::iter::Peekable;
use std::str::Chars;

use super::action::Action;
use super::condition::{Condition, GroundedCondition};
use super::env::Env;
use super::Error;

// Section order is fixed: Symbols, InitialConditions, GoalConditions,
// Actions, then one definition / preconditions / effects triple per action.
enum Section {
    Symbols,
    InitialConditions,
    GoalConditions,
    Actions,
    ActionDefinition,
    ActionPreconditions,
    ActionEffects,
}

/// Parses a problem file into an environment. Headers match
/// case-insensitively, whitespace inside a line is ignored, blank lines are
/// skipped. In the Initial/Goal sections a `!` literal removes the positive
/// literal; in preconditions and effects it is kept as the truth flag.
pub fn parse(text: &str) -> Result<Env, Error> {
    let mut env = Env::new();
    let mut section = Section::Symbols;
    let mut pending: Option<(String, Vec<String>)> = None;
    let mut preconditions = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if line.is_empty() {
            continue;
        }

        section = match section {
            Section::Symbols => {
                let body = strip_header(&line, "symbols:")
                    .ok_or_else(|| bad_section(line_number, "Symbols"))?;
                env.add_symbols(split_symbols(body, line_number)?);
                Section::InitialConditions
            }
            Section::InitialConditions => {
                let body = strip_header(&line, "initialconditions:")
                    .ok_or_else(|| bad_section(line_number, "Initial conditions"))?;
                for condition in Scanner::new(body, line_number).conditions()? {
                    let grounded = GroundedCondition::new(condition.predicate, condition.args);
                    if condition.truth {
                        env.add_initial_condition(grounded);
                    } else {
                        env.remove_initial_condition(&grounded);
                    }
                }
                Section::GoalConditions
            }
            Section::GoalConditions => {
                let body = strip_header(&line, "goalconditions:")
                    .ok_or_else(|| bad_section(line_number, "Goal conditions"))?;
                for condition in Scanner::new(body, line_number).conditions()? {
                    let grounded = GroundedCondition::new(condition.predicate, condition.args);
                    if condition.truth {
                        env.add_goal_condition(grounded);
                    } else {
                        env.remove_goal_condition(&grounded);
                    }
                }
                Section::Actions
            }
            Section::Actions => {
                match strip_header(&line, "actions:") {
                    Some("") => (),
                    _ => return Err(bad_section(line_number, "Actions")),
                }
                Section::ActionDefinition
            }
            Section::ActionDefinition => {
                let mut parsed = Scanner::new(&line, line_number).conditions()?;
                if parsed.len() != 1 || !parsed[0].truth {
                    return Err(bad_section(line_number, "Action"));
                }
                let definition = parsed.remove(0);
                pending = Some((definition.predicate, definition.args));
                Section::ActionPreconditions
            }
            Section::ActionPreconditions => {
                let body = strip_header(&line, "preconditions:")
                    .ok_or_else(|| bad_section(line_number, "Preconditions"))?;
                preconditions = Scanner::new(body, line_number).conditions()?;
                Section::ActionEffects
            }
            Section::ActionEffects => {
                let body = strip_header(&line, "effects:")
                    .ok_or_else(|| bad_section(line_number, "Effects"))?;
                let effects = Scanner::new(body, line_number).conditions()?;
                let (name, params) = pending
                    .take()
                    .ok_or_else(|| bad_section(line_number, "Action"))?;
                env.add_action(Action::new(
                    name,
                    params,
                    std::mem::take(&mut preconditions),
                    effects,
                ));
                Section::ActionDefinition
            }
        };
    }

    match section {
        Section::ActionPreconditions | Section::ActionEffects => Err(Error::Parse {
            line: text.lines().count(),
            message: "action definition has no effects".to_string(),
        }),
        _ => Ok(env),
    }
}

fn strip_header<'a>(line: &'a str, header: &str) -> Option<&'a str> {
    let head = line.get(..header.len())?;
    if head.eq_ignore_ascii_case(header) {
        Some(&line[header.len()..])
    } else {
        None
    }
}

fn bad_section(line: usize, section: &str) -> Error {
    Error::Parse {
        line,
        message: format!("{} are not specified correctly", section),
    }
}

fn split_symbols(body: &str, line: usize) -> Result<Vec<String>, Error> {
    body.split(',')
        .map(|part| {
            if !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                Ok(part.to_string())
            } else {
                Err(Error::Parse {
                    line,
                    message: format!("\"{}\" is not a valid symbol", part),
                })
            }
        })
        .collect()
}

/// Scans a comma-separated list of `!Name(a,b)` literals from a line body
/// whose whitespace has already been stripped.
struct Scanner<'a> {
    it: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        Self {
            it: text.chars().peekable(),
            line,
        }
    }

    fn conditions(mut self) -> Result<Vec<Condition>, Error> {
        let mut conditions = Vec::new();
        if self.it.peek().is_none() {
            return Ok(conditions);
        }
        loop {
            conditions.push(self.condition()?);
            match self.it.next() {
                None => break,
                Some(',') => continue,
                Some(c) => {
                    return Err(Error::Parse {
                        line: self.line,
                        message: format!("unexpected '{}'", c),
                    })
                }
            }
        }
        Ok(conditions)
    }

    fn condition(&mut self) -> Result<Condition, Error> {
        let truth = self.it.next_if(|&c| c == '!').is_none();
        let predicate = self.identifier("predicate")?;
        if !predicate.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(Error::Parse {
                line: self.line,
                message: format!("predicate \"{}\" must start with an uppercase letter", predicate),
            });
        }
        self.expect('(')?;
        let mut args = vec![self.identifier("argument")?];
        while self.it.next_if(|&c| c == ',').is_some() {
            args.push(self.identifier("argument")?);
        }
        self.expect(')')?;
        Ok(Condition::new(predicate, args, truth))
    }

    fn identifier(&mut self, what: &str) -> Result<String, Error> {
        let mut name = String::new();
        while let Some(c) = self.it.next_if(|&c| c.is_ascii_alphanumeric() || c == '_') {
            name.push(c);
        }
        if name.is_empty() {
            return Err(Error::Parse {
                line: self.line,
                message: format!("expected {}", what),
            });
        }
        Ok(name)
    }

    fn expect(&mut self, expected: char) -> Result<(), Error> {
        match self.it.next() {
            Some(c) if c == expected => Ok(()),
            _ => Err(Error::Parse {
                line: self.line,
                message: format!("expected '{}'", expected),
            }),
        }
    }
}
