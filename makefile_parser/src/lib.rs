mod model;

pub use crate::model::{Makefile, Rule, Variable};
use regex::Regex;

/// Join lines ending in a backslash continuation.
fn unfold_multiline(lines: &[&str]) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    for l in lines {
        let trimmed = l.trim_end();
        if let Some(head) = trimmed.strip_suffix('\\') {
            current.push_str(head);
            current.push(' ');
        } else {
            current.push_str(trimmed);
            result.push(current.clone());
            current.clear();
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// Parse a Makefile into variable assignments, rules and recipes.
pub fn parse_makefile(content: &str) -> Makefile {
    let lines: Vec<&str> = content.lines().collect();
    let lines = unfold_multiline(&lines);

    let mut makefile = Makefile::default();

    let re_assign = Regex::new(r"^([A-Za-z0-9_.-]+)\s*[:+?]?=\s*(.*)$").unwrap();
    let re_rule = Regex::new(r"^([^:=\t][^:=]*):([^=].*)?$").unwrap();

    for line in lines {
        // Tab-indented lines are recipe commands of the previous rule
        if let Some(command) = line.strip_prefix('\t') {
            let command = command.trim();
            if command.is_empty() {
                continue;
            }
            if let Some(rule) = makefile.rules.last_mut() {
                rule.recipe.push(command.to_string());
            }
            continue;
        }

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(cap) = re_assign.captures(line) {
            makefile.variables.push(Variable {
                name: cap[1].to_string(),
                value: cap[2].split_whitespace().collect::<Vec<_>>().join(" "),
            });
        } else if let Some(cap) = re_rule.captures(line) {
            let words = |s: &str| s.split_whitespace().map(|w| w.to_string()).collect::<Vec<_>>();
            makefile.rules.push(Rule {
                targets: words(&cap[1]),
                prerequisites: cap.get(2).map(|m| words(m.as_str())).unwrap_or_default(),
                recipe: vec![],
            });
        }
    }

    makefile
}
