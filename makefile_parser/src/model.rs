use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub targets: Vec<String>,
    pub prerequisites: Vec<String>,
    pub recipe: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct Makefile {
    pub variables: Vec<Variable>,
    pub rules: Vec<Rule>, // in file order
}

impl Makefile {
    /// The last assignment wins.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .rev()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    pub fn variable_words(&self, name: &str) -> Vec<&str> {
        self.variable(name)
            .map(|v| v.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn rule(&self, target: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|r| r.targets.iter().any(|t| t == target))
    }

    pub fn phony(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.targets.iter().any(|t| t == ".PHONY"))
            .flat_map(|r| r.prerequisites.iter().map(String::as_str))
            .collect()
    }
}
