use std::collections::HashMap;
use std::fmt;

/// A constant definition.
///
/// E.g. `PlayerStatus = $0756`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Constant {
    /// The name of the constant (e.g. `PlayerStatus`)
    pub identifier: String,
    /// The value of the constant as written in the source (e.g. `$0756`)
    pub value: String,
}

impl Constant {
    pub fn new(identifier: &str, value: &str) -> Constant {
        Constant {
            identifier: identifier.to_owned(),
            value: value.to_owned(),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

/// Name to value mapping of every constant declared in a program.
///
/// A repeated declaration overwrites the earlier value without a diagnostic.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct ConstantsTable {
    values: HashMap<String, String>,
}

impl ConstantsTable {
    pub fn new() -> ConstantsTable {
        ConstantsTable::default()
    }

    pub fn define(&mut self, constant: &Constant) {
        self.values
            .insert(constant.identifier.clone(), constant.value.clone());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_last_declaration_wins() {
        let mut table = ConstantsTable::new();
        table.define(&Constant::new("Speed", "$10"));
        table.define(&Constant::new("Lives", "3"));
        table.define(&Constant::new("Speed", "$20"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Speed"), Some("$20"));
        assert_eq!(table.get("Lives"), Some("3"));
        assert_eq!(table.get("Missing"), None);
    }
}
