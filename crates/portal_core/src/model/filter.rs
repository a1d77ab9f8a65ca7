//! Selected-student filter.

use super::student::Student;
use std::fmt::{Display, Formatter};

/// Selector value meaning "every student on the roster".
pub const ALL_STUDENTS: &str = "all";

/// Which students participate in widget projections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StudentFilter {
    #[default]
    All,
    /// Exact, case-sensitive student name.
    Named(String),
}

impl StudentFilter {
    /// Interprets a raw selector value. Only the exact string `all` selects
    /// everyone; any other value is a name, even if no student has it.
    pub fn parse(value: &str) -> Self {
        if value == ALL_STUDENTS {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    pub fn matches(&self, student: &Student) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => student.name == *name,
        }
    }

    /// Returns the participating students in roster order.
    pub fn apply<'a>(&self, roster: &'a [Student]) -> Vec<&'a Student> {
        roster.iter().filter(|student| self.matches(student)).collect()
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for StudentFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Display for StudentFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL_STUDENTS),
            Self::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StudentFilter;

    #[test]
    fn parse_treats_only_exact_all_as_everyone() {
        assert_eq!(StudentFilter::parse("all"), StudentFilter::All);
        assert_eq!(
            StudentFilter::parse("All"),
            StudentFilter::Named("All".to_string())
        );
        assert_eq!(
            StudentFilter::parse("Mark"),
            StudentFilter::Named("Mark".to_string())
        );
    }
}
