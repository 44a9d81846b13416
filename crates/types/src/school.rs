use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// School type offered on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchoolType {
    /// Gymnasium.
    Gym,
    /// Neue Mittelschule.
    Nms,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Ungültige Schulform '{0}', erlaubt sind GYM oder NMS")]
pub struct InvalidSchoolType(pub String);

impl SchoolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolType::Gym => "GYM",
            SchoolType::Nms => "NMS",
        }
    }
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchoolType {
    type Err = InvalidSchoolType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GYM" => Ok(SchoolType::Gym),
            "NMS" => Ok(SchoolType::Nms),
            other => Err(InvalidSchoolType(other.to_string())),
        }
    }
}
