//! Phase and discipline enumerations.
//!
//! Both are closed sets. Together with the project id they fix a
//! document's position in the folder tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use pmis_core::AppError;

/// Lifecycle stage of the project a document was produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Feasibility and planning.
    Planning,
    /// Design development.
    Design,
    /// Construction and execution.
    Execution,
    /// Handover and closure.
    Closure,
}

impl Phase {
    /// Every phase, in lifecycle order.
    pub const ALL: [Phase; 4] = [
        Self::Planning,
        Self::Design,
        Self::Execution,
        Self::Closure,
    ];

    /// Return the phase as it appears in records and folder ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Design => "Design",
            Self::Execution => "Execution",
            Self::Closure => "Closure",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid phase: '{s}'. Expected one of: Planning, Design, Execution, Closure"
                ))
            })
    }
}

/// Engineering discipline a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Discipline {
    /// Civil and structural works.
    Civil,
    /// Electrical works.
    Electrical,
    /// Mechanical works.
    Mechanical,
    /// Plumbing and drainage.
    Plumbing,
    /// Heating, ventilation and air conditioning.
    #[serde(rename = "HVAC")]
    Hvac,
    /// Anything not tied to a single discipline.
    General,
}

impl Discipline {
    /// Every discipline.
    pub const ALL: [Discipline; 6] = [
        Self::Civil,
        Self::Electrical,
        Self::Mechanical,
        Self::Plumbing,
        Self::Hvac,
        Self::General,
    ];

    /// Return the discipline as it appears in records and folder ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Civil => "Civil",
            Self::Electrical => "Electrical",
            Self::Mechanical => "Mechanical",
            Self::Plumbing => "Plumbing",
            Self::Hvac => "HVAC",
            Self::General => "General",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid discipline: '{s}'. Expected one of: Civil, Electrical, Mechanical, Plumbing, HVAC, General"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_str() {
        assert_eq!("design".parse::<Phase>().unwrap(), Phase::Design);
        assert_eq!("Closure".parse::<Phase>().unwrap(), Phase::Closure);
        assert!("Commissioning".parse::<Phase>().is_err());
    }

    #[test]
    fn test_hvac_spelling() {
        assert_eq!(Discipline::Hvac.to_string(), "HVAC");
        assert_eq!("hvac".parse::<Discipline>().unwrap(), Discipline::Hvac);
        let json = serde_json::to_string(&Discipline::Hvac).unwrap();
        assert_eq!(json, "\"HVAC\"");
    }
}
