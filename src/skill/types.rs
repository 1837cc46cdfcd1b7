use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SkillError;

/// High-level driving intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    #[serde(alias = "wait")]
    Idle,
    Brake,
    SteerRight,
    SteerLeft,
    Forward,
    ForwardLeft,
    ForwardRight,
    Backward,
    BackwardLeft,
    BackwardRight,
}

impl Skill {
    pub const ALL: [Skill; 10] = [
        Skill::Idle,
        Skill::Brake,
        Skill::SteerRight,
        Skill::SteerLeft,
        Skill::Forward,
        Skill::ForwardLeft,
        Skill::ForwardRight,
        Skill::Backward,
        Skill::BackwardLeft,
        Skill::BackwardRight,
    ];

    /// Human readable label, as shown in debug overlays and logs.
    pub fn name(self) -> &'static str {
        match self {
            Skill::Idle => "idle",
            Skill::Brake => "brake",
            Skill::SteerRight => "steer right",
            Skill::SteerLeft => "steer left",
            Skill::Forward => "forward",
            Skill::ForwardLeft => "forward left",
            Skill::ForwardRight => "forward right",
            Skill::Backward => "backward",
            Skill::BackwardLeft => "backward left",
            Skill::BackwardRight => "backward right",
        }
    }

    pub fn is_forward(self) -> bool {
        matches!(self, Skill::Forward | Skill::ForwardLeft | Skill::ForwardRight)
    }

    pub fn is_backward(self) -> bool {
        matches!(
            self,
            Skill::Backward | Skill::BackwardLeft | Skill::BackwardRight
        )
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Skill {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', " ");
        if normalized == "wait" {
            return Ok(Skill::Idle);
        }
        Skill::ALL
            .iter()
            .copied()
            .find(|skill| skill.name() == normalized)
            .ok_or_else(|| SkillError::UnknownName(s.to_string()))
    }
}

const ROUTE_FOLLOW: [Skill; 8] = [
    Skill::Idle,
    Skill::Brake,
    Skill::Forward,
    Skill::ForwardLeft,
    Skill::ForwardRight,
    Skill::Backward,
    Skill::BackwardLeft,
    Skill::BackwardRight,
];

/// Indexed skill vocabularies used by the policies.
///
/// `RouteFollow` is the 8-skill table decoded from the first action element,
/// `Complete` is the 10-skill table (with the steer-only skills) used when the
/// skill is a separate discrete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTable {
    RouteFollow,
    Complete,
}

impl SkillTable {
    pub fn skills(self) -> &'static [Skill] {
        match self {
            SkillTable::RouteFollow => &ROUTE_FOLLOW,
            SkillTable::Complete => &Skill::ALL,
        }
    }

    pub fn len(self) -> usize {
        self.skills().len()
    }

    pub fn get(self, index: usize) -> Result<Skill, SkillError> {
        self.skills()
            .get(index)
            .copied()
            .ok_or(SkillError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn index_of(self, skill: Skill) -> Option<usize> {
        self.skills().iter().position(|&s| s == skill)
    }

    /// Rounds a policy's float skill output to the nearest index, halves to
    /// the even one.
    pub fn from_rounded(self, value: f32) -> Result<Skill, SkillError> {
        if !value.is_finite() || value < -0.5 {
            return Err(SkillError::InvalidIndex(value));
        }
        self.get(value.round_ties_even() as usize)
    }

    /// Splits [-1, 1] into `len` equal-width buckets and returns the skill of
    /// the bucket `value` falls in. Values outside the interval are clamped.
    pub fn bucket(self, value: f32) -> Skill {
        let len = self.len();
        let unit = if value.is_nan() {
            0.0
        } else {
            ((value + 1.0) / 2.0).clamp(0.0, 1.0)
        };
        let index = ((unit * len as f32) as usize).min(len - 1);
        self.skills()[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_table_indices() {
        let table = SkillTable::Complete;

        assert_eq!(table.get(0), Ok(Skill::Idle));
        assert_eq!(table.get(2), Ok(Skill::SteerRight));
        assert_eq!(table.get(9), Ok(Skill::BackwardRight));
        assert_eq!(
            table.get(10),
            Err(SkillError::IndexOutOfRange { index: 10, len: 10 })
        );
    }

    #[test]
    fn test_route_follow_table_has_no_steer_only_skills() {
        let table = SkillTable::RouteFollow;

        assert_eq!(table.len(), 8);
        assert_eq!(table.get(2), Ok(Skill::Forward));
        assert_eq!(table.index_of(Skill::SteerLeft), None);
        assert!(table.get(8).is_err());
    }

    #[test]
    fn test_from_rounded() {
        let table = SkillTable::Complete;

        assert_eq!(table.from_rounded(3.6), Ok(Skill::Forward));
        assert_eq!(table.from_rounded(-0.2), Ok(Skill::Idle));
        assert!(table.from_rounded(-3.0).is_err());
        assert!(table.from_rounded(f32::NAN).is_err());
        assert!(table.from_rounded(9.7).is_err());
    }

    #[test]
    fn test_from_rounded_halves_go_to_even() {
        let table = SkillTable::Complete;

        assert_eq!(table.from_rounded(2.5), Ok(Skill::SteerRight));
        assert_eq!(table.from_rounded(3.5), Ok(Skill::Forward));
        assert_eq!(table.from_rounded(0.5), Ok(Skill::Idle));
        assert_eq!(table.from_rounded(-0.5), Ok(Skill::Idle));
    }

    #[test]
    fn test_bucket_covers_the_whole_interval() {
        let table = SkillTable::RouteFollow;

        assert_eq!(table.bucket(-1.0), Skill::Idle);
        assert_eq!(table.bucket(-0.7), Skill::Brake);
        assert_eq!(table.bucket(0.0), Skill::ForwardRight);
        assert_eq!(table.bucket(1.0), Skill::BackwardRight);
        assert_eq!(table.bucket(5.0), Skill::BackwardRight);
        assert_eq!(table.bucket(-5.0), Skill::Idle);
    }

    #[test]
    fn test_skill_names_round_trip_through_from_str() {
        for skill in Skill::ALL {
            assert_eq!(skill.name().parse::<Skill>(), Ok(skill));
        }
        assert_eq!("wait".parse::<Skill>(), Ok(Skill::Idle));
        assert_eq!("forward_left".parse::<Skill>(), Ok(Skill::ForwardLeft));
        assert!("drift".parse::<Skill>().is_err());
    }
}
