use core::str::FromStr;

use serde::{Deserialize, Serialize};

use huddle_core::DomainError;

/// Self-described professional category of a member.
///
/// Unrelated to privilege level (`UserType`): a Founder has no more
/// administrative capability than an Enthusiast. The wire form is the
/// human-readable label stored by the backend ("Co-founder", "HR Agency").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    Founder,
    #[serde(rename = "Co-founder")]
    CoFounder,
    #[default]
    Talent,
    Enthusiast,
    Solopreneur,
    #[serde(rename = "HR Agency")]
    HrAgency,
    Community,
}

impl Role {
    /// All roles, in the order they are presented to members.
    pub const ALL: [Role; 7] = [
        Role::Founder,
        Role::CoFounder,
        Role::Talent,
        Role::Enthusiast,
        Role::Solopreneur,
        Role::HrAgency,
        Role::Community,
    ];

    /// Stored/displayed label for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Founder => "Founder",
            Role::CoFounder => "Co-founder",
            Role::Talent => "Talent",
            Role::Enthusiast => "Enthusiast",
            Role::Solopreneur => "Solopreneur",
            Role::HrAgency => "HR Agency",
            Role::Community => "Community",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!("Investor".parse::<Role>().is_err());
    }

    #[test]
    fn default_role_is_talent() {
        assert_eq!(Role::default(), Role::Talent);
    }

    #[test]
    fn serde_uses_stored_labels() {
        let json = serde_json::to_string(&Role::HrAgency).unwrap();
        assert_eq!(json, "\"HR Agency\"");
        let back: Role = serde_json::from_str("\"Co-founder\"").unwrap();
        assert_eq!(back, Role::CoFounder);
    }
}
