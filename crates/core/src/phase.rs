//! Phase status vocabulary and the built-in phase templates.
//!
//! A phase moves `pending -> in_progress -> completed` in normal use; the
//! store does not enforce forward-only transitions, so a manager can reset a
//! phase after a client revision round.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Workflow status of a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Pending,
    InProgress,
    Completed,
}

impl PhaseStatus {
    pub const ALL: [PhaseStatus; 3] = [
        PhaseStatus::Pending,
        PhaseStatus::InProgress,
        PhaseStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseStatus::Pending => "pending",
            PhaseStatus::InProgress => "in_progress",
            PhaseStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseStatus {
    type Err = UnknownPhaseStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PhaseStatus::Pending),
            "in_progress" => Ok(PhaseStatus::InProgress),
            "completed" => Ok(PhaseStatus::Completed),
            other => Err(UnknownPhaseStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown phase status: {0:?}")]
pub struct UnknownPhaseStatus(pub String);

/// One phase definition inside a template: the seed for a `project_phases`
/// row at project creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSeed {
    pub name: &'static str,
    pub code: &'static str,
    pub estimated_hours: i32,
    pub description: &'static str,
}

/// The named phase templates a project can be created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseTemplate {
    Standard,
    FastTrack,
    Renovation,
}

impl PhaseTemplate {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseTemplate::Standard => "standard",
            PhaseTemplate::FastTrack => "fast_track",
            PhaseTemplate::Renovation => "renovation",
        }
    }

    /// The ordered phase seeds for this template.
    pub fn phases(self) -> &'static [PhaseSeed] {
        match self {
            PhaseTemplate::Standard => STANDARD_PHASES,
            PhaseTemplate::FastTrack => FAST_TRACK_PHASES,
            PhaseTemplate::Renovation => RENOVATION_PHASES,
        }
    }
}

impl fmt::Display for PhaseTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full architectural workflow, intake through closeout.
const STANDARD_PHASES: &[PhaseSeed] = &[
    PhaseSeed {
        name: "Preliminary Design",
        code: "PD",
        estimated_hours: 40,
        description: "Initial concept and feasibility studies",
    },
    PhaseSeed {
        name: "Design Development",
        code: "DD",
        estimated_hours: 80,
        description: "Refine design and material selection",
    },
    PhaseSeed {
        name: "Construction Documents",
        code: "CD",
        estimated_hours: 120,
        description: "Detailed drawings and specifications",
    },
    PhaseSeed {
        name: "Permit & Approvals",
        code: "PA",
        estimated_hours: 20,
        description: "Submit for building permits",
    },
    PhaseSeed {
        name: "Bidding & Negotiation",
        code: "BN",
        estimated_hours: 15,
        description: "Contractor selection process",
    },
    PhaseSeed {
        name: "Construction Administration",
        code: "CA",
        estimated_hours: 60,
        description: "Site visits and RFI responses",
    },
    PhaseSeed {
        name: "Project Closeout",
        code: "PC",
        estimated_hours: 10,
        description: "Final documentation and handover",
    },
];

/// Compressed schedule for clients who need permits fast.
const FAST_TRACK_PHASES: &[PhaseSeed] = &[
    PhaseSeed {
        name: "Schematic Design",
        code: "SD",
        estimated_hours: 60,
        description: "Combined preliminary and design development",
    },
    PhaseSeed {
        name: "Construction Documents",
        code: "CD",
        estimated_hours: 100,
        description: "Expedited drawing production",
    },
    PhaseSeed {
        name: "Permit & Construction",
        code: "PC",
        estimated_hours: 40,
        description: "Parallel permit and construction start",
    },
    PhaseSeed {
        name: "Construction Administration",
        code: "CA",
        estimated_hours: 50,
        description: "Active site supervision",
    },
];

/// Renovation/addition work on an existing building.
const RENOVATION_PHASES: &[PhaseSeed] = &[
    PhaseSeed {
        name: "Existing Conditions",
        code: "EC",
        estimated_hours: 30,
        description: "Survey and document existing building",
    },
    PhaseSeed {
        name: "Design Development",
        code: "DD",
        estimated_hours: 60,
        description: "Renovation design and planning",
    },
    PhaseSeed {
        name: "Construction Documents",
        code: "CD",
        estimated_hours: 80,
        description: "Detailed renovation drawings",
    },
    PhaseSeed {
        name: "Permit & Approvals",
        code: "PA",
        estimated_hours: 25,
        description: "Building and historic approvals",
    },
    PhaseSeed {
        name: "Construction Phase",
        code: "CP",
        estimated_hours: 70,
        description: "Phased construction oversight",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for status in PhaseStatus::ALL {
            assert_eq!(status.as_str().parse::<PhaseStatus>().unwrap(), status);
        }
    }

    #[test]
    fn template_phase_counts() {
        assert_eq!(PhaseTemplate::Standard.phases().len(), 7);
        assert_eq!(PhaseTemplate::FastTrack.phases().len(), 4);
        assert_eq!(PhaseTemplate::Renovation.phases().len(), 5);
    }

    #[test]
    fn template_codes_are_short_and_upper() {
        for template in [
            PhaseTemplate::Standard,
            PhaseTemplate::FastTrack,
            PhaseTemplate::Renovation,
        ] {
            for seed in template.phases() {
                assert!(!seed.code.is_empty() && seed.code.len() <= 3);
                assert_eq!(seed.code, seed.code.to_uppercase());
                assert!(seed.estimated_hours > 0, "{} has no estimate", seed.name);
            }
        }
    }

    #[test]
    fn standard_template_starts_with_preliminary_design() {
        let phases = PhaseTemplate::Standard.phases();
        assert_eq!(phases[0].name, "Preliminary Design");
        assert_eq!(phases[6].name, "Project Closeout");
    }
}
