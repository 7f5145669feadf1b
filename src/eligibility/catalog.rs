//! Fixed catalog of welfare schemes considered during evaluation.

/// One scheme the evaluator may match a profile against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheme {
    pub name: &'static str,
    pub description: &'static str,
}

/// Major central-government schemes, as presented to the evaluation
/// service. State-specific schemes are left to the service itself.
pub const SCHEMES: &[Scheme] = &[
    Scheme {
        name: "Ayushman Bharat (Pradhan Mantri Jan Arogya Yojana)",
        description: "Health insurance for low-income families",
    },
    Scheme {
        name: "PM Awas Yojana",
        description: "Housing scheme for low-income families",
    },
    Scheme {
        name: "MGNREGA",
        description: "Rural employment guarantee",
    },
    Scheme {
        name: "PDS (Public Distribution System)",
        description: "Food subsidies",
    },
    Scheme {
        name: "PM Kisan",
        description: "Agricultural subsidies",
    },
    Scheme {
        name: "Ujjwala Yojana",
        description: "LPG connections for BPL families",
    },
    Scheme {
        name: "Swachh Bharat Mission",
        description: "Sanitation benefits",
    },
    Scheme {
        name: "Sukanya Samriddhi Yojana",
        description: "Girl child savings scheme",
    },
    Scheme {
        name: "Atal Pension Yojana",
        description: "Pension scheme for unorganized sector",
    },
];

/// Render the catalog as the bulleted list embedded in the evaluation
/// request.
pub fn catalog_text() -> String {
    SCHEMES
        .iter()
        .map(|s| format!("- {} - {}", s.name, s.description))
        .collect::<Vec<_>>()
        .join("\n")
}
