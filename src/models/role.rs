use serde::{Deserialize, Serialize};

/// Label shown for an `Other` role whose note is blank.
pub const OTHER_ROLE_FALLBACK_LABEL: &str = "其他人員";

/// How the employee is engaged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "fulltime")]
    FullTime,
    #[serde(rename = "parttime")]
    PartTime,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 2] = [Self::FullTime, Self::PartTime];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "fulltime",
            Self::PartTime => "parttime",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fulltime" => Some(Self::FullTime),
            "parttime" => Some(Self::PartTime),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullTime => "專任 (全職)",
            Self::PartTime => "兼職 (部分工時)",
        }
    }
}

/// Job role of an employee.
///
/// `Other` carries the free-text job title entered by HR, so the note only
/// exists where it means something.
///
/// Serialized as `{"id": "nurse"}` or `{"id": "other", "note": "櫃台"}`.
/// On input the note may be missing or present for any id; it is only kept
/// for `other`, where a missing note reads as blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RoleRepr", into = "RoleRepr")]
pub enum Role {
    Doctor,
    Nurse,
    Psychologist,
    Therapist,
    Other(String),
}

impl Role {
    pub const IDS: [&'static str; 5] = ["doctor", "nurse", "psychologist", "therapist", "other"];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
            Self::Psychologist => "psychologist",
            Self::Therapist => "therapist",
            Self::Other(_) => "other",
        }
    }

    /// Builds a role from its id and the optional note. The note is only
    /// kept for `other`; unknown ids yield `None`.
    pub fn from_parts(id: &str, note: Option<&str>) -> Option<Self> {
        match id {
            "doctor" => Some(Self::Doctor),
            "nurse" => Some(Self::Nurse),
            "psychologist" => Some(Self::Psychologist),
            "therapist" => Some(Self::Therapist),
            "other" => Some(Self::Other(note.unwrap_or_default().to_string())),
            _ => None,
        }
    }

    /// Canonical label for the role id, as listed in the role picker.
    pub fn label(&self) -> &'static str {
        role_label(self.id()).unwrap_or(OTHER_ROLE_FALLBACK_LABEL)
    }

    /// The label shown next to the employee's name.
    pub fn display_label(&self) -> String {
        match self {
            Self::Other(note) if note.trim().is_empty() => OTHER_ROLE_FALLBACK_LABEL.to_string(),
            Self::Other(note) => note.trim().to_string(),
            role => role.label().to_string(),
        }
    }

    pub fn is_doctor(&self) -> bool {
        matches!(self, Self::Doctor)
    }
}

/// Wire shape of [`Role`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoleRepr {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl TryFrom<RoleRepr> for Role {
    type Error = String;

    fn try_from(repr: RoleRepr) -> Result<Self, Self::Error> {
        Role::from_parts(&repr.id, repr.note.as_deref())
            .ok_or_else(|| format!("unknown role: {}", repr.id))
    }
}

impl From<Role> for RoleRepr {
    fn from(role: Role) -> Self {
        let id = role.id().to_string();
        let note = match role {
            Role::Other(note) => Some(note),
            _ => None,
        };
        Self { id, note }
    }
}

fn role_label(id: &str) -> Option<&'static str> {
    match id {
        "doctor" => Some("醫師"),
        "nurse" => Some("護理師"),
        "psychologist" => Some("心理師"),
        "therapist" => Some("職能/物理治療師"),
        "other" => Some("其他人員 (行政/清潔等)"),
        _ => None,
    }
}

/// One entry of a form picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
    /// Whether choosing this option requires a free-text note.
    #[serde(default)]
    pub requires_note: bool,
}

/// The fixed enumerations a form needs to render the "add employee" dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormOptions {
    pub employment_types: Vec<SelectOption>,
    pub roles: Vec<SelectOption>,
}

impl FormOptions {
    pub fn get() -> Self {
        let employment_types = EmploymentType::ALL
            .iter()
            .map(|t| SelectOption {
                id: t.as_str().to_string(),
                label: t.label().to_string(),
                requires_note: false,
            })
            .collect();

        let roles = Role::IDS
            .iter()
            .filter_map(|id| {
                role_label(id).map(|label| SelectOption {
                    id: id.to_string(),
                    label: label.to_string(),
                    requires_note: *id == "other",
                })
            })
            .collect();

        Self {
            employment_types,
            roles,
        }
    }
}
