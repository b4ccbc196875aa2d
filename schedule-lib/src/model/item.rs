//! Schedule entries as served by the admin feed.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Age suffix letters ("лет", "a.", "y.o.") stripped from the age group.
static AGE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[aлy][.,o]*").expect("age suffix pattern is valid"));

/// Training discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    Boxing,
    Wrestling,
    Mma,
    Other,
}

impl Discipline {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Boxing => "Boxing",
            Self::Wrestling => "Wrestling",
            Self::Mma => "MMA",
            Self::Other => "Other",
        }
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boxing => "boxing",
            Self::Wrestling => "wrestling",
            Self::Mma => "mma",
            Self::Other => "other",
        }
    }
}

impl FromStr for Discipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boxing" => Ok(Self::Boxing),
            "wrestling" => Ok(Self::Wrestling),
            "mma" => Ok(Self::Mma),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown discipline '{}'", other)),
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One training slot in the weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Server-assigned ID.
    pub id: i64,
    /// Day of the week, 0 = Monday through 6 = Sunday.
    pub day_of_week: u8,
    /// Start time, e.g. `"18:30"`.
    pub time: String,
    /// Stored activity text (discipline label plus age group).
    #[serde(default)]
    pub activity: String,
    /// Raw discipline value; older rows may have none.
    #[serde(default)]
    pub discipline: Option<String>,
    /// Coach name.
    #[serde(default)]
    pub coach: Option<String>,
    /// Age group, e.g. `"7-12 a."`.
    #[serde(default)]
    pub age: Option<String>,
}

impl ScheduleItem {
    /// Parsed discipline, if the stored value is a known one.
    pub fn discipline(&self) -> Option<Discipline> {
        self.discipline.as_deref().and_then(|d| d.parse().ok())
    }

    /// Human-readable activity.
    ///
    /// `Other` entries show their free-text activity. Known disciplines show
    /// their label followed by the age group with its suffix letters removed.
    pub fn activity_display(&self) -> String {
        let discipline = self.discipline();
        if discipline == Some(Discipline::Other) {
            return if self.activity.trim().is_empty() {
                Discipline::Other.label().to_string()
            } else {
                self.activity.clone()
            };
        }

        let mut display = match discipline {
            Some(d) => d.label().to_string(),
            None => self.activity.clone(),
        };
        if let Some(age) = self.age.as_deref().filter(|a| !a.trim().is_empty()) {
            let cleaned = AGE_SUFFIX.replace_all(age, "");
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                display.push(' ');
                display.push_str(cleaned);
            }
        }
        display
    }

    /// `"{time} — {activity}"`, as listed in delete confirmations.
    pub fn summary_line(&self) -> String {
        format!("{} — {}", self.time, self.activity_display())
    }
}
