use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecitationType {
    Sabaq,
    #[serde(rename = "Last 3 Sabaqs")]
    LastThreeSabaqs,
    #[serde(rename = "Sabaq Dhor")]
    SabaqDhor,
    Dhor,
}

impl RecitationType {
    pub const ALL: [RecitationType; 4] = [
        RecitationType::Sabaq,
        RecitationType::LastThreeSabaqs,
        RecitationType::SabaqDhor,
        RecitationType::Dhor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecitationType::Sabaq => "Sabaq",
            RecitationType::LastThreeSabaqs => "Last 3 Sabaqs",
            RecitationType::SabaqDhor => "Sabaq Dhor",
            RecitationType::Dhor => "Dhor",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "Sabaq" => Some(RecitationType::Sabaq),
            "Last 3 Sabaqs" => Some(RecitationType::LastThreeSabaqs),
            "Sabaq Dhor" => Some(RecitationType::SabaqDhor),
            "Dhor" => Some(RecitationType::Dhor),
            _ => None,
        }
    }

    /// Dhor-style sessions are reviewed by juz' rather than by surah
    pub fn is_juz_based(&self) -> bool {
        matches!(self, RecitationType::SabaqDhor | RecitationType::Dhor)
    }
}

/// Grades ordered best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Average,
    Failed,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Excellent,
        Grade::VeryGood,
        Grade::Good,
        Grade::Average,
        Grade::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::VeryGood => "Very Good",
            Grade::Good => "Good",
            Grade::Average => "Average",
            Grade::Failed => "Failed",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "Excellent" => Some(Grade::Excellent),
            "Very Good" => Some(Grade::VeryGood),
            "Good" => Some(Grade::Good),
            "Average" => Some(Grade::Average),
            "Failed" => Some(Grade::Failed),
            _ => None,
        }
    }

    /// Ordinal used for grade averages: Failed = 1 up to Excellent = 5
    pub fn ordinal(&self) -> u32 {
        match self {
            Grade::Excellent => 5,
            Grade::VeryGood => 4,
            Grade::Good => 3,
            Grade::Average => 2,
            Grade::Failed => 1,
        }
    }

    /// Chart colour shared with the presentation layer
    pub fn color(&self) -> &'static str {
        match self {
            Grade::Excellent => "#10b981",
            Grade::VeryGood => "#3b82f6",
            Grade::Good => "#f59e0b",
            Grade::Average => "#f97316",
            Grade::Failed => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MistakePortion {
    Full,
    Half,
    Quarter,
}

impl MistakePortion {
    pub fn as_str(&self) -> &'static str {
        match self {
            MistakePortion::Full => "Full",
            MistakePortion::Half => "Half",
            MistakePortion::Quarter => "Quarter",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "Full" => Some(MistakePortion::Full),
            "Half" => Some(MistakePortion::Half),
            "Quarter" => Some(MistakePortion::Quarter),
            _ => None,
        }
    }

    /// Number of mistake-count entries a session recorded at this portion should carry
    pub fn expected_entries(&self) -> usize {
        match self {
            MistakePortion::Full => 1,
            MistakePortion::Half => 2,
            MistakePortion::Quarter => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Absent => "absent",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "late" => Some(AttendanceStatus::Late),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeCount {
    pub portion: MistakePortion,
    #[serde(default)]
    pub mistakes: u32,
    #[serde(default)]
    pub stucks: u32,
    #[serde(default)]
    pub marked_mistakes: u32,
}

impl MistakeCount {
    pub fn new(portion: MistakePortion, mistakes: u32, stucks: u32, marked_mistakes: u32) -> Self {
        MistakeCount {
            portion,
            mistakes,
            stucks,
            marked_mistakes,
        }
    }

    pub fn total(&self) -> u64 {
        self.mistakes as u64 + self.stucks as u64 + self.marked_mistakes as u64
    }
}

/// One recitation session as stored and exported by the app.
///
/// `date` and `recitation_type` keep the raw text so a record with an
/// unparseable date or an unknown type can still be loaded and is only
/// skipped by the aggregations that need those fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecitationLog {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub recitation_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surah_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayah_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayah_end: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub juz_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_count: Option<u32>,
    #[serde(default)]
    pub mistake_counts: Vec<MistakeCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tester_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "grade_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_repeat: Option<bool>,
    #[serde(
        default,
        deserialize_with = "attendance_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub attendance_status: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absence_reason: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

// Unknown grade or attendance text reads as absent, the same as in the store.
fn grade_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Grade>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Grade::from))
}

fn attendance_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AttendanceStatus>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(AttendanceStatus::from))
}

impl RecitationLog {
    pub fn recitation_type(&self) -> Option<RecitationType> {
        RecitationType::from(&self.recitation_type)
    }

    /// Sum of mistakes, stucks and marked mistakes across every portion entry
    pub fn total_mistakes(&self) -> u64 {
        self.mistake_counts.iter().map(MistakeCount::total).sum()
    }

    pub fn surah(&self) -> Option<&str> {
        self.surah_name.as_deref().filter(|name| !name.trim().is_empty())
    }

    pub fn juz(&self) -> Option<u32> {
        self.juz_number.filter(|juz| *juz > 0)
    }
}
