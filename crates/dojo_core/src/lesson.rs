//! Lesson records and the sections a lesson page shows.

use serde::{Deserialize, Deserializer, Serialize};

use crate::block::Block;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LessonCategory {
    Kihon,
    Kata,
    Kumite,
    DojoRules,
    Terms,
    BeltExam,
}

impl LessonCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            LessonCategory::Kihon => "kihon",
            LessonCategory::Kata => "kata",
            LessonCategory::Kumite => "kumite",
            LessonCategory::DojoRules => "dojo_rules",
            LessonCategory::Terms => "terms",
            LessonCategory::BeltExam => "belt_exam",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    Draft,
    Published,
}

/// Reference backing a lesson (book, federation page, video)
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Source {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl Source {
    pub const UNTITLED: &'static str = "מקור";

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(Self::UNTITLED)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Lesson {
    pub id: String,
    pub style_id: String,
    pub belt_id: String,
    pub slug: String,
    pub title: String,
    pub category: LessonCategory,
    #[serde(default)]
    pub status: Option<LessonStatus>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub content_md: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub objectives: Option<Vec<String>>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
    #[serde(default)]
    pub common_mistakes: Option<Vec<String>>,
    #[serde(default)]
    pub practice_tips: Option<Vec<String>>,
    #[serde(default)]
    pub safety_warnings: Option<Vec<String>>,
    #[serde(default, rename = "sources_json", deserialize_with = "source_list")]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// Status banner at the foot of a lesson page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonNotice {
    Draft,
    /// Published without any sources
    Unsourced,
}

impl LessonNotice {
    pub fn message(self) -> &'static str {
        match self {
            LessonNotice::Draft => "שיעור זה עדיין בשלב טיוטה. מומלץ להוסיף מקורות לפני פרסום.",
            LessonNotice::Unsourced => "לא הוגדרו מקורות לשיעור הזה.",
        }
    }
}

/// One card of a lesson page, in page order.
#[derive(Debug, Clone, PartialEq)]
pub enum LessonSection<'a> {
    Body(Vec<Block>),
    Objectives(&'a [String]),
    Explanation(&'a str),
    /// Numbered
    Steps(&'a [String]),
    CommonMistakes(&'a [String]),
    PracticeTips(&'a [String]),
    SafetyWarnings(&'a [String]),
    Sources(&'a [Source]),
    Notice(LessonNotice),
}

impl LessonSection<'_> {
    /// Stable name for styling hooks
    pub fn kind(&self) -> &'static str {
        match self {
            LessonSection::Body(_) => "body",
            LessonSection::Objectives(_) => "objectives",
            LessonSection::Explanation(_) => "explanation",
            LessonSection::Steps(_) => "steps",
            LessonSection::CommonMistakes(_) => "common-mistakes",
            LessonSection::PracticeTips(_) => "practice-tips",
            LessonSection::SafetyWarnings(_) => "safety-warnings",
            LessonSection::Sources(_) => "sources",
            LessonSection::Notice(_) => "notice",
        }
    }

    /// Card heading; notices have none
    pub fn title(&self) -> &'static str {
        match self {
            LessonSection::Body(_) => "התוכן",
            LessonSection::Objectives(_) => "מטרות השיעור",
            LessonSection::Explanation(_) => "הסבר",
            LessonSection::Steps(_) => "שלבי ביצוע",
            LessonSection::CommonMistakes(_) => "טעויות נפוצות",
            LessonSection::PracticeTips(_) => "טיפים לתרגול",
            LessonSection::SafetyWarnings(_) => "אזהרות בטיחות",
            LessonSection::Sources(_) => "מקורות",
            LessonSection::Notice(_) => "",
        }
    }
}

impl Lesson {
    /// The lesson body as display blocks.
    pub fn body(&self) -> Vec<Block> {
        crate::render(self.content_md.as_deref())
    }

    pub fn notice(&self) -> Option<LessonNotice> {
        match self.status? {
            LessonStatus::Draft => Some(LessonNotice::Draft),
            LessonStatus::Published if self.sources.is_empty() => Some(LessonNotice::Unsourced),
            LessonStatus::Published => None,
        }
    }

    /// Page sections in display order. Absent fields, empty lists and an
    /// empty explanation are left out.
    pub fn sections(&self) -> Vec<LessonSection<'_>> {
        let mut sections = Vec::new();

        let body = self.body();
        if !body.is_empty() {
            sections.push(LessonSection::Body(body));
        }
        if let Some(items) = non_empty(&self.objectives) {
            sections.push(LessonSection::Objectives(items));
        }
        if let Some(text) = self.explanation.as_deref().filter(|text| !text.is_empty()) {
            sections.push(LessonSection::Explanation(text));
        }
        if let Some(items) = non_empty(&self.steps) {
            sections.push(LessonSection::Steps(items));
        }
        if let Some(items) = non_empty(&self.common_mistakes) {
            sections.push(LessonSection::CommonMistakes(items));
        }
        if let Some(items) = non_empty(&self.practice_tips) {
            sections.push(LessonSection::PracticeTips(items));
        }
        if let Some(items) = non_empty(&self.safety_warnings) {
            sections.push(LessonSection::SafetyWarnings(items));
        }
        if !self.sources.is_empty() {
            sections.push(LessonSection::Sources(&self.sources));
        }
        if let Some(notice) = self.notice() {
            sections.push(LessonSection::Notice(notice));
        }
        sections
    }
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|items| !items.is_empty())
}

/// `sources_json` is free-form JSON: anything but an array means no sources,
/// and array entries that are not source objects are skipped.
fn source_list<'de, D>(deserializer: D) -> Result<Vec<Source>, D::Error>
where
    D: Deserializer<'de>,
{
    let serde_json::Value::Array(entries) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(source) => Some(source),
            Err(e) => {
                log::debug!("skipping malformed lesson source: {e}");
                None
            }
        })
        .collect())
}
