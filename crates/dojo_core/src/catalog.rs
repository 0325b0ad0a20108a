//! Content records as exported from the backend, and the lookups the
//! browsing views need.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::{Error, Result};
use crate::lesson::{Lesson, LessonCategory};
use crate::quiz::{Question, Quiz, QuizSession};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Style {
    pub id: String,
    pub name_he: String,
    pub name_en: String,
    #[serde(default)]
    pub name_ja: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub origin_region: Option<String>,
    #[serde(default)]
    pub founded_by: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub authority_name: Option<String>,
    #[serde(default)]
    pub authority_url: Option<String>,
    #[serde(default)]
    pub lineage_md: Option<String>,
    #[serde(default)]
    pub governing_notes_md: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Belt {
    pub id: String,
    pub style_id: String,
    pub name_he: String,
    pub name_en: String,
    #[serde(default)]
    pub name_ja: Option<String>,
    pub color_hex: String,
    #[serde(default)]
    pub rank_label: Option<String>,
    #[serde(default)]
    pub kyu_number: Option<i32>,
    #[serde(default)]
    pub dan_number: Option<i32>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Glossary entry
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Term {
    pub id: String,
    pub term_he: String,
    pub term_en: String,
    #[serde(default)]
    pub term_ja: Option<String>,
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description_md: Option<String>,
    #[serde(default)]
    pub style_id: Option<String>,
    #[serde(default)]
    pub belt_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Term {
    /// Hebrew matches as typed; English and romaji ignore case.
    pub fn matches(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.term_he.contains(query)
            || self.term_en.to_lowercase().contains(&lowered)
            || self
                .romaji
                .as_ref()
                .is_some_and(|romaji| romaji.to_lowercase().contains(&lowered))
    }

    /// Description shown under the term, as written; glossary entries are
    /// displayed verbatim rather than rendered as markup.
    pub fn description(&self) -> Option<&str> {
        self.description_md.as_deref().filter(|text| !text.is_empty())
    }
}

/// Article on Japanese culture and etiquette
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CultureArticle {
    pub id: String,
    pub title_he: String,
    pub title_en: String,
    pub category: String,
    #[serde(default)]
    pub content_md: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CultureArticle {
    pub fn body(&self) -> Vec<Block> {
        crate::render(self.content_md.as_deref())
    }
}

/// Snapshot of every content table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Catalog {
    pub styles: Vec<Style>,
    pub belts: Vec<Belt>,
    pub lessons: Vec<Lesson>,
    pub terms: Vec<Term>,
    pub culture: Vec<CultureArticle>,
    pub quizzes: Vec<Quiz>,
    pub questions: Vec<Question>,
}

impl Catalog {
    /// Load a JSON snapshot from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog =
            serde_json::from_str(&content).map_err(|source| Error::CatalogParse {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "loaded catalog from {}: {} styles, {} lessons, {} terms, {} quizzes",
            path.display(),
            catalog.styles.len(),
            catalog.lessons.len(),
            catalog.terms.len(),
            catalog.quizzes.len()
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn styles(&self) -> Vec<&Style> {
        by_display_order(self.styles.iter(), |s| s.display_order)
    }

    pub fn style(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Belts of a style, lowest rank first
    pub fn belts_for_style(&self, style_id: &str) -> Vec<&Belt> {
        by_display_order(
            self.belts.iter().filter(|b| b.style_id == style_id),
            |b| b.display_order,
        )
    }

    pub fn belt(&self, id: &str) -> Option<&Belt> {
        self.belts.iter().find(|b| b.id == id)
    }

    pub fn lessons_for_belt(&self, belt_id: &str) -> Vec<&Lesson> {
        by_display_order(
            self.lessons.iter().filter(|l| l.belt_id == belt_id),
            |l| l.display_order,
        )
    }

    pub fn lesson_by_slug(&self, slug: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.slug == slug)
    }

    /// Tabs for a belt page: lesson categories in lesson order, then
    /// `Terms` when the belt has glossary entries.
    pub fn belt_categories(&self, style_id: &str, belt_id: &str) -> Vec<LessonCategory> {
        let mut categories = Vec::new();
        for lesson in self.lessons_for_belt(belt_id) {
            if !categories.contains(&lesson.category) {
                categories.push(lesson.category);
            }
        }
        if !self.terms_for_belt(style_id, belt_id).is_empty() {
            categories.push(LessonCategory::Terms);
        }
        categories
    }

    /// Glossary entries for a belt, sorted by Hebrew term
    pub fn terms_for_belt(&self, style_id: &str, belt_id: &str) -> Vec<&Term> {
        let mut terms: Vec<&Term> = self
            .terms
            .iter()
            .filter(|t| {
                t.style_id.as_deref() == Some(style_id) && t.belt_id.as_deref() == Some(belt_id)
            })
            .collect();
        terms.sort_by(|a, b| a.term_he.cmp(&b.term_he));
        terms
    }

    /// Whole glossary filtered by `query`, sorted by Hebrew term.
    /// An empty query matches everything.
    pub fn search_terms(&self, query: &str) -> Vec<&Term> {
        let mut terms: Vec<&Term> = self.terms.iter().filter(|t| t.matches(query)).collect();
        terms.sort_by(|a, b| a.term_he.cmp(&b.term_he));
        terms
    }

    pub fn culture_articles(&self) -> Vec<&CultureArticle> {
        by_display_order(self.culture.iter(), |a| a.display_order)
    }

    /// Articles grouped by category, categories in order of first appearance
    pub fn culture_by_category(&self) -> Vec<(&str, Vec<&CultureArticle>)> {
        let mut groups: Vec<(&str, Vec<&CultureArticle>)> = Vec::new();
        for article in self.culture_articles() {
            match groups.iter().position(|(cat, _)| *cat == article.category) {
                Some(index) => groups[index].1.push(article),
                None => groups.push((article.category.as_str(), vec![article])),
            }
        }
        groups
    }

    pub fn quiz(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    pub fn questions_for_quiz(&self, quiz_id: &str) -> Vec<&Question> {
        by_display_order(
            self.questions.iter().filter(|q| q.quiz_id == quiz_id),
            |q| q.display_order,
        )
    }

    /// Start a fresh attempt at a quiz.
    pub fn start_quiz(&self, quiz_id: &str) -> Option<QuizSession> {
        let quiz = self.quiz(quiz_id)?.clone();
        let questions = self
            .questions_for_quiz(quiz_id)
            .into_iter()
            .cloned()
            .collect();
        Some(QuizSession::new(quiz, questions))
    }
}

/// Ascending, records without an order last, ties in input order
fn by_display_order<'a, T, I>(items: I, order: impl Fn(&T) -> Option<i32>) -> Vec<&'a T>
where
    I: Iterator<Item = &'a T>,
{
    let mut items: Vec<&T> = items.collect();
    items.sort_by_key(|item| {
        let key = order(*item);
        (key.is_none(), key)
    });
    items
}
