//! Heading level assignment and outline building.

use crate::model::{HeadingLevel, OutlineEntry};

use super::classifier::HeadingCandidate;
use super::numbering::NumberingValidator;
use super::text::normalize;
use super::title::Title;

/// Maps heading candidates to H1–H3.
///
/// Font sizes are ranked among the candidates; the largest distinct size is
/// H1, the next H2, the next H3. Lookup is by exact size. A numbered heading
/// ignores its size and takes its level from the prefix depth.
#[derive(Debug, Clone)]
pub struct LevelAssigner<'a> {
    tiers: Vec<f32>,
    numbering: &'a NumberingValidator,
}

impl<'a> LevelAssigner<'a> {
    /// Rank the distinct font sizes of `headings`, keeping `tier_count` tiers.
    pub fn new(
        headings: &[HeadingCandidate],
        tier_count: usize,
        numbering: &'a NumberingValidator,
    ) -> Self {
        let mut tiers: Vec<f32> = headings.iter().map(|h| h.font_size).collect();
        tiers.sort_by(|a, b| b.total_cmp(a));
        tiers.dedup();
        tiers.truncate(tier_count.min(3));

        log::debug!("font-size tiers: {:?}", tiers);
        Self { tiers, numbering }
    }

    /// Ranked sizes, largest first.
    pub fn tiers(&self) -> &[f32] {
        &self.tiers
    }

    /// Level of an exact font size, if it is one of the ranked tiers.
    pub fn tier_level(&self, font_size: f32) -> Option<HeadingLevel> {
        self.tiers
            .iter()
            .position(|s| *s == font_size)
            .map(HeadingLevel::from_depth)
    }

    /// Resolve the level of a candidate.
    pub fn assign(&self, heading: &HeadingCandidate) -> HeadingLevel {
        if heading.is_numbered {
            if let Some(depth) = self.numbering.depth(&heading.text) {
                return HeadingLevel::from_depth(depth);
            }
        }
        self.tier_level(heading.font_size).unwrap_or(HeadingLevel::H3)
    }
}

/// Turn heading candidates into the final, sorted outline.
///
/// Candidates duplicating the title are dropped, numbered headings lose
/// their numeric prefix, and entries are stably sorted by page then level.
pub fn build_outline(
    headings: &[HeadingCandidate],
    title: &Title,
    levels: &LevelAssigner<'_>,
    numbering: &NumberingValidator,
) -> Vec<OutlineEntry> {
    let mut outline: Vec<OutlineEntry> = headings
        .iter()
        .filter(|h| !title.covers(&normalize(&h.text)))
        .map(|h| {
            let level = levels.assign(h);
            let text = if h.is_numbered {
                numbering.strip_prefix(&h.text).to_string()
            } else {
                h.text.clone()
            };
            OutlineEntry::new(level, text, h.page)
        })
        .collect();

    outline.sort_by_key(|e| (e.page, e.level.rank()));
    outline
}
