//! Recto/verso bookkeeping for duplex output
//!
//! Every section enters on a recto and leaves on a verso, so sections
//! compose by concatenation without a running page counter. A section with
//! an odd number of content sides is closed with one blank verso.

/// Which side of the bound planner a page appears on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSide {
    /// Right-hand page (odd page numbers in final book)
    /// The binding edge is on the left
    #[default]
    Recto,
    /// Left-hand page (even page numbers in final book)
    /// The binding edge is on the right
    Verso,
}

impl PageSide {
    pub fn flipped(self) -> Self {
        match self {
            PageSide::Recto => PageSide::Verso,
            PageSide::Verso => PageSide::Recto,
        }
    }
}

/// Tracks the side currently being written.
///
/// A new tracker sits on the cover front: one page open, recto side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTracker {
    side: PageSide,
    pages: usize,
}

impl Default for PageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTracker {
    pub fn new() -> Self {
        Self {
            side: PageSide::Recto,
            pages: 1,
        }
    }

    /// Side of the page currently being written
    pub fn side(&self) -> PageSide {
        self.side
    }

    /// Page sides opened so far, the current one included
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Start a new page side (page or section break)
    pub fn advance(&mut self) -> PageSide {
        self.side = self.side.flipped();
        self.pages += 1;
        self.side
    }

    /// Write `plan` starting on the current page.
    ///
    /// The current page must be the section's first side; afterwards the
    /// tracker sits on the section's last side.
    pub fn fill(&mut self, plan: &SectionPlan) {
        for _ in 1..plan.total_sides() {
            self.advance();
        }
    }
}

/// Sections of the planner, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Cover,
    Instructions,
    Calendar,
    TableOfContents,
    Goals,
    Backlog,
    WeekPlanner,
    /// One month: cover, blank verso and the daily spread (1-based month)
    Month(u32),
    Terms,
    GraphPaper,
    RearCover,
}

impl SectionKind {
    pub fn name(&self) -> String {
        match self {
            SectionKind::Cover => "Cover".to_string(),
            SectionKind::Instructions => "Instructions".to_string(),
            SectionKind::Calendar => "Calendar".to_string(),
            SectionKind::TableOfContents => "Table of Contents".to_string(),
            SectionKind::Goals => "Goals".to_string(),
            SectionKind::Backlog => "Backlog".to_string(),
            SectionKind::WeekPlanner => "Week Planner".to_string(),
            SectionKind::Month(month) => crate::calendar::month_name(*month).to_string(),
            SectionKind::Terms => "Terms and Definitions".to_string(),
            SectionKind::GraphPaper => "Graph Paper".to_string(),
            SectionKind::RearCover => "Rear Cover".to_string(),
        }
    }
}

/// Page-side footprint of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPlan {
    pub kind: SectionKind,
    /// Sides carrying section content (blank versos built into the layout count here)
    pub content_sides: usize,
    /// Trailing blank versos added to end the section on a verso (0 or 1)
    pub padding_sides: usize,
}

impl SectionPlan {
    /// Section whose content count is padded to an even number of sides
    pub fn padded(kind: SectionKind, content_sides: usize) -> Self {
        Self {
            kind,
            content_sides,
            padding_sides: content_sides % 2,
        }
    }

    /// Section whose layout is already symmetric
    pub fn fixed(kind: SectionKind, content_sides: usize) -> Self {
        debug_assert!(content_sides % 2 == 0, "fixed sections must be even");
        Self {
            kind,
            content_sides,
            padding_sides: 0,
        }
    }

    pub fn total_sides(&self) -> usize {
        self.content_sides + self.padding_sides
    }

    pub fn needs_blank_verso(&self) -> bool {
        self.padding_sides > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_starts_on_recto() {
        let tracker = PageTracker::new();
        assert_eq!(tracker.side(), PageSide::Recto);
        assert_eq!(tracker.pages(), 1);
    }

    #[test]
    fn test_padded_section_ends_on_verso() {
        for sides in 1..10 {
            let plan = SectionPlan::padded(SectionKind::Backlog, sides);
            assert_eq!(plan.total_sides() % 2, 0);

            let mut tracker = PageTracker::new();
            tracker.fill(&plan);
            assert_eq!(tracker.side(), PageSide::Verso);
        }
    }
}
