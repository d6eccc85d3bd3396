//! Greedy first-fit pagination.

use consign_shared::types::LayoutConfig;
use serde::Serialize;

use super::estimator::{EntryHeights, HeightEstimator};

/// Splits an ordered item list into pages of bounded estimated height.
#[derive(Debug, Clone)]
pub struct Paginator<E> {
    capacity: u32,
    summary_reserve: u32,
    estimator: E,
}

/// A contiguous run of items, before it becomes a [`Page`].
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    len: usize,
    height: u32,
    last_height: u32,
}

impl Span {
    const fn open(start: usize, height: u32) -> Self {
        Self {
            start,
            len: 1,
            height,
            last_height: height,
        }
    }

    const fn end(&self) -> usize {
        self.start + self.len
    }
}

impl<E> Paginator<E> {
    /// Creates a paginator.
    ///
    /// `capacity` is the content height of every page; `summary_reserve` is
    /// withheld on the last page only.
    #[must_use]
    pub const fn new(capacity: u32, summary_reserve: u32, estimator: E) -> Self {
        Self {
            capacity,
            summary_reserve,
            estimator,
        }
    }

    /// Content height of every page.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Content height of the last page once the summary is reserved.
    #[must_use]
    pub const fn last_page_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.summary_reserve)
    }

    /// Partitions `items` into pages.
    ///
    /// Items are placed greedily: a page is closed as soon as the next item
    /// would push it past capacity. A page never starts empty, so an item
    /// taller than a whole page sits alone on an oversized page.
    ///
    /// The last page must also leave room for the summary. If it does not
    /// and holds more than one item, its last item moves to a new trailing
    /// page by itself.
    ///
    /// Concatenating the pages always reproduces `items` in order.
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> PageSet<'a, T>
    where
        E: HeightEstimator<T>,
    {
        let mut spans: Vec<Span> = Vec::new();
        let mut current: Option<Span> = None;

        for (index, item) in items.iter().enumerate() {
            let height = self.estimator.estimate(item);
            current = Some(match current {
                Some(mut span) if span.height.saturating_add(height) <= self.capacity => {
                    span.len += 1;
                    span.height = span.height.saturating_add(height);
                    span.last_height = height;
                    span
                }
                Some(span) => {
                    spans.push(span);
                    Span::open(index, height)
                }
                None => Span::open(index, height),
            });
        }

        let mut moved_last = false;
        if let Some(mut last) = current {
            if last.len > 1 && last.height > self.last_page_capacity() {
                last.len -= 1;
                last.height -= last.last_height;
                let trailing = Span::open(last.end(), last.last_height);
                spans.push(last);
                spans.push(trailing);
                moved_last = true;
            } else {
                spans.push(last);
            }
        }

        let total = spans.len();
        let pages: Vec<Page<'a, T>> = spans
            .into_iter()
            .enumerate()
            .map(|(index, span)| Page {
                number: index + 1,
                start: span.start,
                entries: &items[span.start..span.end()],
                height: span.height,
                is_last: index + 1 == total,
            })
            .collect();

        tracing::debug!(
            items = items.len(),
            pages = pages.len(),
            capacity = self.capacity,
            summary_reserve = self.summary_reserve,
            moved_last,
            "Items paginated"
        );

        PageSet { pages }
    }
}

impl Paginator<EntryHeights> {
    /// Creates an entry paginator from page geometry.
    #[must_use]
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        Self::new(
            layout.content_capacity(),
            layout.summary_reserve,
            EntryHeights::from(layout),
        )
    }
}

/// One page: a contiguous slice of the paginated items.
#[derive(Debug, Serialize)]
#[serde(bound = "")]
pub struct Page<'a, T> {
    number: usize,
    start: usize,
    #[serde(skip)]
    entries: &'a [T],
    height: u32,
    is_last: bool,
}

impl<'a, T> Page<'a, T> {
    /// 1-based page number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Index of the first item of this page in the paginated list.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Items on this page.
    #[must_use]
    pub const fn entries(&self) -> &'a [T] {
        self.entries
    }

    /// Accumulated estimated height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns true for the page that carries the summary.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.is_last
    }
}

// Manual impls: a derive would require `T: Clone`.
impl<T> Clone for Page<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Page<'_, T> {}

/// Ordered pages produced by one [`Paginator::paginate`] call.
#[derive(Debug, Serialize)]
#[serde(transparent, bound = "")]
pub struct PageSet<'a, T> {
    pages: Vec<Page<'a, T>>,
}

impl<'a, T> PageSet<'a, T> {
    /// Number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Returns true when there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The page carrying the summary.
    #[must_use]
    pub fn last(&self) -> Option<&Page<'a, T>> {
        self.pages.last()
    }

    /// Pages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Page<'a, T>> {
        self.pages.iter()
    }

    /// All items, in page order.
    pub fn entries(&self) -> impl Iterator<Item = &'a T> {
        self.pages.iter().flat_map(|page| page.entries.iter())
    }
}

impl<'s, 'a, T> IntoIterator for &'s PageSet<'a, T> {
    type Item = &'s Page<'a, T>;
    type IntoIter = std::slice::Iter<'s, Page<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
