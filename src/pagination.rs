//! Fixed-size offset pagination

/// Number of books on one page
pub const BOOKS_PER_SHELF: usize = 8;

/// A 1-based page index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    /// Parse the `page` query parameter; missing or non-numeric input
    /// falls back to the first page. Integers beyond `i64` saturate, so
    /// they stay out of range instead of wrapping back to page 1.
    pub fn from_param(param: Option<&str>) -> Self {
        param.and_then(parse_saturating).map(Self).unwrap_or_default()
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    /// Index of the first element on this page, or `None` when the page
    /// lies before the start of any collection.
    fn start(&self) -> Option<usize> {
        let index = usize::try_from(self.0.checked_sub(1)?).ok()?;
        index.checked_mul(BOOKS_PER_SHELF)
    }

    /// Clone the elements of `items` that fall on this page.
    ///
    /// Pages past the end (or below 1) yield an empty vector.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        match self.start() {
            Some(start) if start < items.len() => {
                let end = (start + BOOKS_PER_SHELF).min(items.len());
                items[start..end].to_vec()
            }
            _ => Vec::new(),
        }
    }
}

fn parse_saturating(param: &str) -> Option<i64> {
    let param = param.trim();
    if let Ok(n) = param.parse::<i64>() {
        return Some(n);
    }
    let (negative, digits) = match param.as_bytes().first()? {
        b'-' => (true, &param[1..]),
        b'+' => (false, &param[1..]),
        _ => (false, param),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}
