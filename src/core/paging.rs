/// Browse position. Pages are 1-based and never drop below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pager {
    pub fn new(page: u32) -> Self {
        Self { page: page.max(1) }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Returns `false` when already on the first page.
    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn label(&self) -> String {
        format!("PAGE {}", self.page)
    }
}
