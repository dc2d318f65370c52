//! Ordered item collection with unique content.

use stack_core::{ConfigError, ContentId, Item, ItemBuilder};

/// Ordered sequence of stack items. Each content handle appears at most once.
///
/// Every mutating call either succeeds completely or leaves the list as it
/// was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemList {
    items: Vec<Item>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from items, rejecting duplicate content.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, ConfigError> {
        let mut list = Self::new();
        for item in items {
            list.push(item)?;
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn contains(&self, content: ContentId) -> bool {
        self.position(content).is_some()
    }

    /// Index of the item holding `content`.
    pub fn position(&self, content: ContentId) -> Option<usize> {
        self.items.iter().position(|item| item.content() == content)
    }

    /// Append an item.
    pub fn push(&mut self, item: Item) -> Result<(), ConfigError> {
        self.check_unique(&item, None)?;
        self.items.push(item);
        Ok(())
    }

    /// Insert an item at `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, item: Item) -> Result<(), ConfigError> {
        if index > self.items.len() {
            return Err(ConfigError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        self.check_unique(&item, None)?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove and return the last item.
    pub fn pop(&mut self) -> Option<Item> {
        self.items.pop()
    }

    /// Remove the item at `index`. An invalid index is not an error.
    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove the item holding `content`, if any.
    pub fn remove_content(&mut self, content: ContentId) -> Option<Item> {
        let index = self.position(content)?;
        Some(self.items.remove(index))
    }

    /// Remove an item equal to `item`, if any.
    pub fn remove_item(&mut self, item: &Item) -> Option<Item> {
        let index = self.items.iter().position(|existing| existing == item)?;
        Some(self.items.remove(index))
    }

    /// Replace the item at `index`, returning the old one.
    ///
    /// The new item may reuse the replaced item's content.
    pub fn replace_at(&mut self, index: usize, item: Item) -> Result<Item, ConfigError> {
        self.check_index(index)?;
        self.check_unique(&item, Some(index))?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    /// Replace the item equal to `old`. Returns `None` when `old` is absent.
    pub fn replace_item(&mut self, old: &Item, item: Item) -> Result<Option<Item>, ConfigError> {
        match self.items.iter().position(|existing| existing == old) {
            Some(index) => self.replace_at(index, item).map(Some),
            None => Ok(None),
        }
    }

    /// Rebuild the item at `index` through its builder.
    ///
    /// Returns whether the item changed. An unchanged result leaves the list
    /// untouched.
    pub fn configure_at<F>(&mut self, index: usize, configure: F) -> Result<bool, ConfigError>
    where
        F: FnOnce(ItemBuilder) -> ItemBuilder,
    {
        self.check_index(index)?;
        let updated = configure(self.items[index].to_builder()).build()?;
        if updated == self.items[index] {
            return Ok(false);
        }
        self.replace_at(index, updated)?;
        Ok(true)
    }

    pub fn configure_first<F>(&mut self, configure: F) -> Result<bool, ConfigError>
    where
        F: FnOnce(ItemBuilder) -> ItemBuilder,
    {
        self.configure_at(0, configure)
    }

    pub fn configure_last<F>(&mut self, configure: F) -> Result<bool, ConfigError>
    where
        F: FnOnce(ItemBuilder) -> ItemBuilder,
    {
        // An empty list reports index 0 out of bounds
        let index = self.items.len().saturating_sub(1);
        self.configure_at(index, configure)
    }

    fn check_index(&self, index: usize) -> Result<(), ConfigError> {
        if index >= self.items.len() {
            return Err(ConfigError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    fn check_unique(&self, item: &Item, replacing: Option<usize>) -> Result<(), ConfigError> {
        match self.position(item.content()) {
            Some(index) if Some(index) != replacing => Err(ConfigError::DuplicateContent {
                content: item.content(),
            }),
            _ => Ok(()),
        }
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
