//! The scene store: exclusive owner of every placed item.
//!
//! Items are kept in insertion order with an id → slot index for O(1)
//! lookup (text edits hit this on every keystroke). Render order is by
//! `z_index`, which only ever grows: adds, duplicates and selections take
//! `max + 1`, so the most recently touched item is always on top.

use crate::config::BoardConfig;
use crate::error::{SceneError, SceneResult};
use crate::id::ItemId;
use crate::layout::GridSpec;
use crate::model::*;
use std::collections::HashMap;

/// Outcome of ending a text edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommit {
    /// The item stays on the board.
    Kept,
    /// The item was an abandoned empty add and has been deleted.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct SceneStore {
    items: Vec<SceneItem>,
    index: HashMap<ItemId, usize>,
    selected: Option<ItemId>,
    config: BoardConfig,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl SceneStore {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            selected: None,
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&SceneItem> {
        self.index.get(&id).map(|&slot| &self.items[slot])
    }

    fn get_mut(&mut self, id: ItemId) -> SceneResult<&mut SceneItem> {
        match self.index.get(&id) {
            Some(&slot) => Ok(&mut self.items[slot]),
            None => Err(SceneError::NotFound(id)),
        }
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneItem> {
        self.items.iter()
    }

    /// Items in paint order (ascending z; ties keep insertion order).
    pub fn iter_by_z(&self) -> Vec<&SceneItem> {
        let mut ordered: Vec<&SceneItem> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.z_index);
        ordered
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&SceneItem> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn max_z(&self) -> Option<i64> {
        self.items.iter().map(|item| item.z_index).max()
    }

    fn next_z(&self) -> i64 {
        self.max_z().map_or(0, |z| z + 1)
    }

    /// Default center for an item added without an explicit position.
    fn spawn_position(&self) -> Point {
        let cascade = self.config.spawn_cascade.max(1) as usize;
        let step = (self.items.len() % cascade) as f32;
        Point::new(
            self.config.spawn_point.x + self.config.spawn_step.dx * step,
            self.config.spawn_point.y + self.config.spawn_step.dy * step,
        )
    }

    // ─── Creation / destruction ──────────────────────────────────────────

    fn insert(&mut self, item: SceneItem) -> ItemId {
        let id = item.id;
        self.index.insert(id, self.items.len());
        self.items.push(item);
        id
    }

    /// Place a new item with a fresh id on top of everything else.
    pub fn add(&mut self, new_item: NewItem) -> ItemId {
        let min = self.config.min_item_size;
        let (kind, position, size) = match new_item {
            NewItem::Image {
                source,
                title,
                position,
                size,
            } => (
                ItemKind::Image { source, title },
                position,
                size.unwrap_or(self.config.image_size),
            ),
            NewItem::Text {
                text,
                style,
                position,
                size,
            } => {
                let committed = !text.trim().is_empty();
                (
                    ItemKind::Text(TextContent {
                        text,
                        style,
                        committed,
                    }),
                    position,
                    size.unwrap_or(self.config.text_size),
                )
            }
        };

        let item = SceneItem {
            id: ItemId::generate(SceneItem::id_prefix(&kind)),
            position: position.unwrap_or_else(|| self.spawn_position()),
            size: size.at_least(min),
            rotation: 0.0,
            z_index: self.next_z(),
            kind,
        };
        log::debug!("add {} at ({}, {}) z={}", item.id, item.position.x, item.position.y, item.z_index);
        self.insert(item)
    }

    /// The "add text" action: an empty, never-committed text block.
    ///
    /// Typography comes from the caller (the ambient font preference),
    /// never from global state.
    pub fn add_text(&mut self, style: &TextStyle) -> ItemId {
        self.add(NewItem::Text {
            text: String::new(),
            style: style.clone(),
            position: None,
            size: None,
        })
    }

    /// Delete an item. Absent ids are a no-op so stale UI callbacks are safe.
    pub fn remove(&mut self, id: ItemId) -> Option<SceneItem> {
        let slot = self.index.remove(&id)?;
        let removed = self.items.remove(slot);
        for item in &self.items[slot..] {
            if let Some(s) = self.index.get_mut(&item.id) {
                *s -= 1;
            }
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("remove {id}");
        Some(removed)
    }

    /// Copy an item with a new id, offset so it is visibly distinct, on top.
    ///
    /// # Errors
    /// `NotFound` if `id` is not on the board.
    pub fn duplicate(&mut self, id: ItemId) -> SceneResult<ItemId> {
        let source = self.get(id).ok_or(SceneError::NotFound(id))?;
        let mut copy = source.clone();
        copy.id = ItemId::generate(SceneItem::id_prefix(&copy.kind));
        copy.position = copy.position.offset(self.config.duplicate_offset);
        copy.z_index = self.next_z();
        // A copy starts life with its content; it is never an abandoned add.
        if let ItemKind::Text(content) = &mut copy.kind {
            content.committed = !content.is_blank();
        }
        log::debug!("duplicate {id} -> {}", copy.id);
        Ok(self.insert(copy))
    }

    /// Remove everything. Confirmation is the caller's job.
    pub fn clear_all(&mut self) {
        log::debug!("clear all ({} items)", self.items.len());
        self.items.clear();
        self.index.clear();
        self.selected = None;
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Set the selection. A known id is raised to the front on every call,
    /// including re-selection; an unknown id selects nothing.
    pub fn select(&mut self, id: Option<ItemId>) -> Option<ItemId> {
        let target = id.filter(|id| self.contains(*id));
        if let Some(target) = target {
            let z = self.next_z();
            if let Ok(item) = self.get_mut(target) {
                item.z_index = z;
            }
        }
        self.selected = target;
        target
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    /// Set the center directly (fires on every drag sample).
    ///
    /// # Errors
    /// `NotFound` if `id` is not on the board.
    pub fn move_to(&mut self, id: ItemId, point: Point) -> SceneResult<()> {
        let item = self.get_mut(id)?;
        item.position = point;
        log::trace!("move {id} -> ({}, {})", point.x, point.y);
        Ok(())
    }

    /// Resize relative to the item's current size.
    ///
    /// # Errors
    /// `NotFound` if `id` is not on the board.
    pub fn resize(&mut self, id: ItemId, handle: ResizeHandle, delta: Vector) -> SceneResult<Size> {
        let start = self.get(id).ok_or(SceneError::NotFound(id))?.size;
        self.resize_from(id, handle, start, delta)
    }

    /// Resize relative to a captured gesture-start size.
    ///
    /// Calling this repeatedly with growing deltas from the same `start`
    /// never compounds clamping, so dropped or coalesced pointer samples
    /// can't make the item drift.
    ///
    /// # Errors
    /// `NotFound` if `id` is not on the board.
    pub fn resize_from(
        &mut self,
        id: ItemId,
        handle: ResizeHandle,
        start: Size,
        delta: Vector,
    ) -> SceneResult<Size> {
        let min = self.config.min_item_size;
        let item = self.get_mut(id)?;
        item.size = handle.apply(start, delta, min);
        log::trace!("resize {id} {} -> {:?}", handle.as_str(), item.size);
        Ok(item.size)
    }

    /// Add to the rotation, normalized into `[0, 360)`.
    ///
    /// # Errors
    /// `NotFound` if `id` is not on the board.
    pub fn rotate(&mut self, id: ItemId, delta_degrees: f32) -> SceneResult<f32> {
        let item = self.get_mut(id)?;
        item.rotation = normalize_rotation(item.rotation + delta_degrees);
        Ok(item.rotation)
    }

    /// Reposition every item into row-major grid cells (insertion order).
    pub fn arrange_grid(&mut self, container_width: f32) {
        let grid = GridSpec::fit(container_width, self.config.grid_origin, self.config.grid_cell);
        for (i, item) in self.items.iter_mut().enumerate() {
            item.position = grid.position(i);
        }
        log::debug!("arrange {} items in {} columns", self.items.len(), grid.columns);
    }

    // ─── Text ────────────────────────────────────────────────────────────

    fn text_mut(&mut self, id: ItemId) -> SceneResult<&mut TextContent> {
        self.get_mut(id)?.text_mut().ok_or(SceneError::NotText(id))
    }

    /// Live text update; called on every keystroke.
    ///
    /// # Errors
    /// `NotFound` for absent ids, `NotText` for image items.
    pub fn set_text(&mut self, id: ItemId, text: &str) -> SceneResult<()> {
        let content = self.text_mut(id)?;
        text.clone_into(&mut content.text);
        Ok(())
    }

    /// Replace the typography of a text block.
    ///
    /// # Errors
    /// `NotFound` for absent ids, `NotText` for image items.
    pub fn set_text_style(&mut self, id: ItemId, style: TextStyle) -> SceneResult<()> {
        self.text_mut(id)?.style = style;
        Ok(())
    }

    /// End a text edit. An item that is still blank and never had content
    /// committed is the artifact of an abandoned add and gets deleted.
    ///
    /// # Errors
    /// `NotFound` for absent ids, `NotText` for image items.
    pub fn commit_text(&mut self, id: ItemId) -> SceneResult<TextCommit> {
        let content = self.text_mut(id)?;
        if content.is_blank() {
            if !content.committed {
                self.remove(id);
                log::debug!("discard abandoned text {id}");
                return Ok(TextCommit::Discarded);
            }
        } else {
            content.committed = true;
        }
        Ok(TextCommit::Kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image_at(store: &mut SceneStore, x: f32, y: f32) -> ItemId {
        store.add(NewItem::image("https://example.com/a.jpg").at(Point::new(x, y)))
    }

    #[test]
    fn add_assigns_increasing_z() {
        let mut store = SceneStore::default();
        let a = image_at(&mut store, 0.0, 0.0);
        let b = image_at(&mut store, 10.0, 10.0);
        assert_eq!(store.get(a).unwrap().z_index, 0);
        assert_eq!(store.get(b).unwrap().z_index, 1);
        assert_eq!(store.get(b).unwrap().size, Size::new(200.0, 200.0));
        assert_eq!(store.get(b).unwrap().rotation, 0.0);
    }

    #[test]
    fn spawn_cascades_without_position() {
        let mut store = SceneStore::default();
        let a = store.add(NewItem::image("a.png"));
        let b = store.add(NewItem::image("b.png"));
        let pa = store.get(a).unwrap().position;
        let pb = store.get(b).unwrap().position;
        assert_eq!(pb, Point::new(pa.x + 20.0, pa.y + 20.0));
    }

    #[test]
    fn remove_clears_selection() {
        let mut store = SceneStore::default();
        let a = image_at(&mut store, 0.0, 0.0);
        store.select(Some(a));
        assert!(store.remove(a).is_some());
        assert_eq!(store.selected(), None);
        assert!(store.remove(a).is_none());
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut store = SceneStore::default();
        let a = image_at(&mut store, 0.0, 0.0);
        let b = image_at(&mut store, 1.0, 0.0);
        let c = image_at(&mut store, 2.0, 0.0);
        store.remove(a);
        assert_eq!(store.get(b).unwrap().position.x, 1.0);
        assert_eq!(store.get(c).unwrap().position.x, 2.0);
        store.move_to(c, Point::new(9.0, 9.0)).unwrap();
        assert_eq!(store.ids(), vec![b, c]);
    }

    #[test]
    fn select_unknown_selects_none() {
        let mut store = SceneStore::default();
        let a = image_at(&mut store, 0.0, 0.0);
        store.select(Some(a));
        store.remove(a);
        let b = image_at(&mut store, 0.0, 0.0);
        store.select(Some(b));
        assert_eq!(store.select(Some(a)), None);
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn reselect_still_raises() {
        let mut store = SceneStore::default();
        let a = image_at(&mut store, 0.0, 0.0);
        store.select(Some(a));
        let z1 = store.get(a).unwrap().z_index;
        store.select(Some(a));
        assert_eq!(store.get(a).unwrap().z_index, z1 + 1);
    }

    #[test]
    fn set_text_rejects_images() {
        let mut store = SceneStore::default();
        let a = image_at(&mut store, 0.0, 0.0);
        assert_eq!(store.set_text(a, "hi"), Err(SceneError::NotText(a)));
    }

    #[test]
    fn committed_text_survives_being_emptied() {
        let mut store = SceneStore::default();
        let t = store.add_text(&TextStyle::default());
        store.set_text(t, "Headline").unwrap();
        assert_eq!(store.commit_text(t), Ok(TextCommit::Kept));
        store.set_text(t, "").unwrap();
        assert_eq!(store.commit_text(t), Ok(TextCommit::Kept));
        assert!(store.contains(t));
    }

    #[test]
    fn whitespace_only_text_is_abandoned() {
        let mut store = SceneStore::default();
        let t = store.add_text(&TextStyle::default());
        store.set_text(t, "   ").unwrap();
        assert_eq!(store.commit_text(t), Ok(TextCommit::Discarded));
        assert!(store.is_empty());
    }

    #[test]
    fn duplicated_draft_text_counts_as_committed() {
        let mut store = SceneStore::default();
        let t = store.add_text(&TextStyle::default());
        store.set_text(t, "Hello").unwrap();
        let copy = store.duplicate(t).unwrap();
        assert!(store.get(copy).unwrap().text().unwrap().committed);

        store.set_text(copy, "").unwrap();
        assert_eq!(store.commit_text(copy).unwrap(), TextCommit::Kept);
        assert!(store.contains(copy));
    }

    #[test]
    fn text_style_comes_from_caller() {
        let mut store = SceneStore::default();
        let style = TextStyle {
            font_family: "Playfair Display".into(),
            ..TextStyle::default()
        };
        let t = store.add_text(&style);
        let content = store.get(t).unwrap().text().unwrap();
        assert_eq!(content.style.font_family, "Playfair Display");
        assert_eq!(content.style.font_size, 18.0);
        assert!(!content.committed);
    }

    #[test]
    fn iter_by_z_paints_lowest_first() {
        let mut store = SceneStore::default();
        let a = image_at(&mut store, 0.0, 0.0);
        let b = image_at(&mut store, 0.0, 0.0);
        store.select(Some(a));
        let order: Vec<ItemId> = store.iter_by_z().iter().map(|i| i.id).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn clear_all_empties_everything() {
        let mut store = SceneStore::default();
        let a = image_at(&mut store, 0.0, 0.0);
        store.select(Some(a));
        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.selected(), None);
        assert_eq!(store.max_z(), None);
    }
}
