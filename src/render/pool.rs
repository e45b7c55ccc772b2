//! Fixed pool of recyclable row slots plus one slot per column.
//!
//! Row slots are created once and rebound to a new logical row every render
//! pass; rebinding only mutates `bound` and calls setters on the handles.
//! Elements are created or discarded only when the column count changes and
//! at teardown.

use crate::error::Result;

use super::backend::{ElementKind, RenderHandle, RenderSurface};

/// One recyclable row: body, header, bottom anchor and a cell per column.
#[derive(Debug)]
pub struct RowSlot<H> {
    slot_id: usize,
    pub(crate) bound: Option<u32>,
    pub(crate) body: H,
    pub(crate) header: H,
    pub(crate) anchor: H,
    pub(crate) cells: Vec<H>,
}

impl<H> RowSlot<H> {
    /// Stable id, `0..pool size`.
    pub fn slot_id(&self) -> usize {
        self.slot_id
    }

    /// Logical row currently shown, if any.
    pub fn bound(&self) -> Option<u32> {
        self.bound
    }

    pub fn body(&self) -> &H {
        &self.body
    }

    pub fn header(&self) -> &H {
        &self.header
    }

    pub fn anchor(&self) -> &H {
        &self.anchor
    }

    pub fn cell(&self, col: u32) -> Option<&H> {
        self.cells.get(col as usize)
    }
}

impl<H: RenderHandle> RowSlot<H> {
    pub(crate) fn bind(&mut self, index: Option<u32>) {
        self.bound = index;
        self.body.set_binding(index);
        self.header.set_binding(index);
        self.anchor.set_binding(index);
    }

    pub(crate) fn hide(&mut self) {
        self.body.set_visible(false);
        self.header.set_visible(false);
        self.anchor.set_visible(false);
    }
}

/// Header and anchor of one column. Column slot `j` always shows column `j`.
#[derive(Debug)]
pub struct ColumnSlot<H> {
    pub(crate) header: H,
    pub(crate) anchor: H,
}

impl<H> ColumnSlot<H> {
    pub fn header(&self) -> &H {
        &self.header
    }

    pub fn anchor(&self) -> &H {
        &self.anchor
    }
}

/// Every element the grid owns.
#[derive(Debug)]
pub struct ElementPool<H> {
    pub(crate) rows: Vec<RowSlot<H>>,
    pub(crate) columns: Vec<ColumnSlot<H>>,
    pub(crate) top_sentinel: H,
    pub(crate) bottom_sentinel: H,
}

impl<H: RenderHandle> ElementPool<H> {
    /// Create `row_slots` row slots and `column_count` columns on `surface`.
    pub fn build<S>(surface: &mut S, row_slots: usize, column_count: u32) -> Result<Self>
    where
        S: RenderSurface<Handle = H>,
    {
        let mut columns = Vec::with_capacity(column_count as usize);
        for _ in 0..column_count {
            columns.push(create_column(surface)?);
        }

        let mut rows = Vec::with_capacity(row_slots);
        for slot_id in 0..row_slots {
            let body = surface.create(ElementKind::RowBody, Some(slot_id), None)?;
            let header = surface.create(ElementKind::RowHeader, Some(slot_id), None)?;
            let anchor = surface.create(ElementKind::RowAnchor, Some(slot_id), None)?;
            let mut cells = Vec::with_capacity(column_count as usize);
            for _ in 0..column_count {
                cells.push(surface.create(ElementKind::Cell, Some(slot_id), Some(&body))?);
            }
            let mut slot = RowSlot {
                slot_id,
                bound: None,
                body,
                header,
                anchor,
                cells,
            };
            slot.hide();
            rows.push(slot);
        }

        let top_sentinel = surface.create(ElementKind::TopSentinel, None, None)?;
        let bottom_sentinel = surface.create(ElementKind::BottomSentinel, None, None)?;

        Ok(Self {
            rows,
            columns,
            top_sentinel,
            bottom_sentinel,
        })
    }

    /// Number of row slots.
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_slot(&self, slot_id: usize) -> Option<&RowSlot<H>> {
        self.rows.get(slot_id)
    }

    pub fn row_slots(&self) -> impl Iterator<Item = &RowSlot<H>> + '_ {
        self.rows.iter()
    }

    pub fn column_slot(&self, col: u32) -> Option<&ColumnSlot<H>> {
        self.columns.get(col as usize)
    }

    /// Logical row bound to `slot_id`, read at call time.
    pub fn bound_row(&self, slot_id: usize) -> Option<u32> {
        self.rows.get(slot_id).and_then(RowSlot::bound)
    }

    /// Slot currently showing logical row `row`.
    pub fn slot_of_row(&self, row: u32) -> Option<usize> {
        self.rows
            .iter()
            .find(|slot| slot.bound == Some(row))
            .map(|slot| slot.slot_id)
    }

    /// Logical rows bound across all slots, in slot order.
    pub fn bindings(&self) -> Vec<u32> {
        self.rows.iter().filter_map(RowSlot::bound).collect()
    }

    pub fn top_sentinel(&self) -> &H {
        &self.top_sentinel
    }

    pub fn bottom_sentinel(&self) -> &H {
        &self.bottom_sentinel
    }

    /// Add one column slot and one cell to every row slot. New elements are
    /// appended; column geometry is rewritten by the next column pass.
    pub fn push_column<S>(&mut self, surface: &mut S) -> Result<()>
    where
        S: RenderSurface<Handle = H>,
    {
        self.columns.push(create_column(surface)?);
        for slot in &mut self.rows {
            let cell = surface.create(ElementKind::Cell, Some(slot.slot_id), Some(&slot.body))?;
            slot.cells.push(cell);
        }
        Ok(())
    }

    /// Discard the last column slot and the last cell of every row slot.
    pub fn pop_column<S>(&mut self, surface: &mut S)
    where
        S: RenderSurface<Handle = H>,
    {
        if let Some(column) = self.columns.pop() {
            surface.discard(column.header);
            surface.discard(column.anchor);
        }
        for slot in &mut self.rows {
            if let Some(cell) = slot.cells.pop() {
                surface.discard(cell);
            }
        }
    }

    /// Discard every element. Returns how many were discarded.
    pub fn teardown<S>(self, surface: &mut S) -> usize
    where
        S: RenderSurface<Handle = H>,
    {
        let mut discarded = 0;
        for column in self.columns {
            surface.discard(column.header);
            surface.discard(column.anchor);
            discarded += 2;
        }
        for slot in self.rows {
            for cell in slot.cells {
                surface.discard(cell);
                discarded += 1;
            }
            surface.discard(slot.body);
            surface.discard(slot.header);
            surface.discard(slot.anchor);
            discarded += 3;
        }
        surface.discard(self.top_sentinel);
        surface.discard(self.bottom_sentinel);
        discarded + 2
    }
}

fn create_column<S: RenderSurface>(surface: &mut S) -> Result<ColumnSlot<S::Handle>> {
    Ok(ColumnSlot {
        header: surface.create(ElementKind::ColumnHeader, None, None)?,
        anchor: surface.create(ElementKind::ColumnAnchor, None, None)?,
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::render::headless::HeadlessSurface;

    #[test]
    fn build_creates_every_element_once() {
        let mut surface = HeadlessSurface::new();
        let pool = ElementPool::build(&mut surface, 4, 3).unwrap();
        // 3 columns * 2 + 4 rows * (3 + 3 cells) + 2 sentinels
        assert_eq!(surface.created(), 6 + 24 + 2);
        assert_eq!(pool.capacity(), 4);
        assert!(pool.bindings().is_empty());
        assert!(pool.row_slots().all(|slot| !slot.body().visible));
    }

    #[test]
    fn column_changes_touch_every_row_slot() {
        let mut surface = HeadlessSurface::new();
        let mut pool = ElementPool::build(&mut surface, 2, 2).unwrap();
        let before = surface.created();

        pool.push_column(&mut surface).unwrap();
        assert_eq!(surface.created(), before + 2 + 2);
        assert_eq!(pool.column_count(), 3);
        assert!(pool.row_slot(1).unwrap().cell(2).is_some());

        pool.pop_column(&mut surface);
        assert_eq!(surface.discarded(), 4);
        assert!(pool.row_slot(1).unwrap().cell(2).is_none());
    }

    #[test]
    fn teardown_discards_everything_created() {
        let mut surface = HeadlessSurface::new();
        let pool = ElementPool::build(&mut surface, 5, 4).unwrap();
        let created = surface.created();
        assert_eq!(pool.teardown(&mut surface), created);
        assert_eq!(surface.discarded(), created);
    }
}
