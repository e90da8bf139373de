//! A cursor is a `(page_num, cell_num, end_of_table)` position in the tree.
//! It is the only way higher layers read from or insert into the B+ tree.
use std::process::exit;

use log::debug;

use crate::{
    errors::ExecuteError,
    node::{LEAF_NODE_LEFT_SPLIT_COUNT, LEAF_NODE_MAX_CELLS, LEAF_NODE_RIGHT_SPLIT_COUNT},
    row::Row,
    table::Table,
};

pub struct Cursor<'a> {
    pub table: &'a mut Table,
    page_num: u32,
    pub cell_num: u32,
    pub end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub fn table_start(table: &'a mut Table) -> Self {
        let mut cursor = Cursor::table_find(table, 0);

        let node = cursor.table.pager.get_page(cursor.page_num);
        cursor.end_of_table = *node.leaf_node_num_cells() == 0;
        cursor
    }

    /// Returns the position of `key`, or the position it should be
    /// inserted at if absent.
    pub fn table_find(table: &'a mut Table, key: u32) -> Self {
        let root_page_num = table.root_page_num;
        let root_node = table.pager.get_page(root_page_num);

        if root_node.is_leaf() {
            Cursor::leaf_node_find(table, root_page_num, key)
        } else {
            Cursor::internal_node_find(table, root_page_num, key)
        }
    }

    fn leaf_node_find(table: &'a mut Table, page_num: u32, key: u32) -> Self {
        let node = table.pager.get_page(page_num);
        let num_cells = *node.leaf_node_num_cells();

        // Binary search among cells for the first key >= target.
        let mut min_index = 0;
        let mut one_past_max_index = num_cells;

        while min_index != one_past_max_index {
            let index = (min_index + one_past_max_index) / 2;
            let key_at_index = *node.leaf_node_key(index);

            if key == key_at_index {
                return Self {
                    table,
                    page_num,
                    cell_num: index,
                    end_of_table: false,
                };
            } else if key < key_at_index {
                one_past_max_index = index;
            } else {
                min_index = index + 1;
            }
        }

        Self {
            table,
            page_num,
            cell_num: min_index,
            end_of_table: false,
        }
    }

    fn internal_node_find(table: &'a mut Table, page_num: u32, key: u32) -> Self {
        let node = table.pager.get_page(page_num);
        let child_index = node.internal_node_find_child(key);
        let child_num = *node.internal_node_child(child_index);
        let child = table.pager.get_page(child_num);

        if child.is_leaf() {
            Cursor::leaf_node_find(table, child_num, key)
        } else {
            Cursor::internal_node_find(table, child_num, key)
        }
    }

    pub fn value(&mut self) -> &mut Row {
        let page_num = self.page_num;
        self.table
            .pager
            .get_page(page_num)
            .leaf_node_value(self.cell_num)
    }

    pub fn advance(&mut self) {
        let node = self.table.pager.get_page(self.page_num);
        self.cell_num += 1;

        if self.cell_num >= *node.leaf_node_num_cells() {
            let next_page_num = *node.leaf_node_next_leaf();

            if next_page_num == 0 {
                self.end_of_table = true;
            } else {
                self.page_num = next_page_num;
                self.cell_num = 0;
            }
        }
    }

    /// Inserts `(key, row)` at the cursor's position. Fails with
    /// `DuplicateKey` (no write) if a cell with the same key already sits
    /// there.
    pub fn leaf_insert(&mut self, key: u32, row: Row) -> Result<(), ExecuteError> {
        let node = self.table.pager.get_page(self.page_num);
        let num_cells = *node.leaf_node_num_cells();

        if self.cell_num < num_cells && *node.leaf_node_key(self.cell_num) == key {
            return Err(ExecuteError::DuplicateKey);
        }

        if num_cells as usize >= LEAF_NODE_MAX_CELLS {
            self.leaf_split_and_insert(key, row);
            return Ok(());
        }

        if self.cell_num < num_cells {
            // Shift cells right to make room for the new one.
            let mut i = num_cells;
            while i > self.cell_num {
                let prev = std::mem::take(node.leaf_node_cell(i - 1));
                *node.leaf_node_cell(i) = prev;
                i -= 1;
            }
        }

        *node.leaf_node_num_cells() += 1;
        *node.leaf_node_key(self.cell_num) = key;
        *node.leaf_node_value(self.cell_num) = row;
        Ok(())
    }

    /// Creates a new leaf, moves half the cells (plus the incoming one)
    /// over, and either grows a new root or aborts. Propagating a split
    /// into a non-root parent isn't implemented; this is the last stage
    /// before tree rebalancing, so the diagnostic below is load-bearing,
    /// not a stub.
    fn leaf_split_and_insert(&mut self, key: u32, row: Row) {
        let new_page_num = self.table.pager.get_unused_page_num();
        debug!(
            "splitting leaf {} into new page {new_page_num}",
            self.page_num
        );

        let old_node = self.table.pager.get_page(self.page_num);
        let next_leaf = *old_node.leaf_node_next_leaf();
        let old_node_parent = *old_node.parent();
        let old_node_is_root = old_node.is_node_root();
        *old_node.leaf_node_next_leaf() = new_page_num;

        let new_node = self.table.pager.get_page(new_page_num);
        *new_node.leaf_node_next_leaf() = next_leaf;
        *new_node.parent() = old_node_parent;

        // Everything right of the insertion point shifts up by one slot,
        // walking from the highest slot down so nothing is overwritten
        // before it's read.
        for i in (self.cell_num as usize + 1..=LEAF_NODE_MAX_CELLS).rev() {
            let old_node = self.table.pager.get_page(self.page_num);
            let moved = std::mem::take(old_node.leaf_node_cell(i as u32 - 1));
            let destination_node = if i >= LEAF_NODE_LEFT_SPLIT_COUNT {
                self.table.pager.get_page(new_page_num)
            } else {
                self.table.pager.get_page(self.page_num)
            };
            let index_within_node = (i % LEAF_NODE_LEFT_SPLIT_COUNT) as u32;
            *destination_node.leaf_node_cell(index_within_node) = moved;
        }

        let destination_node = if self.cell_num as usize >= LEAF_NODE_LEFT_SPLIT_COUNT {
            self.table.pager.get_page(new_page_num)
        } else {
            self.table.pager.get_page(self.page_num)
        };
        let index_within_node = (self.cell_num as usize % LEAF_NODE_LEFT_SPLIT_COUNT) as u32;
        *destination_node.leaf_node_key(index_within_node) = key;
        *destination_node.leaf_node_value(index_within_node) = row;

        // Everything left of the insertion point keeps its relative order.
        for i in (0..self.cell_num as usize).rev() {
            let old_node = self.table.pager.get_page(self.page_num);
            let moved = std::mem::take(old_node.leaf_node_cell(i as u32));
            let destination_node = if i >= LEAF_NODE_LEFT_SPLIT_COUNT {
                self.table.pager.get_page(new_page_num)
            } else {
                self.table.pager.get_page(self.page_num)
            };
            let index_within_node = (i % LEAF_NODE_LEFT_SPLIT_COUNT) as u32;
            *destination_node.leaf_node_cell(index_within_node) = moved;
        }

        let new_node = self.table.pager.get_page(new_page_num);
        *new_node.leaf_node_num_cells() = LEAF_NODE_RIGHT_SPLIT_COUNT as u32;

        let old_node = self.table.pager.get_page(self.page_num);
        *old_node.leaf_node_num_cells() = LEAF_NODE_LEFT_SPLIT_COUNT as u32;

        if old_node_is_root {
            self.table.create_new_root(new_page_num);
        } else {
            println!("Need to implement updating parent after split");
            exit(1);
        }
    }
}
