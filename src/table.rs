use log::debug;

use crate::node::Node;
use crate::pager::Pager;

/// Thin owner of a `Pager` plus the root page number. Hides the pager from
/// the cursor and front-end layers, and is the sole place that knows how to
/// grow the root into an internal node.
pub struct Table {
    pub root_page_num: u32,
    pub pager: Pager,
}

impl Drop for Table {
    fn drop(&mut self) {
        self.close();
    }
}

impl Table {
    pub fn open(filename: &str) -> Self {
        let mut pager = Pager::open(filename);
        let root_page_num = 0;

        if pager.num_pages == 0 {
            let root = pager.get_page(root_page_num);
            root.set_node_root(true);
        }

        Self {
            root_page_num,
            pager,
        }
    }

    fn close(&mut self) {
        for i in 0..self.pager.num_pages {
            self.pager.flush(i);
        }
    }

    /// Handle splitting the root. Old root is copied into a new page,
    /// becoming the left child. Page 0 is re-initialized to hold the new
    /// root internal node pointing at the left and right children.
    pub fn create_new_root(&mut self, right_child_page_num: u32) {
        let left_child_page_num = self.pager.get_unused_page_num();

        let old_root_bytes = self.pager.get_page(self.root_page_num).to_bytes();
        let mut left_child = Node::from_bytes(&old_root_bytes);
        left_child.set_node_root(false);
        *left_child.parent() = self.root_page_num;
        *self.pager.get_page(left_child_page_num) = left_child;

        let right_child = self.pager.get_page(right_child_page_num);
        *right_child.parent() = self.root_page_num;

        let left_child_max_key = self.pager.get_page(left_child_page_num).max_key();

        debug!(
            "splitting root: left={left_child_page_num} right={right_child_page_num} sep={left_child_max_key}"
        );

        let mut new_root = Node::initialize_internal_node();
        new_root.set_node_root(true);
        *new_root.internal_node_num_keys() = 1;
        *new_root.internal_node_child(0) = left_child_page_num;
        *new_root.internal_node_key(0) = left_child_max_key;
        *new_root.internal_node_right_child() = right_child_page_num;

        *self.pager.get_page(self.root_page_num) = new_root;
    }
}
