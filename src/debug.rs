//! Meta-command diagnostics: `.btree` dumps the page tree shape, `.constants`
//! dumps the fixed layout sizes both sides of a test would want to assert on.
use crate::node::{
    COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_SPACE_FOR_CELLS,
};
use crate::row::ROW_SIZE;
use crate::table::Table;

pub fn print_tree(table: &mut Table) {
    println!("Tree:");
    print_node(table, table.root_page_num, 0);
}

fn print_node(table: &mut Table, page_num: u32, indent_level: u32) {
    let node = table.pager.get_page(page_num);

    if node.is_leaf() {
        let num_cells = *node.leaf_node_num_cells();
        println!("{}- leaf (size {num_cells})", indent(indent_level));
        for i in 0..num_cells {
            let node = table.pager.get_page(page_num);
            let key = *node.leaf_node_key(i);
            println!("{}- {key}", indent(indent_level + 1));
        }
    } else {
        let num_keys = *node.internal_node_num_keys();
        println!("{}- internal (size {num_keys})", indent(indent_level));
        for i in 0..num_keys {
            let node = table.pager.get_page(page_num);
            let child = *node.internal_node_child(i);
            print_node(table, child, indent_level + 1);

            let node = table.pager.get_page(page_num);
            let key = *node.internal_node_key(i);
            println!("{}- key {key}", indent(indent_level + 1));
        }

        let node = table.pager.get_page(page_num);
        let right_child = *node.internal_node_right_child();
        print_node(table, right_child, indent_level + 1);
    }
}

fn indent(level: u32) -> String {
    "  ".repeat(level as usize)
}

pub fn print_constants() {
    println!("Constants:");
    println!("ROW_SIZE: {ROW_SIZE}");
    println!("COMMON_NODE_HEADER_SIZE: {COMMON_NODE_HEADER_SIZE}");
    println!("LEAF_NODE_HEADER_SIZE: {LEAF_NODE_HEADER_SIZE}");
    println!("LEAF_NODE_CELL_SIZE: {LEAF_NODE_CELL_SIZE}");
    println!("LEAF_NODE_SPACE_FOR_CELLS: {LEAF_NODE_SPACE_FOR_CELLS}");
    println!("LEAF_NODE_MAX_CELLS: {LEAF_NODE_MAX_CELLS}");
}
