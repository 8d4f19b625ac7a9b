//! Index user records by id with a degree-3 B-tree.
//!
//! Run with `cargo run --example user_index`.

use btree_index::{BTree, Result};

fn main() -> Result<()> {
    let mut index = BTree::new(3)?;

    let users = [
        (1, "Alice Johnson"),
        (3, "Bob Smith"),
        (7, "Charlie Brown"),
        (10, "David Wilson"),
        (11, "Eve Davis"),
        (13, "Frank Miller"),
        (14, "Grace Lee"),
        (15, "Henry Taylor"),
        (18, "Ivy Chen"),
        (16, "Jack Robinson"),
        (19, "Kate Adams"),
        (24, "Liam Garcia"),
    ];

    for (user_id, name) in users {
        index.insert(user_id, format!("User: {}", name));
    }

    for user_id in [10, 15, 99] {
        match index.search(&user_id) {
            Some(record) => println!("Search user ID {}: {}", user_id, record),
            None => println!("Search user ID {}: Not found", user_id),
        }
    }

    println!("\nAll users in B-tree (sorted by ID):");
    for (user_id, record) in index.enumerate() {
        println!("  ID {}: {}", user_id, record);
    }

    index.validate()?;
    println!(
        "\nheight: {}, nodes: {}, {}",
        index.height(),
        index.node_count(),
        index.stats().snapshot()
    );

    Ok(())
}
