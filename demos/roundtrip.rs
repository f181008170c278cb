//! Round-trip Example
//!
//! Writes a small table, reads it back and looks rows up by id.

use minicsv::{index, print, read_csv, read_csv_with, write_csv, KeyErrors, Table};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("minicsv_example1.csv");

    let table = Table::from(vec![
        vec!["Line 1", "Example, 1", "1"],
        vec!["Line 2", "Example \"2,0\"", "2"],
    ]);
    println!("Before:");
    print(&table)?;

    println!("Saving...");
    write_csv(&table, &path)?;
    println!("Saved");

    let rows = read_csv(&path)?;
    println!("After:");
    print(&rows)?;
    println!("Item (2,2): {}", rows.get(1, 1).unwrap_or_default());

    let by_id = index::index_by_int(&rows, 2, KeyErrors::Skip)?;
    println!("Item with id 2: {:?}", by_id.get(&2));

    for row in &rows {
        println!("{}", row.join("\t"));
    }

    println!("Reading with specific parameters");
    let rows = read_csv_with(&path, "utf-8", '"', ',')?;
    for row in &rows {
        println!("{}", row.join("\t"));
    }

    std::fs::remove_file(&path).ok();
    Ok(())
}
