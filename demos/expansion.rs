//! Resolve ${key} and ${section|key} placeholders across a config tree.
//!
//! Run with: cargo run --example expansion

use initext::{ConfigSet, IniDocument};
use std::error::Error;

const INPUT: &str = "\
[defaults]
root = /srv/app

[web]
static = ${defaults|root}/static
index = ${static}/index.html

[worker]
spool = ${defaults|root}/spool
";

fn main() -> Result<(), Box<dyn Error>> {
    let doc = IniDocument::from_str(INPUT)?;
    let mut configs = ConfigSet::from_document(&doc);

    // Resolve one value without touching the tree.
    println!("web.index -> {}", configs.get_expanded("web", "index")?);

    // Or expand everything in place and write the result back into a
    // document.
    configs.expand_all()?;
    let mut doc = doc;
    configs.apply_to_document(&mut doc);
    println!("expanded document:\n{}", doc);

    Ok(())
}
