//! Parse an INI document, edit it, and write it back out.
//!
//! Run with: cargo run --example roundtrip

use initext::{Dialect, IniDocument};
use std::error::Error;

const INPUT: &str = "\
; sample application config
[server]
host = localhost
port = 8080 ; change in production

[logging]
level = info
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = IniDocument::from_str(INPUT)?;

    println!("sections: {:?}", doc.sections().iter().map(|s| s.name()).collect::<Vec<_>>());

    // Edit through the section model; order and comments are preserved.
    if let Some(server) = doc.section_mut("server") {
        server.set_value("port", "443");
    }

    println!("rendered:\n{}", doc);

    // The same text under the MySQL dialect treats '#' as comments and
    // accepts bare flags.
    let mysql = IniDocument::from_str_with_dialect(
        "[mysqld]\nskip-networking\nport = 3306\n# local only\n",
        Dialect::mysql_style(),
    )?;
    println!(
        "bare flag present: {}",
        mysql.section("mysqld").map(|s| s.contains("skip-networking")).unwrap_or(false)
    );

    Ok(())
}
