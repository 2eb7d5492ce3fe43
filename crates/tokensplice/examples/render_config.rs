//! Renders a small configuration template the way a data-source setup would:
//! `${...}` placeholders are filled from a property map, with defaults for
//! anything the map leaves out, and the SQL statement's `#{...}` parameters
//! are swapped for `?` bind markers.
//!
//! Run with
//!
//! ```bash
//! cargo run -p tokensplice --example render_config
//! ```

use std::collections::BTreeMap;

use tokensplice::{
    TokenParser,
    handlers::Collector,
    properties::{KEY_ENABLE_DEFAULT_VALUE, resolve},
};

const TEMPLATE: &str = r"driver   = ${driver}
url      = ${url:jdbc:h2:mem:demo}
username = ${username:sa}
password = ${password}
query    = select * from orders where id = #{id} and status = #{status}
literal  = \${not a placeholder}";

fn main() {
    let mut properties = BTreeMap::new();
    properties.insert("driver".to_string(), "org.postgresql.Driver".to_string());
    properties.insert("username".to_string(), "app".to_string());
    properties.insert(KEY_ENABLE_DEFAULT_VALUE.to_string(), "true".to_string());

    let resolved = resolve(TEMPLATE, Some(&properties));

    let bind = TokenParser::new("#{", "}", Collector::new("?"));
    let rendered = bind.substitute(&resolved);

    println!("{rendered}");
    println!();
    println!("bind parameters: {:?}", bind.into_handler().into_expressions());
}
