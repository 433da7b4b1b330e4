//! Interactive front end: reads `width:height:cells` puzzle lines from
//! stdin and prints each color's solved path in arrow notation.

use std::io::{self, BufRead, Write};

use leyline::builder::SquareLatticeBuilder;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "w:h:cells (a-z colors, A-Z terminators, 1-9 multipasses, _ none): ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let builder = match SquareLatticeBuilder::from_spec(line) {
            Ok(builder) => builder,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let lattice = match builder.build() {
            Ok(lattice) => lattice,
            Err(reasons) => {
                println!("invalid lattice: {reasons:?}");
                continue;
            }
        };

        match lattice.solve() {
            Ok(Some(solved)) => {
                for color in solved.colors() {
                    let display = (b'a' + color as u8) as char;
                    println!("{}: {}", display, solved.arrow_notation(color).unwrap());
                }
            }
            Ok(None) => println!("no solution"),
            Err(err) => println!("{err}"),
        }
    }
}
