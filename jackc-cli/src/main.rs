//! Entrypoint for CLI
use std::{env, error::Error, ffi::OsStr, fs, path::Path, path::PathBuf, process};

use log::{error, info};

static USAGE: &str = r#"
usage: jackc [--analyze] PATH

PATH is a .jack source file, or a directory containing .jack files.
Each unit compiles to a .vm file next to its source. With --analyze
the token stream is dumped to a .xml file instead.

examples:
    jackc Main.jack
    jackc projects/pong
    jackc --analyze Main.jack
"#;

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new().env().init().unwrap();

    match parse_args() {
        Some(cmd) => run(cmd)?,
        None => {
            print_usage();
            // FreeBSD EX_USAGE (64)
            process::exit(64)
        }
    }

    Ok(())
}

struct Cmd {
    analyze: bool,
    path: String,
}

fn parse_args() -> Option<Cmd> {
    let mut analyze = false;
    let mut path = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--analyze" => analyze = true,
            _ if path.is_none() => path = Some(arg),
            _ => return None,
        }
    }

    path.map(|path| Cmd { analyze, path })
}

fn print_usage() {
    println!("{USAGE}");
}

fn run(cmd: Cmd) -> Result<(), Box<dyn Error>> {
    for unit_path in discover_units(Path::new(&cmd.path))? {
        // A failed unit is reported and the batch continues; no output
        // file is written for it.
        if let Err(message) = handle_unit(&unit_path, cmd.analyze) {
            error!("{}: {}", unit_path.display(), message);
        }
    }

    Ok(())
}

/// Translate the supplied path to the list of units to compile.
///
/// A directory is scanned, non-recursively, for `.jack` files.
fn discover_units(path: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if path.is_dir() {
        let mut units = vec![];
        for entry in fs::read_dir(path)? {
            let entry_path = entry?.path();
            if entry_path.is_file() && entry_path.extension() == Some(OsStr::new("jack")) {
                units.push(entry_path);
            }
        }
        // Directory iteration order is not deterministic.
        units.sort();
        Ok(units)
    } else if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(format!("path \"{}\" is not a file or a directory", path.display()).into())
    }
}

/// Compile or analyze one unit, writing the output next to the source
/// with the extension replaced.
fn handle_unit(path: &Path, analyze: bool) -> Result<(), String> {
    info!("compiling {}", path.display());

    let source = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let unit_name = path
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| "invalid file name".to_string())?;

    let (output, extension) = if analyze {
        let document = jackc::analyze_tokens(&source).map_err(|err| err.to_string())?;
        (document, "xml")
    } else {
        let code = jackc::compile_str(&source, unit_name).map_err(|err| err.to_string())?;
        (code, "vm")
    };

    let output_path = path.with_extension(extension);
    fs::write(&output_path, output).map_err(|err| err.to_string())?;
    info!("wrote {}", output_path.display());

    Ok(())
}
