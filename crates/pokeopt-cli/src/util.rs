use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
    sync::Arc,
};

use anyhow::Context;
use pokeopt_model::{Pokedex, TypeChart};
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` refines the filter; pokeopt crates log at `info` by default.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pokeopt=info".parse()?))
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// Write `value` as pretty JSON to `output_path`, or to stdout without a path.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn open_file(file_kind: &str, path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;
    Ok(BufReader::new(file))
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = open_file(file_kind, path)?;
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;
    Ok(value)
}

/// Read a type chart from an attacker -> defender -> multiplier JSON map
///
/// Without a path the built-in chart is used.
pub fn read_type_chart_file<P>(path: Option<P>) -> anyhow::Result<TypeChart>
where
    P: AsRef<Path>,
{
    let Some(path) = path else {
        return Ok(TypeChart::standard());
    };
    let path = path.as_ref();
    let reader = open_file("type chart", path)?;
    TypeChart::from_json_reader(reader)
        .with_context(|| format!("Failed to load type chart: {}", path.display()))
}

/// Read a Pokédex catalog from a JSON array of records
pub fn read_pokedex_file<P>(path: P, chart: &TypeChart) -> anyhow::Result<Arc<Pokedex>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = open_file("pokedex", path)?;
    let pokedex = Pokedex::from_json_reader(reader, chart)
        .with_context(|| format!("Failed to load pokedex: {}", path.display()))?;
    if pokedex.is_empty() {
        anyhow::bail!("Pokedex file contains no pokemon: {}", path.display());
    }
    Ok(Arc::new(pokedex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_is_pretty_with_trailing_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({ "team": [25, 143] })).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"team\""));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["team"][1], 143);
    }
}
