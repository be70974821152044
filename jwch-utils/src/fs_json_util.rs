use std::{
    fmt::Debug,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};

pub fn read_json<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| serde_json::from_reader(BufReader::new(File::open(&path)?)).map_err(anyhow::Error::new))()
        .with_context(|| {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        })
}

pub fn write_json<P: Into<PathBuf>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    Ok(serde_json::to_writer_pretty(
        BufWriter::new(File::create(path)?),
        value,
    )?)
}

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))().with_context(
        || {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::{read_json, read_toml, write_json};

    #[derive(PartialEq, Debug, Serialize, Deserialize)]
    struct Entry {
        name: String,
        weeks: Vec<u32>,
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("jwch-utils-{}.json", std::process::id()));
        let entry = Entry {
            name: "数据结构".to_owned(),
            weeks: vec![1, 16],
        };
        write_json(&path, &entry).unwrap();
        assert_eq!(read_json::<_, Entry>(&path).unwrap(), entry);
        fs_err::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = read_toml::<_, Entry>("/nonexistent/jwch.toml").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/jwch.toml"));
    }
}
