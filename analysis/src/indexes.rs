use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// suffix of index definition files inside `<sql>/indexes`
pub const INDEX_FILE_SUFFIX: &str = "_up.sql";

/// Resolves the index definitions of a table from `<sql>/indexes/<table>_up.sql`.
///
/// Hits are memoized under the requested table name for the lifetime of the resolver,
/// misses are retried on every call.
#[derive(Debug, Clone)]
pub struct IndexResolver {
    index_dir: PathBuf,
    cache: BTreeMap<String, String>,
}

/// strip a trailing `_<digits>` from a table name, e.g. `string_encrypted_10000`
pub fn base_table(table: &str) -> Option<&str> {
    let (base, suffix) = table.rsplit_once('_')?;

    if !suffix.is_empty() && suffix.bytes().all(|byte| byte.is_ascii_digit()) {
        Some(base)
    } else {
        None
    }
}

impl IndexResolver {
    pub fn new(sql_dir: &Path) -> Self {
        Self {
            index_dir: sql_dir.join("indexes"),
            cache: BTreeMap::new(),
        }
    }

    fn definition_path(&self, table: &str) -> PathBuf {
        self.index_dir.join(format!("{table}{INDEX_FILE_SUFFIX}"))
    }

    /// Index definitions for `table`, falling back to the table name without its row count.
    ///
    /// Unreadable files are logged and treated like missing ones.
    pub fn resolve(&mut self, table: &str) -> Option<&str> {
        if !self.cache.contains_key(table) {
            let path = Some(self.definition_path(table))
                .filter(|path| path.is_file())
                .or_else(|| {
                    base_table(table)
                        .map(|base| self.definition_path(base))
                        .filter(|path| path.is_file())
                })?;

            debug!(table = table, path = ?path, "Reading index definitions");

            match fs::read_to_string(&path) {
                Ok(content) => {
                    self.cache.insert(table.to_owned(), content.trim().to_owned());
                }
                Err(error) => {
                    warn!(
                        path = ?path,
                        error = ?error,
                        "Could not read index file {}: {error}",
                        path.display()
                    );

                    return None;
                }
            }
        }

        self.cache.get(table).map(String::as_str)
    }

    /// previously resolved definitions, without touching the file system
    #[cfg(test)]
    pub(crate) fn cached(&self, table: &str) -> Option<&str> {
        self.cache.get(table).map(String::as_str)
    }
}
