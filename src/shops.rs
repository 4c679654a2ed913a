use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ShopListError {
    #[error("Missing {0}. Please create it with one shop name per line.")]
    Missing(PathBuf),

    #[error("{0} is empty. Add shops to scrape (one per line).")]
    Empty(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Shop names from `content`: one per line, trimmed, blank lines skipped
pub fn parse_shop_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the shop list; a missing or empty file is an error
pub fn load_shop_list(path: &Path) -> Result<Vec<String>, ShopListError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ShopListError::Missing(path.to_path_buf()))
        }
        Err(source) => {
            return Err(ShopListError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let shops = parse_shop_list(&content);
    if shops.is_empty() {
        return Err(ShopListError::Empty(path.to_path_buf()));
    }
    Ok(shops)
}
