use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ParishError, Result};
use crate::models::ParishContent;

/// 数据目录 (~/.local/share/parish/)
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .ok_or(ParishError::NoDir("data"))?
        .join("parish");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// 从TOML文件加载内容；文件不存在时写出默认内容供编辑
pub fn load_content(path: &Path) -> Result<ParishContent> {
    if !path.exists() {
        let content = ParishContent::default();
        save_content(&content, path)?;
        info!(path = %path.display(), "wrote default parish content");
        return Ok(content);
    }

    let text = fs::read_to_string(path)?;
    let mut content: ParishContent = toml::from_str(&text).map_err(|source| ParishError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    content.sort_posts();

    debug!(
        services = content.services.len(),
        sermons = content.sermons.len(),
        posts = content.posts.len(),
        "loaded parish content"
    );
    Ok(content)
}

/// 保存内容到TOML文件
pub fn save_content(content: &ParishContent, path: &Path) -> Result<()> {
    let text = toml::to_string_pretty(content)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("parish-test-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("content.toml")
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let path = scratch("missing");
        let _ = fs::remove_file(&path);

        let content = load_content(&path).unwrap();
        assert_eq!(content, ParishContent::default());
        assert!(path.exists());

        // 再次加载得到相同内容
        assert_eq!(load_content(&path).unwrap(), content);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let path = scratch("invalid");
        fs::write(&path, "parish = [").unwrap();

        let err = load_content(&path).unwrap_err();
        assert!(matches!(err, ParishError::Parse { .. }));
        assert!(err.to_string().contains("content.toml"));
    }
}
